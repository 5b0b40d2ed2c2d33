/// Game ticks in one in-world day.
pub const TICKS_PER_DAY: u64 = 24_000;

/// Tracks simulation time as a monotonic tick counter with a day cycle.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    ticks_per_day: u64,
}

impl SimClock {
    /// Create a clock starting at `tick` with the given day length.
    /// A zero day length is treated as one tick.
    pub fn new(tick: u64, ticks_per_day: u64) -> Self {
        Self {
            tick,
            ticks_per_day: ticks_per_day.max(1),
        }
    }

    /// Step forward one tick and return it.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Ticks elapsed.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Whole days elapsed.
    pub fn day(&self) -> u64 {
        self.tick / self.ticks_per_day
    }

    /// Return the configured day length.
    pub fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0, TICKS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_where_told() {
        let clock = SimClock::default();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.day(), 0);
        assert_eq!(clock.ticks_per_day(), TICKS_PER_DAY);
    }

    #[test]
    fn advance_counts_up() {
        let mut clock = SimClock::new(10, 100);
        clock.advance();
        clock.advance();
        assert_eq!(clock.advance(), 13);
        assert_eq!(clock.tick(), 13);
    }

    #[test]
    fn clock_day_wraps() {
        let mut clock = SimClock::new(0, 5);
        for _ in 0..12 {
            clock.advance();
        }
        assert_eq!(clock.day(), 2);
        assert_eq!(clock.tick(), 12);
    }

    #[test]
    fn zero_day_length_is_clamped() {
        let clock = SimClock::new(3, 0);
        assert_eq!(clock.ticks_per_day(), 1);
        assert_eq!(clock.day(), 3);
    }
}
