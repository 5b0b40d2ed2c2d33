use patina_core::{BlockPos, Fluid, MaterialLevel};
use serde::Serialize;

/// Something the tick loop observed or did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventKind {
    // Weathering
    /// A cell aged by one level.
    LevelAdvanced {
        /// The cell that aged.
        pos: BlockPos,
        /// Level before.
        from: MaterialLevel,
        /// Level after.
        to: MaterialLevel,
    },

    // Doors
    /// A door stored a new power state without swinging.
    DoorPowered {
        /// The notified door half.
        pos: BlockPos,
        /// New power state.
        powered: bool,
    },
    /// A door asked for a deferred tick.
    DoorScheduled {
        /// The notified door half.
        pos: BlockPos,
        /// Requested delay in ticks.
        delay: u32,
    },
    /// A door swung open or shut.
    DoorToggled {
        /// The door half that handled the toggle.
        pos: BlockPos,
        /// New open state.
        open: bool,
    },

    // Fluids
    /// A generator placed a new fluid source.
    FluidGenerated {
        /// The fluid cell the generator ran for.
        origin: BlockPos,
        /// The cell that received fluid.
        pos: BlockPos,
        /// The fluid of the origin.
        fluid: Fluid,
    },

    // Environment
    /// A power signal was switched.
    SignalChanged {
        /// The signal cell.
        pos: BlockPos,
        /// New signal state.
        on: bool,
    },
    /// Rain started or stopped.
    WeatherChanged {
        /// New rain state.
        raining: bool,
    },
}

impl SimEventKind {
    /// Short label for tables and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LevelAdvanced { .. } => "level_advanced",
            Self::DoorPowered { .. } => "door_powered",
            Self::DoorScheduled { .. } => "door_scheduled",
            Self::DoorToggled { .. } => "door_toggled",
            Self::FluidGenerated { .. } => "fluid_generated",
            Self::SignalChanged { .. } => "signal_changed",
            Self::WeatherChanged { .. } => "weather_changed",
        }
    }
}

/// An event stamped with its tick.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    /// Tick the event happened on.
    pub tick: u64,
    /// What happened.
    #[serde(flatten)]
    pub kind: SimEventKind,
    /// One-line summary for logs and the CLI.
    pub description: String,
}

impl SimEvent {
    /// Stamp `kind` with `tick`.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Bounded history of [`SimEvent`]s.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Keep at most `max_events` events; 0 keeps everything.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Record an event. Once over capacity the oldest entries go first.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 {
            let excess = self.events.len().saturating_sub(self.max_events);
            self.events.drain(..excess);
        }
    }

    /// Everything recorded, oldest first.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Number of events per label, sorted by label.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for event in &self.events {
            let label = event.kind.label();
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label, 1)),
            }
        }
        counts.sort();
        counts
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(pos: BlockPos) -> SimEventKind {
        SimEventKind::LevelAdvanced {
            pos,
            from: MaterialLevel::Unaffected,
            to: MaterialLevel::Exposed,
        }
    }

    #[test]
    fn unbounded_log_keeps_everything() {
        let mut log = EventLog::new(0);
        assert!(log.is_empty());
        for i in 0..50 {
            log.push(SimEvent::new(i, advanced(BlockPos::new(1, 2, 3)), "test"));
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.events()[0].tick, 0);
    }

    #[test]
    fn capacity_drops_oldest_first() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(SimEvent::new(i, advanced(BlockPos::ORIGIN), "test"));
        }
        assert_eq!(log.len(), 2);
        // oldest dropped
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn event_log_counts_by_label() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(1, advanced(BlockPos::ORIGIN), "a"));
        log.push(SimEvent::new(
            1,
            SimEventKind::DoorToggled {
                pos: BlockPos::ORIGIN,
                open: false,
            },
            "b",
        ));
        log.push(SimEvent::new(2, advanced(BlockPos::ORIGIN), "c"));
        assert_eq!(
            log.counts(),
            vec![("door_toggled", 1), ("level_advanced", 2)]
        );
    }

    #[test]
    fn events_serialize_flat() {
        let event = SimEvent::new(
            4,
            SimEventKind::SignalChanged {
                pos: BlockPos::new(1, 0, 0),
                on: true,
            },
            "signal on",
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "signal_changed");
        assert_eq!(json["tick"], 4);
        assert_eq!(json["on"], true);
    }
}
