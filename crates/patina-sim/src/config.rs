use patina_weathering::WeatheringTuning;
use serde::{Deserialize, Serialize};

use crate::clock::TICKS_PER_DAY;

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the run's RNG. Equal seeds replay identically.
    pub seed: u64,
    /// Random ticks handed out per tick across all weatherable cells.
    pub random_tick_speed: u32,
    /// Ticks between fluid growth passes.
    pub fluid_interval: u64,
    /// Game ticks per in-world day.
    pub ticks_per_day: u64,
    /// Event log capacity; 0 keeps every event.
    pub max_events: usize,
    /// Weathering balance constants.
    pub tuning: WeatheringTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            random_tick_speed: 3,
            fluid_interval: 5,
            ticks_per_day: TICKS_PER_DAY,
            max_events: 0,
            tuning: WeatheringTuning::default(),
        }
    }
}

impl SimConfig {
    /// Use `seed` for the RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set how many random ticks are handed out per tick.
    pub fn with_random_tick_speed(mut self, speed: u32) -> Self {
        self.random_tick_speed = speed;
        self
    }

    /// Set the number of ticks between fluid growth passes.
    pub fn with_fluid_interval(mut self, interval: u64) -> Self {
        self.fluid_interval = interval;
        self
    }

    /// Cap the event log.
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Replace the weathering constants.
    pub fn with_tuning(mut self, tuning: WeatheringTuning) -> Self {
        self.tuning = tuning;
        self
    }
}
