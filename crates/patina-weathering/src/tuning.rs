use patina_core::MaterialLevel;
use serde::{Deserialize, Serialize};

/// Balance constants for weathering.
///
/// The defaults are empirically tuned values carried over unchanged; they are
/// exposed as configuration rather than derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatheringTuning {
    /// A bubble-column neighbor ages an `Unaffected` or `Exposed` cell when a
    /// uniform draw exceeds this value.
    pub bubble_threshold: f32,
    /// Same as `bubble_threshold`, for `Weathered` cells.
    pub weathered_bubble_threshold: f32,
    /// Draw threshold for the rain clustering rule at `Exposed`.
    pub cluster_threshold: f32,
    /// Most `Weathered`-or-later cells allowed nearby for the clustering rule
    /// to fire.
    pub cluster_cap: usize,
    /// Per-axis radius of the cube counted by the clustering rule.
    pub cluster_radius: i32,
    /// Delay before a partly weathered door opens after being powered.
    pub open_delay: u32,
    /// Delay before an `Exposed` door closes after losing power.
    pub exposed_close_delay: u32,
    /// Delay before a `Weathered` door closes after losing power.
    pub weathered_close_delay: u32,
}

impl Default for WeatheringTuning {
    fn default() -> Self {
        Self {
            bubble_threshold: 0.06,
            weathered_bubble_threshold: 0.07,
            cluster_threshold: 0.06,
            cluster_cap: 9,
            cluster_radius: 2,
            open_delay: 1,
            exposed_close_delay: 10,
            weathered_close_delay: 20,
        }
    }
}

impl WeatheringTuning {
    /// Bubble-column draw threshold for a cell at `level`.
    pub fn bubble_threshold(&self, level: MaterialLevel) -> f32 {
        match level {
            MaterialLevel::Weathered => self.weathered_bubble_threshold,
            _ => self.bubble_threshold,
        }
    }

    /// Delay before a door at `level` reacts to its power turning on
    /// (`powered == true`) or off. `None` for levels that react immediately.
    pub fn response_delay(&self, level: MaterialLevel, powered: bool) -> Option<u32> {
        match (level, powered) {
            (MaterialLevel::Exposed | MaterialLevel::Weathered, true) => Some(self.open_delay),
            (MaterialLevel::Exposed, false) => Some(self.exposed_close_delay),
            (MaterialLevel::Weathered, false) => Some(self.weathered_close_delay),
            _ => None,
        }
    }
}
