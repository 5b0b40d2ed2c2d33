use serde::{Deserialize, Serialize};

/// Name of the flag gating all weathering.
pub const RUSTING: &str = "rusting";

/// Name of the flag gating procedural fluid generation.
pub const FLUID_GENERATORS: &str = "fluid_generators";

/// Feature switches a host passes through to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Whether weatherable cells age on random ticks.
    pub rusting: bool,
    /// Whether fluid generators run.
    pub fluid_generators: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            rusting: true,
            fluid_generators: true,
        }
    }
}

impl FeatureFlags {
    /// Look a flag up by name. Unknown names read as disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        match name {
            RUSTING => self.rusting,
            FLUID_GENERATORS => self.fluid_generators,
            _ => false,
        }
    }

    /// Set the rusting flag.
    pub fn with_rusting(mut self, enabled: bool) -> Self {
        self.rusting = enabled;
        self
    }

    /// Set the fluid generator flag.
    pub fn with_fluid_generators(mut self, enabled: bool) -> Self {
        self.fluid_generators = enabled;
        self
    }
}
