//! JSON scenario files: a starting world, generators, and a timeline.
//!
//! ```json
//! {
//!   "name": "rainy door",
//!   "ticks": 200,
//!   "config": { "seed": 7, "random_tick_speed": 8 },
//!   "world": {
//!     "raining": true,
//!     "cells": [ { "pos": {"x": 0, "y": 0, "z": 0}, "block": {"iron": "unaffected"} } ]
//!   },
//!   "generators": [ { "type": "self", "fluid": "water", "priority": 0 } ],
//!   "timeline": [ { "tick": 10, "action": "signal", "pos": {"x": 1, "y": 0, "z": 0}, "on": true } ]
//! }
//! ```

use patina_core::{BlockPos, GridWorld, WorldLayout};
use patina_fluids::{GeneratorCatalog, GeneratorRegistry, RejectedRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::simulation::Simulation;

/// A change applied to the world at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TimelineAction {
    /// Switch a power signal.
    Signal {
        /// The signal cell.
        pos: BlockPos,
        /// New state.
        on: bool,
    },
    /// Start or stop rain.
    Rain {
        /// New rain state.
        raining: bool,
    },
}

/// A timeline action and the tick before which it is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Applied just before this tick runs. Tick 0 applies before the first.
    pub tick: u64,
    /// What happens.
    #[serde(flatten)]
    pub action: TimelineAction,
}

/// A complete simulation scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Number of ticks to run.
    pub ticks: u64,
    /// Simulation settings.
    pub config: SimConfig,
    /// Starting world.
    pub world: WorldLayout,
    /// Fluid generator records, decoded through a registry.
    pub generators: Vec<Value>,
    /// Scripted changes.
    pub timeline: Vec<TimelineEntry>,
}

impl Scenario {
    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode the generator records. Records the registry cannot decode are
    /// skipped and returned next to the catalog.
    pub fn decode_generators(
        &self,
        registry: &GeneratorRegistry,
    ) -> (GeneratorCatalog, Vec<RejectedRecord>) {
        registry.decode_all(&self.generators)
    }

    /// Build the world and register the default systems around `catalog`.
    /// Nothing is ticked yet.
    pub fn build(&self, catalog: GeneratorCatalog) -> SimResult<Simulation> {
        let world = GridWorld::from_layout(self.world.clone())?;
        Ok(Simulation::with_default_systems(world, &self.config, catalog))
    }

    /// Build the simulation and run it for [`ticks`](Self::ticks), applying
    /// timeline entries as their ticks come up.
    pub fn run(&self, catalog: GeneratorCatalog) -> SimResult<Simulation> {
        let mut sim = self.build(catalog)?;
        sim.init()?;

        let mut timeline: Vec<&TimelineEntry> = self.timeline.iter().collect();
        timeline.sort_by_key(|entry| entry.tick);
        let mut pending = timeline.into_iter().peekable();

        for _ in 0..self.ticks {
            let next_tick = sim.current_tick() + 1;
            while let Some(entry) = pending.next_if(|e| e.tick <= next_tick) {
                apply(&mut sim, &entry.action)?;
            }
            sim.tick()?;
        }

        info!(
            scenario = %self.name,
            ticks = self.ticks,
            events = sim.events().len(),
            cells = sim.world().len(),
            "scenario finished"
        );
        Ok(sim)
    }
}

fn apply(sim: &mut Simulation, action: &TimelineAction) -> SimResult<()> {
    match action {
        TimelineAction::Signal { pos, on } => sim.set_signal(*pos, *on),
        TimelineAction::Rain { raining } => {
            sim.set_raining(*raining);
            Ok(())
        }
    }
}
