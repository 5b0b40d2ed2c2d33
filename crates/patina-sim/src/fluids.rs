//! Fluid growth system: runs the generator catalog over fluid sources.

use patina_core::{Direction, WorldAccess};
use patina_fluids::GeneratorCatalog;
use rand::seq::SliceRandom;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// Directions a fluid may spread into: down and the four horizontals.
pub const FLOW_DIRECTIONS: [Direction; 5] = [
    Direction::Down,
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Every `interval` ticks, offers each fluid source cell to the catalog.
///
/// Sources are visited in position order and collected before the pass, so
/// cells spawned during a pass wait for the next one. Flow directions are
/// shuffled per source with the simulation RNG.
#[derive(Debug)]
pub struct FluidGrowthSystem {
    catalog: GeneratorCatalog,
    interval: u64,
    spawned: u64,
}

impl FluidGrowthSystem {
    /// Create the system. A zero interval runs every tick.
    pub fn new(catalog: GeneratorCatalog, interval: u64) -> Self {
        Self {
            catalog,
            interval: interval.max(1),
            spawned: 0,
        }
    }

    /// Fluid cells placed so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

impl System for FluidGrowthSystem {
    fn name(&self) -> &str {
        "fluid_growth"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        if self.catalog.is_empty() || ctx.tick() % self.interval != 0 {
            return Ok(());
        }
        let sources = ctx
            .world
            .positions_where(|c| c.fluid.as_ref().is_some_and(|f| f.source));

        for origin in sources {
            let Some(fluid) = ctx.world.cell(origin).fluid.map(|f| f.fluid) else {
                continue;
            };
            if self.catalog.for_fluid(&fluid).is_empty() {
                continue;
            }
            let mut dirs = FLOW_DIRECTIONS;
            dirs.shuffle(&mut *ctx.rng);
            if let Some(pos) = self.catalog.dispatch(&fluid, origin, &dirs, &mut *ctx.world) {
                self.spawned += 1;
                ctx.emit(
                    SimEventKind::FluidGenerated {
                        origin,
                        pos,
                        fluid: fluid.clone(),
                    },
                    format!("{fluid} at {origin} spawned fluid at {pos}"),
                );
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

}
