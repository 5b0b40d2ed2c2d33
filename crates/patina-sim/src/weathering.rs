//! Weathering system: deferred door ticks, random ticks, and power updates.

use patina_core::{BlockPos, WorldAccess};
use patina_weathering::{PowerResponse, WeatheringEngine, WeatheringTuning};
use rand::Rng;
use tracing::debug;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// Drives [`WeatheringEngine`] from the tick loop.
///
/// Each tick it first fires the deferred door ticks that are due, then hands
/// out `random_tick_speed` random ticks, each to a uniformly chosen cell among
/// those still able to age.
#[derive(Debug)]
pub struct WeatheringSystem {
    engine: WeatheringEngine,
    random_tick_speed: u32,
    advances: u64,
}

impl WeatheringSystem {
    /// Create the system with explicit tuning and random tick rate.
    pub fn new(tuning: WeatheringTuning, random_tick_speed: u32) -> Self {
        Self {
            engine: WeatheringEngine::new(tuning),
            random_tick_speed,
            advances: 0,
        }
    }

    /// Level advances applied so far.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    fn fire_deferred(&self, ctx: &mut SimContext<'_>) {
        for due in ctx.world.take_due_ticks() {
            if let Some(open) = self.engine.scheduled_tick(&mut *ctx.world, due.pos) {
                let verb = if open { "opened" } else { "closed" };
                ctx.emit(
                    SimEventKind::DoorToggled { pos: due.pos, open },
                    format!("door at {} {verb}", due.pos),
                );
            }
        }
    }

    fn random_ticks(&mut self, ctx: &mut SimContext<'_>) {
        let candidates = ctx.world.positions_where(WeatheringEngine::is_randomly_ticking);
        if candidates.is_empty() {
            return;
        }
        for _ in 0..self.random_tick_speed {
            let pos = candidates[ctx.rng.random_range(0..candidates.len())];
            if let Some(change) = self.engine.random_tick(&mut *ctx.world, pos, &mut *ctx.rng) {
                self.advances += 1;
                ctx.emit(
                    SimEventKind::LevelAdvanced {
                        pos,
                        from: change.from,
                        to: change.to,
                    },
                    format!("{pos} aged from {} to {}", change.from, change.to),
                );
            }
        }
    }

    fn notify_door(&self, ctx: &mut SimContext<'_>, door: BlockPos, source: BlockPos) {
        let source_block = ctx.world.cell(source).block;
        let response = self.engine.neighbor_changed(&mut *ctx.world, door, &source_block);
        record_response(ctx, door, response);
    }
}

fn record_response(ctx: &mut SimContext<'_>, pos: BlockPos, response: PowerResponse) {
    match response {
        PowerResponse::Ignored => {}
        PowerResponse::Applied { toggled: Some(open) } => {
            let verb = if open { "opened" } else { "closed" };
            ctx.emit(
                SimEventKind::DoorToggled { pos, open },
                format!("door at {pos} {verb}"),
            );
        }
        PowerResponse::Applied { toggled: None } => {
            let powered = ctx
                .world
                .cell(pos)
                .door_state()
                .is_some_and(|d| d.powered);
            ctx.emit(
                SimEventKind::DoorPowered { pos, powered },
                format!("door at {pos} powered={powered}"),
            );
        }
        PowerResponse::Scheduled { delay } => ctx.emit(
            SimEventKind::DoorScheduled { pos, delay },
            format!("door at {pos} responds in {delay} ticks"),
        ),
    }
}

impl System for WeatheringSystem {
    fn name(&self) -> &str {
        "weathering"
    }

    // Doors laid out next to an active signal pick up its power before the
    // first tick.
    fn init(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let doors = ctx.world.positions_where(|c| c.door_state().is_some());
        for door in doors {
            if ctx.world.has_neighbor_signal(door) {
                let response = self.engine.power_changed(&mut *ctx.world, door, true);
                record_response(ctx, door, response);
            }
        }
        Ok(())
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.fire_deferred(ctx);
        self.random_ticks(ctx);
        Ok(())
    }

    fn signal_changed(&mut self, ctx: &mut SimContext<'_>, pos: BlockPos) -> SimResult<()> {
        let nearby = std::iter::once(pos).chain(pos.neighbors().map(|(_, n)| n));
        for door in nearby.collect::<Vec<_>>() {
            if ctx.world.cell(door).door_state().is_some() {
                debug!(%door, signal = %pos, "notifying door");
                self.notify_door(ctx, door, pos);
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

}
