use std::collections::HashMap;

use crate::block::CellState;
use crate::effect::{GameEvent, Sound};
use crate::pos::{BlockPos, Direction};

/// Snapshot of the six face neighbors of one cell, keyed by direction.
pub type NeighborCache = HashMap<Direction, CellState>;

/// Everything the core needs from the host world.
///
/// The host owns cell storage, weather, redstone-like signals, the deferred
/// tick scheduler and effect broadcasting. The core reads and writes through
/// this trait only, so any grid engine can drive it.
pub trait WorldAccess {
    /// Current state of a cell. Cells the host has never stored read as air.
    fn cell(&self, pos: BlockPos) -> CellState;

    /// Replace the state of a cell.
    fn set_cell(&mut self, pos: BlockPos, cell: CellState);

    /// Whether rain is falling onto `pos` (raining and nothing above it).
    fn is_raining_at(&self, pos: BlockPos) -> bool;

    /// Whether `pos` or any face neighbor carries a power signal.
    fn has_neighbor_signal(&self, pos: BlockPos) -> bool;

    /// Ask for a deferred tick at `pos` after `delay` ticks. Each call yields
    /// exactly one later callback.
    fn schedule_tick(&mut self, pos: BlockPos, delay: u32);

    /// Broadcast a game event at `pos`.
    fn emit_event(&mut self, event: GameEvent, pos: BlockPos);

    /// Play a sound cue at `pos`.
    fn play_sound(&mut self, sound: Sound, pos: BlockPos);

    /// Configuration passthrough for feature switches.
    fn is_feature_enabled(&self, flag: &str) -> bool;

    /// State of the neighbor of `pos` in `direction`.
    fn neighbor(&self, pos: BlockPos, direction: Direction) -> CellState {
        self.cell(pos.relative(direction))
    }

    /// Read all six neighbors of `pos` at once.
    fn neighbor_cache(&self, pos: BlockPos) -> NeighborCache {
        Direction::ALL
            .into_iter()
            .map(|d| (d, self.neighbor(pos, d)))
            .collect()
    }
}
