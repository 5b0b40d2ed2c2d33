//! The generator capability shared by every kind.

use std::fmt;

use patina_core::{BlockPos, Direction, Fluid, NeighborCache, WorldAccess};
use serde_json::Value;

use crate::error::FluidResult;

/// A strategy that may spawn a fluid cell next to an existing one.
///
/// Instances are built by decoding configuration records through a
/// [`GeneratorRegistry`](crate::GeneratorRegistry) and invoked by
/// [`dispatch`](crate::dispatch()).
pub trait FluidGenerator: fmt::Debug {
    /// Try to place fluid next to `pos`, considering `possible_dirs` in
    /// order. `neighbor_cache` holds the six neighbors of `pos` as read
    /// before any generator ran. Returns the cell written, if any.
    fn try_generate(
        &self,
        possible_dirs: &[Direction],
        pos: BlockPos,
        world: &mut dyn WorldAccess,
        neighbor_cache: &NeighborCache,
    ) -> Option<BlockPos>;

    /// The fluid this generator applies to.
    fn fluid(&self) -> &Fluid;

    /// Lower values run first.
    fn priority(&self) -> i32;

    /// Registry tag of this generator's kind.
    fn type_name(&self) -> &'static str;

    /// Serialize the kind-specific fields. The registry adds the `type` tag.
    fn encode(&self) -> FluidResult<Value>;
}

/// Cached state of the neighbor in `dir`, falling back to a live read.
pub(crate) fn target_cell(
    world: &dyn WorldAccess,
    pos: BlockPos,
    dir: Direction,
    neighbor_cache: &NeighborCache,
) -> patina_core::CellState {
    neighbor_cache
        .get(&dir)
        .cloned()
        .unwrap_or_else(|| world.neighbor(pos, dir))
}
