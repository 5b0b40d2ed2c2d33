//! Exposure predicates: which neighbors let a cell age on a random tick.

use patina_core::{BlockPos, CellState, MaterialLevel, WorldAccess};

/// Whether `neighbor` exposes a cell at `level`.
///
/// `raining_above` is whether rain reaches the cell directly above the one
/// being tested. Air alone never exposes an `Exposed` cell; it needs rain
/// from above or water beside it.
pub fn exposes(level: MaterialLevel, neighbor: &CellState, raining_above: bool) -> bool {
    match level {
        MaterialLevel::Unaffected => neighbor.is_air() || neighbor.carries_water(),
        MaterialLevel::Exposed => raining_above || neighbor.carries_water(),
        MaterialLevel::Weathered => neighbor.carries_water(),
        MaterialLevel::Rusted => false,
    }
}

/// Count the `Weathered`-or-later cells in the cube of per-axis `radius`
/// around `pos`, `pos` included.
pub fn weathered_cluster_size<W: WorldAccess + ?Sized>(world: &W, pos: BlockPos, radius: i32) -> usize {
    pos.within_cube(radius)
        .filter(|p| {
            world
                .cell(*p)
                .material_level()
                .is_some_and(|level| level >= MaterialLevel::Weathered)
        })
        .count()
}
