//! Priority-ordered invocation of generators.

use patina_core::config::FLUID_GENERATORS;
use patina_core::{BlockPos, Direction, Fluid, WorldAccess};
use tracing::{debug, trace};

use crate::generator::FluidGenerator;

/// Run the generators applicable to `fluid` at `pos` and return the first
/// cell any of them wrote.
///
/// Generators for other fluids are skipped. The rest run in ascending
/// priority, ties in input order, and all share one neighbor snapshot taken
/// before the first runs. Returns `None` when every generator declines or the
/// `fluid_generators` feature is off.
pub fn dispatch(
    generators: &[Box<dyn FluidGenerator>],
    fluid: &Fluid,
    pos: BlockPos,
    possible_dirs: &[Direction],
    world: &mut dyn WorldAccess,
) -> Option<BlockPos> {
    if !world.is_feature_enabled(FLUID_GENERATORS) {
        return None;
    }
    let mut applicable: Vec<&dyn FluidGenerator> = generators
        .iter()
        .map(|g| g.as_ref())
        .filter(|g| g.fluid() == fluid)
        .collect();
    if applicable.is_empty() {
        return None;
    }
    applicable.sort_by_key(|g| g.priority());
    run_sorted(&applicable, pos, possible_dirs, world)
}

/// Invoke generators already filtered to one fluid and sorted by priority.
pub(crate) fn run_sorted(
    generators: &[&dyn FluidGenerator],
    pos: BlockPos,
    possible_dirs: &[Direction],
    world: &mut dyn WorldAccess,
) -> Option<BlockPos> {
    let neighbor_cache = world.neighbor_cache(pos);
    for generator in generators {
        if let Some(spawned) = generator.try_generate(possible_dirs, pos, world, &neighbor_cache) {
            debug!(
                %pos,
                %spawned,
                kind = generator.type_name(),
                priority = generator.priority(),
                "fluid generated"
            );
            return Some(spawned);
        }
        trace!(%pos, kind = generator.type_name(), "generator declined");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{OtherFluidGenerator, SelfFluidGenerator};
    use patina_core::{CellState, FeatureFlags, FluidState, GridWorld};

    fn lava_world() -> GridWorld {
        let mut world = GridWorld::new();
        world.set_cell(BlockPos::ORIGIN, CellState::fluid(FluidState::source("lava")));
        world
    }

    fn product_at(world: &GridWorld, pos: BlockPos) -> Option<String> {
        world.cell(pos).fluid.map(|f| f.fluid.to_string())
    }

    #[test]
    fn lowest_priority_wins() {
        let mut world = lava_world();
        let generators: Vec<Box<dyn FluidGenerator>> = vec![
            Box::new(OtherFluidGenerator::new("lava", "steam", 5)),
            Box::new(OtherFluidGenerator::new("lava", "magma", 1)),
        ];
        let placed = dispatch(
            &generators,
            &Fluid::Lava,
            BlockPos::ORIGIN,
            &[Direction::East],
            &mut world,
        );
        assert_eq!(placed, Some(BlockPos::new(1, 0, 0)));
        assert_eq!(product_at(&world, BlockPos::new(1, 0, 0)).as_deref(), Some("magma"));
    }

    #[test]
    fn ties_keep_input_order() {
        let mut world = lava_world();
        let generators: Vec<Box<dyn FluidGenerator>> = vec![
            Box::new(OtherFluidGenerator::new("lava", "first", 2)),
            Box::new(OtherFluidGenerator::new("lava", "second", 2)),
        ];
        dispatch(&generators, &Fluid::Lava, BlockPos::ORIGIN, &[Direction::Up], &mut world);
        assert_eq!(product_at(&world, BlockPos::new(0, 1, 0)).as_deref(), Some("first"));
    }

    #[test]
    fn falls_through_to_next_generator() {
        let mut world = lava_world();
        let generators: Vec<Box<dyn FluidGenerator>> = vec![
            // needs sources around the origin, which there are none of
            Box::new(SelfFluidGenerator::new("lava", 0)),
            Box::new(OtherFluidGenerator::new("lava", "obsidian_melt", 9)),
        ];
        let placed = dispatch(
            &generators,
            &Fluid::Lava,
            BlockPos::ORIGIN,
            &[Direction::West],
            &mut world,
        );
        assert_eq!(placed, Some(BlockPos::new(-1, 0, 0)));
    }

    #[test]
    fn other_fluids_are_skipped() {
        let mut world = lava_world();
        let generators: Vec<Box<dyn FluidGenerator>> =
            vec![Box::new(OtherFluidGenerator::new("water", "ice_melt", 0))];
        assert_eq!(
            dispatch(&generators, &Fluid::Lava, BlockPos::ORIGIN, &Direction::ALL, &mut world),
            None
        );
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn all_decline_yields_none() {
        let mut world = lava_world();
        let generators: Vec<Box<dyn FluidGenerator>> =
            vec![Box::new(OtherFluidGenerator::new("lava", "water", 0))];
        assert_eq!(
            dispatch(&generators, &Fluid::Lava, BlockPos::ORIGIN, &[], &mut world),
            None
        );
    }

    #[test]
    fn disabled_feature_is_a_no_op() {
        let mut world = lava_world()
            .with_features(FeatureFlags::default().with_fluid_generators(false));
        let generators: Vec<Box<dyn FluidGenerator>> =
            vec![Box::new(OtherFluidGenerator::new("lava", "water", 0))];
        assert_eq!(
            dispatch(&generators, &Fluid::Lava, BlockPos::ORIGIN, &Direction::ALL, &mut world),
            None
        );
    }
}
