//! Decoded generators grouped by fluid.

use std::collections::BTreeMap;

use patina_core::{BlockPos, Direction, Fluid, WorldAccess};

use crate::dispatch::run_sorted;
use crate::generator::FluidGenerator;

/// Generator instances indexed by the fluid they apply to.
///
/// Each group stays sorted by ascending priority; generators with equal
/// priority keep insertion order.
#[derive(Debug, Default)]
pub struct GeneratorCatalog {
    groups: BTreeMap<Fluid, Vec<Box<dyn FluidGenerator>>>,
}

impl GeneratorCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a generator to its fluid's group.
    pub fn insert(&mut self, generator: Box<dyn FluidGenerator>) {
        let group = self.groups.entry(generator.fluid().clone()).or_default();
        let at = group.partition_point(|g| g.priority() <= generator.priority());
        group.insert(at, generator);
    }

    /// Generators for `fluid`, in dispatch order.
    pub fn for_fluid(&self, fluid: &Fluid) -> &[Box<dyn FluidGenerator>] {
        self.groups.get(fluid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fluids that have at least one generator.
    pub fn fluids(&self) -> impl Iterator<Item = &Fluid> {
        self.groups.keys()
    }

    /// Every generator, grouped by fluid name and then in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn FluidGenerator> {
        self.groups.values().flatten().map(|g| g.as_ref())
    }

    /// Total number of generators.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns `true` if the catalog holds no generators.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Run the generators for `fluid` at `pos`. See [`crate::dispatch()`].
    pub fn dispatch(
        &self,
        fluid: &Fluid,
        pos: BlockPos,
        possible_dirs: &[Direction],
        world: &mut dyn WorldAccess,
    ) -> Option<BlockPos> {
        if !world.is_feature_enabled(patina_core::config::FLUID_GENERATORS) {
            return None;
        }
        let group: Vec<&dyn FluidGenerator> =
            self.for_fluid(fluid).iter().map(|g| g.as_ref()).collect();
        if group.is_empty() {
            return None;
        }
        run_sorted(&group, pos, possible_dirs, world)
    }
}

impl FromIterator<Box<dyn FluidGenerator>> for GeneratorCatalog {
    fn from_iter<I: IntoIterator<Item = Box<dyn FluidGenerator>>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for generator in iter {
            catalog.insert(generator);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{OtherFluidGenerator, SelfFluidGenerator};
    use patina_core::{CellState, FluidState, GridWorld};

    fn catalog() -> GeneratorCatalog {
        let generators: Vec<Box<dyn FluidGenerator>> = vec![
            Box::new(OtherFluidGenerator::new("lava", "late", 7)),
            Box::new(SelfFluidGenerator::new("water", 0)),
            Box::new(OtherFluidGenerator::new("lava", "early", -1)),
            Box::new(OtherFluidGenerator::new("lava", "late_tie", 7)),
        ];
        generators.into_iter().collect()
    }

    #[test]
    fn groups_are_sorted_by_priority() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        let priorities: Vec<i32> = catalog
            .for_fluid(&Fluid::Lava)
            .iter()
            .map(|g| g.priority())
            .collect();
        assert_eq!(priorities, vec![-1, 7, 7]);
        assert_eq!(catalog.for_fluid(&Fluid::from("honey")).len(), 0);
    }

    #[test]
    fn equal_priority_keeps_insertion_order() {
        let catalog = catalog();
        let lava = catalog.for_fluid(&Fluid::Lava);
        let products: Vec<String> = lava
            .iter()
            .map(|g| g.encode().unwrap()["product"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(products, vec!["early", "late", "late_tie"]);
    }

    #[test]
    fn dispatch_uses_group() {
        let catalog = catalog();
        let mut world = GridWorld::new();
        world.set_cell(BlockPos::ORIGIN, CellState::fluid(FluidState::source("lava")));
        let placed = catalog.dispatch(&Fluid::Lava, BlockPos::ORIGIN, &[Direction::Up], &mut world);
        assert_eq!(placed, Some(BlockPos::new(0, 1, 0)));
        assert!(world.cell(BlockPos::new(0, 1, 0)).is_source_of(&Fluid::from("early")));
    }

    #[test]
    fn empty_catalog() {
        let catalog = GeneratorCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.fluids().count(), 0);
    }
}
