//! `self` generators: a fluid that spreads more of itself.

use patina_core::{BlockPos, CellState, Direction, Fluid, FluidState, NeighborCache, WorldAccess};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FluidError, FluidResult};
use crate::generator::{FluidGenerator, target_cell};
use crate::registry::GeneratorType;

/// Places a new source of its own fluid when the origin is surrounded by
/// enough sources of the same fluid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfFluidGenerator {
    /// Fluid that spreads.
    pub fluid: Fluid,
    /// Dispatch priority; lower runs first.
    #[serde(default)]
    pub priority: i32,
    /// Horizontal source neighbors the origin needs, at most four.
    #[serde(default = "default_min_adjacent")]
    pub min_adjacent_sources: u8,
}

fn default_min_adjacent() -> u8 {
    2
}

impl SelfFluidGenerator {
    /// Registry tag.
    pub const TYPE_NAME: &'static str = "self";

    /// Create a generator with the default adjacency requirement.
    pub fn new(fluid: impl Into<Fluid>, priority: i32) -> Self {
        Self {
            fluid: fluid.into(),
            priority,
            min_adjacent_sources: default_min_adjacent(),
        }
    }

    /// Set the adjacency requirement.
    pub fn with_min_adjacent_sources(mut self, count: u8) -> Self {
        self.min_adjacent_sources = count;
        self
    }

    /// Registry descriptor for this kind.
    pub fn descriptor() -> GeneratorType {
        GeneratorType::new(
            Self::TYPE_NAME,
            "spreads a fluid into empty cells next to enough of its own sources",
            decode,
        )
    }
}

fn decode(record: &Value) -> FluidResult<Box<dyn FluidGenerator>> {
    let generator: SelfFluidGenerator = serde_json::from_value(record.clone())
        .map_err(|e| FluidError::InvalidConfig(format!("{}: {e}", SelfFluidGenerator::TYPE_NAME)))?;
    if usize::from(generator.min_adjacent_sources) > Direction::HORIZONTAL.len() {
        return Err(FluidError::InvalidConfig(format!(
            "{}: min_adjacent_sources must be at most {}, got {}",
            SelfFluidGenerator::TYPE_NAME,
            Direction::HORIZONTAL.len(),
            generator.min_adjacent_sources
        )));
    }
    Ok(Box::new(generator))
}

impl FluidGenerator for SelfFluidGenerator {
    fn try_generate(
        &self,
        possible_dirs: &[Direction],
        pos: BlockPos,
        world: &mut dyn WorldAccess,
        neighbor_cache: &NeighborCache,
    ) -> Option<BlockPos> {
        let adjacent = Direction::HORIZONTAL
            .iter()
            .filter(|d| {
                neighbor_cache
                    .get(d)
                    .is_some_and(|cell| cell.is_source_of(&self.fluid))
            })
            .count();
        if adjacent < usize::from(self.min_adjacent_sources) {
            return None;
        }

        let dir = possible_dirs
            .iter()
            .copied()
            .find(|d| target_cell(&*world, pos, *d, neighbor_cache).is_air())?;
        let target = pos.relative(dir);
        world.set_cell(target, CellState::fluid(FluidState::source(self.fluid.clone())));
        Some(target)
    }

    fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn encode(&self) -> FluidResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
