//! `other` generators: a fluid that produces a different fluid beside it.

use patina_core::{Block, BlockPos, CellState, Direction, Fluid, FluidState, NeighborCache, WorldAccess};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FluidError, FluidResult};
use crate::generator::{FluidGenerator, target_cell};
use crate::registry::GeneratorType;

/// Places a source of `product` next to a cell of `fluid`, optionally only
/// where the target touches a catalyst block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherFluidGenerator {
    /// Fluid whose cells trigger the generator.
    pub fluid: Fluid,
    /// Dispatch priority; lower runs first.
    #[serde(default)]
    pub priority: i32,
    /// Fluid placed in the target cell.
    pub product: Fluid,
    /// Block the target cell must touch, other than through the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalyst: Option<Block>,
}

impl OtherFluidGenerator {
    /// Registry tag.
    pub const TYPE_NAME: &'static str = "other";

    /// Create a generator without a catalyst.
    pub fn new(fluid: impl Into<Fluid>, product: impl Into<Fluid>, priority: i32) -> Self {
        Self {
            fluid: fluid.into(),
            priority,
            product: product.into(),
            catalyst: None,
        }
    }

    /// Require the target to touch `block`.
    pub fn with_catalyst(mut self, block: Block) -> Self {
        self.catalyst = Some(block);
        self
    }

    /// Registry descriptor for this kind.
    pub fn descriptor() -> GeneratorType {
        GeneratorType::new(
            Self::TYPE_NAME,
            "places a different fluid next to a fluid, optionally near a catalyst block",
            decode,
        )
    }

    fn catalyst_near(&self, world: &dyn WorldAccess, target: BlockPos, origin: BlockPos) -> bool {
        let Some(catalyst) = &self.catalyst else {
            return true;
        };
        target
            .neighbors()
            .filter(|(_, n)| *n != origin)
            .any(|(_, n)| world.cell(n).block == *catalyst)
    }
}

fn decode(record: &Value) -> FluidResult<Box<dyn FluidGenerator>> {
    let generator: OtherFluidGenerator = serde_json::from_value(record.clone())
        .map_err(|e| FluidError::InvalidConfig(format!("{}: {e}", OtherFluidGenerator::TYPE_NAME)))?;
    if generator.product == generator.fluid {
        return Err(FluidError::InvalidConfig(format!(
            "{}: product must differ from fluid '{}'; use a 'self' generator instead",
            OtherFluidGenerator::TYPE_NAME,
            generator.fluid
        )));
    }
    Ok(Box::new(generator))
}

impl FluidGenerator for OtherFluidGenerator {
    fn try_generate(
        &self,
        possible_dirs: &[Direction],
        pos: BlockPos,
        world: &mut dyn WorldAccess,
        neighbor_cache: &NeighborCache,
    ) -> Option<BlockPos> {
        let target = possible_dirs
            .iter()
            .filter(|d| target_cell(&*world, pos, **d, neighbor_cache).is_air())
            .map(|d| pos.relative(*d))
            .find(|t| self.catalyst_near(&*world, *t, pos))?;
        world.set_cell(target, CellState::fluid(FluidState::source(self.product.clone())));
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
