use std::fmt;

use serde::{Deserialize, Serialize};

use crate::material::MaterialLevel;
use crate::pos::Direction;

/// Identifier of a fluid kind.
///
/// Water and lava are built in because weathering and the default generators
/// reason about them; every other fluid is carried by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Fluid {
    /// Water, still or flowing.
    Water,
    /// Lava, still or flowing.
    Lava,
    /// Any other fluid, identified by name.
    Named(String),
}

impl Fluid {
    /// The identifier this fluid is written as.
    pub fn name(&self) -> &str {
        match self {
            Self::Water => "water",
            Self::Lava => "lava",
            Self::Named(name) => name,
        }
    }
}

impl From<String> for Fluid {
    fn from(name: String) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "water" => Self::Water,
            "lava" => Self::Lava,
            _ => Self::Named(name),
        }
    }
}

impl From<&str> for Fluid {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<Fluid> for String {
    fn from(fluid: Fluid) -> Self {
        fluid.name().to_string()
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The fluid occupying a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidState {
    /// Which fluid.
    pub fluid: Fluid,
    /// `true` for a still source cell, `false` for flowing fluid.
    #[serde(default = "default_source")]
    pub source: bool,
}

fn default_source() -> bool {
    true
}

impl FluidState {
    /// A still source of `fluid`.
    pub fn source(fluid: impl Into<Fluid>) -> Self {
        Self {
            fluid: fluid.into(),
            source: true,
        }
    }

    /// Flowing `fluid`.
    pub fn flowing(fluid: impl Into<Fluid>) -> Self {
        Self {
            fluid: fluid.into(),
            source: false,
        }
    }
}

/// Which half of a two-cell door a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorHalf {
    /// The bottom cell.
    #[default]
    Lower,
    /// The top cell.
    Upper,
}

impl DoorHalf {
    /// Direction from this half to the other one.
    pub fn partner_direction(self) -> Direction {
        match self {
            Self::Lower => Direction::Up,
            Self::Upper => Direction::Down,
        }
    }

    /// The other half.
    pub fn other(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

/// State of one half of a weatherable door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DoorState {
    /// Oxidation level.
    #[serde(default)]
    pub level: MaterialLevel,
    /// Which half this cell is.
    #[serde(default)]
    pub half: DoorHalf,
    /// Whether the door currently stands open.
    #[serde(default)]
    pub open: bool,
    /// Last power input the door has seen.
    #[serde(default)]
    pub powered: bool,
}

impl DoorState {
    /// A closed, unpowered door half at `level`.
    pub fn new(level: MaterialLevel, half: DoorHalf) -> Self {
        Self {
            level,
            half,
            open: false,
            powered: false,
        }
    }

    /// Copy of this state with `open` set.
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Copy of this state with `powered` set.
    pub fn with_powered(mut self, powered: bool) -> Self {
        self.powered = powered;
        self
    }
}

/// The solid content of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Nothing.
    #[default]
    Air,
    /// Inert solid.
    Stone,
    /// Turbulent upward water current.
    BubbleColumn,
    /// A weatherable iron block.
    Iron(MaterialLevel),
    /// One half of a weatherable door.
    Door(DoorState),
    /// Any other block, identified by name.
    Named(String),
}

impl Block {
    /// Name used in logs and reports.
    pub fn name(&self) -> String {
        match self {
            Self::Air => "air".to_string(),
            Self::Stone => "stone".to_string(),
            Self::BubbleColumn => "bubble_column".to_string(),
            Self::Iron(level) => format!("{level}_iron"),
            Self::Door(door) => format!("{}_iron_door", door.level),
            Self::Named(name) => name.clone(),
        }
    }
}

/// Everything the host stores for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellState {
    /// Solid content.
    #[serde(default)]
    pub block: Block,
    /// Fluid content, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<FluidState>,
}

impl CellState {
    /// An empty cell.
    pub fn air() -> Self {
        Self::default()
    }

    /// A cell holding `block` and no fluid.
    pub fn block(block: Block) -> Self {
        Self { block, fluid: None }
    }

    /// A cell holding only `fluid`.
    pub fn fluid(fluid: FluidState) -> Self {
        Self {
            block: Block::Air,
            fluid: Some(fluid),
        }
    }

    /// A still water source.
    pub fn water() -> Self {
        Self::fluid(FluidState::source(Fluid::Water))
    }

    /// A weatherable iron block at `level`.
    pub fn iron(level: MaterialLevel) -> Self {
        Self::block(Block::Iron(level))
    }

    /// A door half.
    pub fn door(door: DoorState) -> Self {
        Self::block(Block::Door(door))
    }

    /// Returns true when the cell holds neither a block nor a fluid.
    pub fn is_air(&self) -> bool {
        self.block == Block::Air && self.fluid.is_none()
    }

    /// Returns true for a bubble column.
    pub fn is_bubble_column(&self) -> bool {
        self.block == Block::BubbleColumn
    }

    /// Returns true when the cell holds water, still or flowing.
    pub fn carries_water(&self) -> bool {
        self.carries(&Fluid::Water)
    }

    /// Returns true when the cell holds `fluid`, still or flowing.
    pub fn carries(&self, fluid: &Fluid) -> bool {
        self.fluid.as_ref().is_some_and(|f| &f.fluid == fluid)
    }

    /// Returns true when the cell is a still source of `fluid`.
    pub fn is_source_of(&self, fluid: &Fluid) -> bool {
        self.fluid
            .as_ref()
            .is_some_and(|f| f.source && &f.fluid == fluid)
    }

    /// Oxidation level, for weatherable cells.
    pub fn material_level(&self) -> Option<MaterialLevel> {
        match &self.block {
            Block::Iron(level) => Some(*level),
            Block::Door(door) => Some(door.level),
            _ => None,
        }
    }

    /// Door state, for door halves.
    pub fn door_state(&self) -> Option<DoorState> {
        match &self.block {
            Block::Door(door) => Some(*door),
            _ => None,
        }
    }

    /// Copy of this cell with its oxidation level replaced. Cells without a
    /// level are returned unchanged.
    pub fn with_level(&self, level: MaterialLevel) -> Self {
        let block = match &self.block {
            Block::Iron(_) => Block::Iron(level),
            Block::Door(door) => Block::Door(DoorState { level, ..*door }),
            other => other.clone(),
        };
        Self {
            block,
            fluid: self.fluid.clone(),
        }
    }
}
