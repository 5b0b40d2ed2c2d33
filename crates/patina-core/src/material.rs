//! Ordered oxidation levels for weathering-capable cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Oxidation stage of a weatherable cell.
///
/// Declaration order is the aging order, so the derived `Ord` gives
/// `Unaffected < Exposed < Weathered < Rusted`. Levels only ever move
/// forward through [`MaterialLevel::next`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MaterialLevel {
    /// Clean metal.
    #[default]
    Unaffected,
    /// First visible oxidation.
    Exposed,
    /// Heavily oxidized.
    Weathered,
    /// Fully rusted; terminal.
    Rusted,
}

impl MaterialLevel {
    /// Every level in aging order.
    pub const ALL: [MaterialLevel; 4] = [
        Self::Unaffected,
        Self::Exposed,
        Self::Weathered,
        Self::Rusted,
    ];

    /// Returns true for the last level, which never advances.
    pub fn is_terminal(self) -> bool {
        self == Self::Rusted
    }

    /// The following level, or `None` at the terminal level.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Unaffected => Some(Self::Exposed),
            Self::Exposed => Some(Self::Weathered),
            Self::Weathered => Some(Self::Rusted),
            Self::Rusted => None,
        }
    }

    /// The later of `self` and `other`. Used when merging two observations
    /// of the same cell so that a write can never move a level backwards.
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for MaterialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unaffected => "unaffected",
            Self::Exposed => "exposed",
            Self::Weathered => "weathered",
            Self::Rusted => "rusted",
        };
        write!(f, "{name}")
    }
}
