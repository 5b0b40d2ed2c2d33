use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six axis-aligned unit offsets between neighboring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Negative Y.
    Down,
    /// Positive Y.
    Up,
    /// Negative Z.
    North,
    /// Positive Z.
    South,
    /// Negative X.
    West,
    /// Positive X.
    East,
}

impl Direction {
    /// All six directions, vertical first.
    pub const ALL: [Direction; 6] = [
        Self::Down,
        Self::Up,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    /// The four directions in the horizontal plane.
    pub const HORIZONTAL: [Direction; 4] = [Self::North, Self::South, Self::West, Self::East];

    /// Unit offset `(dx, dy, dz)` of this direction.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }

}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        };
        write!(f, "{name}")
    }
}

/// Integer coordinate of a grid cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// The origin cell.
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighboring cell one step in `direction`.
    pub fn relative(self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        self.offset(dx, dy, dz)
    }

    /// Translate by an arbitrary offset. Coordinates wrap at the `i32`
    /// bounds, so the grid is a torus and every cell has six neighbors.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// The cell directly above.
    pub fn above(self) -> Self {
        self.relative(Direction::Up)
    }

    /// The cell directly below.
    pub fn below(self) -> Self {
        self.relative(Direction::Down)
    }

    /// All six face neighbors paired with the direction leading to them.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, BlockPos)> {
        Direction::ALL.into_iter().map(move |d| (d, self.relative(d)))
    }

    /// Every cell whose offset from `self` is at most `radius` on each axis,
    /// the center included.
    pub fn within_cube(self, radius: i32) -> impl Iterator<Item = BlockPos> {
        let radius = radius.max(0);
        (-radius..=radius).flat_map(move |dx| {
            (-radius..=radius).flat_map(move |dy| {
                (-radius..=radius).map(move |dz| self.offset(dx, dy, dz))
            })
        })
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_moves_one_step() {
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(pos.relative(Direction::Up), BlockPos::new(1, 3, 3));
        assert_eq!(pos.relative(Direction::North), BlockPos::new(1, 2, 2));
        assert_eq!(pos.relative(Direction::East), BlockPos::new(2, 2, 3));
        assert_eq!(pos.above().below(), pos);
    }

    #[test]
    fn neighbors_are_one_step_away() {
        let pos = BlockPos::new(-4, 10, 7);
        let neighbors: Vec<_> = pos.neighbors().collect();
        assert_eq!(neighbors.len(), 6);
        for (d, n) in neighbors {
            let (dx, dy, dz) = d.offset();
            assert_eq!((n.x - pos.x, n.y - pos.y, n.z - pos.z), (dx, dy, dz));
        }
    }

    #[test]
    fn offsets_wrap_at_coordinate_bounds() {
        let edge = BlockPos::new(i32::MAX, i32::MIN, i32::MAX);
        assert_eq!(edge.relative(Direction::East).x, i32::MIN);
        assert_eq!(edge.below().y, i32::MAX);
        assert_eq!(edge.relative(Direction::South).z, i32::MIN);
        assert_eq!(edge.within_cube(2).count(), 125);
        assert_eq!(edge.neighbors().count(), 6);
    }

    #[test]
    fn within_cube_covers_125_cells_at_radius_two() {
        let cells: Vec<_> = BlockPos::ORIGIN.within_cube(2).collect();
        assert_eq!(cells.len(), 125);
        assert!(cells.contains(&BlockPos::ORIGIN));
        assert!(cells.contains(&BlockPos::new(2, -2, 2)));
        assert!(!cells.contains(&BlockPos::new(3, 0, 0)));
    }

    #[test]
    fn display_formats() {
        assert_eq!(BlockPos::new(1, -2, 3).to_string(), "(1, -2, 3)");
        assert_eq!(Direction::West.to_string(), "west");
    }
}
