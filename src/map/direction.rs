use glam::IVec2;
use strum_macros::{AsRefStr, EnumIter};

/// The four cardinal directions on the tile grid. Rows grow downward, so `Up` decreases the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The four cardinal directions, in the order edges are enumerated.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Returns the opposite direction. Constant time.
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Returns the unit step of this direction in (column, row) space.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Returns the direction as a usize (0-3), for indexing into per-direction arrays.
    pub const fn as_usize(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
        }
    }
}
