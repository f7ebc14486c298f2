use crate::constants::*;
use serde::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Position {
    packed: u16,
}

impl Position {
    pub fn new(x: u8, y: u8) -> Self {
        Position {
            packed: ((x as u16) << 8) | y as u16,
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    /// Offset by `(dx, dy)`, returning `None` if the result leaves the arena.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Position> {
        let x = self.x() as i16 + dx as i16;
        let y = self.y() as i16 + dy as i16;
        if in_arena_bounds(x, y) {
            Some(Position::new(x as u8, y as u8))
        } else {
            None
        }
    }

    pub fn in_arena(self) -> bool {
        in_arena_bounds(self.x() as i16, self.y() as i16)
    }

    pub fn manhattan_distance(self, other: Self) -> u32 {
        let dx = (self.x() as i32 - other.x() as i32).unsigned_abs();
        let dy = (self.y() as i32 - other.y() as i32).unsigned_abs();
        dx + dy
    }

    pub fn euclidean_distance(self, other: Self) -> f64 {
        let dx = self.x() as f64 - other.x() as f64;
        let dy = self.y() as f64 - other.y() as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The half of the arena a deployment at this position is grouped with.
    pub fn side(self) -> Side {
        if self.x() <= LEFT_SIDE_MAX_X {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl From<(u8, u8)> for Position {
    fn from((x, y): (u8, u8)) -> Self {
        Position::new(x, y)
    }
}

/// Positions travel over the wire as `[x, y]`.
impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x(), self.y()].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[u8; 2]>::deserialize(deserializer).map(|[x, y]| Position::new(x, y))
    }
}

/// Left or right half of the arena. Each side commits to a single transient
/// wall configuration per turn.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}
