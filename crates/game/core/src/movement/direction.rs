use crate::state::Position;

/// Eight-way direction code, clockwise from north.
///
/// Serialized as the numeric code, 0 = north through 7 = north-west.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Grid offset of one step; `y` grows southward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        (self as u8) % 2 == 1
    }

    /// Direction of a single step from `from` to `to`, if they are adjacent.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let delta = (to.x - from.x, to.y - from.y);
        Self::ALL.into_iter().find(|dir| dir.delta() == delta)
    }

    pub fn step(self, from: Position) -> Position {
        let (dx, dy) = self.delta();
        from.offset(dx, dy)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.code()
    }
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("invalid direction code {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_run_clockwise_from_north() {
        let origin = Position::new(5, 5);
        assert_eq!(Direction::North.step(origin), Position::new(5, 4));
        assert_eq!(Direction::East.step(origin), Position::new(6, 5));
        assert_eq!(Direction::NorthWest.code(), 7);
        for (code, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.code() as usize, code);
            assert_eq!(Direction::between(origin, dir.step(origin)), Some(*dir));
        }
    }

    #[test]
    fn codes_convert_both_ways() {
        assert_eq!(Direction::try_from(5), Ok(Direction::SouthWest));
        assert_eq!(u8::from(Direction::East), 2);
        assert!(Direction::try_from(8).is_err());
        assert_eq!(Direction::from_code(0), Some(Direction::North));
    }

    #[test]
    fn non_adjacent_has_no_direction() {
        assert_eq!(
            Direction::between(Position::new(0, 0), Position::new(2, 0)),
            None
        );
        assert_eq!(
            Direction::between(Position::new(0, 0), Position::new(0, 0)),
            None
        );
    }
}
