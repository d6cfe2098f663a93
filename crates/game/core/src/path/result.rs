use crate::movement::Direction;
use crate::state::Position;

/// One tile of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTile {
    pub position: Position,
    /// Fragments spent to enter this tile; zero for the start tile.
    pub cost: u32,
    /// Direction toward the next tile; `None` on the last tile.
    pub direction: Option<Direction>,
}

/// Outcome of a route search.
///
/// An invalid result always has no tiles and zero costs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub tiles: Vec<PathTile>,
    pub total_cost: u32,
    pub estimated_turns: u32,
    pub valid: bool,
}

impl PathResult {
    pub fn invalid() -> Self {
        Self {
            tiles: Vec::new(),
            total_cost: 0,
            estimated_turns: 0,
            valid: false,
        }
    }

    /// Route that starts and ends on `position`.
    pub fn single(position: Position) -> Self {
        Self {
            tiles: vec![PathTile {
                position,
                cost: 0,
                direction: None,
            }],
            total_cost: 0,
            estimated_turns: 0,
            valid: true,
        }
    }

    /// Builds a valid result from the visited positions and their entry costs.
    ///
    /// `steps[0]` is the start tile and its cost is ignored.
    pub(crate) fn from_steps(steps: &[(Position, u32)], move_rate_frags: u32) -> Self {
        let mut tiles = Vec::with_capacity(steps.len());
        let mut total_cost = 0u32;
        for (index, &(position, cost)) in steps.iter().enumerate() {
            let cost = if index == 0 { 0 } else { cost };
            total_cost = total_cost.saturating_add(cost);
            let direction = steps
                .get(index + 1)
                .and_then(|&(next, _)| Direction::between(position, next));
            tiles.push(PathTile {
                position,
                cost,
                direction,
            });
        }
        Self {
            tiles,
            total_cost,
            estimated_turns: estimated_turns(total_cost, move_rate_frags),
            valid: true,
        }
    }

    /// First tile after the start, if the route leaves the start tile.
    pub fn first_step(&self) -> Option<&PathTile> {
        self.tiles.get(1)
    }

    pub fn destination(&self) -> Option<Position> {
        self.tiles.last().map(|tile| tile.position)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// `ceil(total / rate)` with the rate clamped to at least one fragment.
pub(crate) fn estimated_turns(total_cost: u32, move_rate_frags: u32) -> u32 {
    total_cost.div_ceil(move_rate_frags.max(1))
}
