use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::PathResult;
use crate::env::{CityOracle, MapOracle, OracleError};
use crate::movement::{Direction, MoveCost, MovementProfile, TerrainCostModel, diagonal_cost};
use crate::state::Position;

#[derive(Debug)]
struct OpenNode {
    f: u32,
    h: u32,
    g: u32,
    index: usize,
    tie: u64,
}

impl OpenNode {
    // Lowest f first, then lowest h, then insertion order.
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.h, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest key.
        other.key().cmp(&self.key())
    }
}

/// A* search over the 8-connected tile grid.
///
/// The finder borrows the terrain provider for the duration of a search and
/// never mutates it, so searches for different units may run concurrently.
pub struct PathFinder<'a> {
    costs: &'a TerrainCostModel,
    map: &'a dyn MapOracle,
    cities: Option<&'a dyn CityOracle>,
}

impl<'a> PathFinder<'a> {
    pub fn new(costs: &'a TerrainCostModel, map: &'a dyn MapOracle) -> Self {
        Self {
            costs,
            map,
            cities: None,
        }
    }

    /// Refuses routes through cities owned by other players.
    pub fn with_cities(mut self, cities: Option<&'a dyn CityOracle>) -> Self {
        self.cities = cities;
        self
    }

    /// Finds the cheapest route from `start` to `goal`.
    ///
    /// Never fails: provider errors, unreachable goals and exhausted searches
    /// all produce [`PathResult::invalid`].
    pub fn find_path(
        &self,
        start: Position,
        goal: Position,
        profile: &MovementProfile,
    ) -> PathResult {
        self.try_find_path(start, goal, profile)
            .unwrap_or_else(|_| PathResult::invalid())
    }

    /// Like [`find_path`](Self::find_path) but surfaces provider failures.
    pub fn try_find_path(
        &self,
        start: Position,
        goal: Position,
        profile: &MovementProfile,
    ) -> Result<PathResult, OracleError> {
        let dims = self.map.dimensions();
        if !dims.contains(start) || !dims.contains(goal) {
            return Ok(PathResult::invalid());
        }
        if start == goal {
            return Ok(PathResult::single(start));
        }

        let width = dims.width as usize;
        let area = dims.area();
        let index_of = |pos: Position| pos.y as usize * width + pos.x as usize;
        let position_of = |index: usize| Position::new((index % width) as i32, (index / width) as i32);

        let start_idx = index_of(start);
        let goal_idx = index_of(goal);

        let min_step = self.costs.min_step_cost(profile);
        let heuristic = |pos: Position| octile(pos, goal, min_step);

        let mut g_score = vec![u32::MAX; area];
        let mut came_from: Vec<Option<usize>> = vec![None; area];
        let mut closed = vec![false; area];
        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;

        g_score[start_idx] = 0;
        let h0 = heuristic(start);
        open.push(OpenNode {
            f: h0,
            h: h0,
            g: 0,
            index: start_idx,
            tie,
        });
        tie += 1;

        let mut expansions = 0usize;
        while let Some(node) = open.pop() {
            if node.g != g_score[node.index] || closed[node.index] {
                // Stale heap entry.
                continue;
            }
            if node.index == goal_idx {
                let steps = reconstruct(&came_from, &g_score, goal_idx, position_of);
                return Ok(PathResult::from_steps(&steps, profile.move_rate_frags));
            }

            expansions += 1;
            if expansions > area {
                break;
            }
            closed[node.index] = true;

            let current = position_of(node.index);
            for direction in Direction::ALL {
                let next = direction.step(current);
                if !dims.contains(next) {
                    continue;
                }
                let next_idx = index_of(next);
                if closed[next_idx] {
                    continue;
                }
                let Some(step) = self.step_cost(next, profile, direction.is_diagonal())? else {
                    continue;
                };

                let tentative_g = node.g.saturating_add(step);
                if tentative_g >= g_score[next_idx] {
                    continue;
                }

                came_from[next_idx] = Some(node.index);
                g_score[next_idx] = tentative_g;
                let h = heuristic(next);
                open.push(OpenNode {
                    f: tentative_g.saturating_add(h),
                    h,
                    g: tentative_g,
                    index: next_idx,
                    tie,
                });
                tie += 1;
            }
        }

        Ok(PathResult::invalid())
    }

    /// Fragment cost of entering `position`, or `None` when it must not be
    /// expanded (impassable, unknown terrain, or a foreign city).
    fn step_cost(
        &self,
        position: Position,
        profile: &MovementProfile,
        diagonal: bool,
    ) -> Result<Option<u32>, OracleError> {
        let Some(terrain) = self.map.terrain(position)? else {
            return Ok(None);
        };
        if self
            .cities
            .is_some_and(|cities| cities.is_enemy_city(position, profile.owner))
        {
            return Ok(None);
        }
        Ok(match self.costs.step_cost(terrain, profile, diagonal) {
            MoveCost::Fragments(cost) => Some(cost),
            MoveCost::Impassable => None,
        })
    }
}

/// Octile distance scaled by the cheapest step, so it never overestimates.
fn octile(from: Position, to: Position, min_step: u32) -> u32 {
    let dx = (from.x - to.x).unsigned_abs();
    let dy = (from.y - to.y).unsigned_abs();
    let diagonal = dx.min(dy);
    let straight = dx.max(dy) - diagonal;
    straight
        .saturating_mul(min_step)
        .saturating_add(diagonal.saturating_mul(diagonal_cost(min_step)))
}

fn reconstruct(
    came_from: &[Option<usize>],
    g_score: &[u32],
    goal: usize,
    position_of: impl Fn(usize) -> Position,
) -> Vec<(Position, u32)> {
    let mut steps = Vec::new();
    let mut cursor = Some(goal);
    while let Some(index) = cursor {
        let parent = came_from[index];
        let entry_cost = parent.map_or(0, |p| g_score[index] - g_score[p]);
        steps.push((position_of(index), entry_cost));
        cursor = parent;
    }
    steps.reverse();
    steps
}
