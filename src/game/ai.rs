//! Computer-controlled steering.
//!
//! A snake that carries a [`Steerable`] pilot gets its heading recomputed at
//! the start of every tick, before anything moves. Human seats have no pilot
//! and are steered by turn requests instead.

use std::collections::HashSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::RngCore;

use super::action::Direction;
use super::food::{Food, FoodKind};
use super::state::{Grid, Position, SnakeView};

/// Capability of choosing a snake's own heading
pub trait Steerable: fmt::Debug + Send + Sync {
    /// Pick the heading for `me` given the pre-tick state of the board.
    /// `snakes` includes `me`.
    fn decide_direction(
        &self,
        me: &SnakeView,
        foods: &[Food],
        snakes: &[SnakeView],
        grid: Grid,
        rng: &mut dyn RngCore,
    ) -> Direction;
}

/// Heads for the nearest edible food, one step at a time, avoiding walls
/// and bodies on the very next cell only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPilot;

impl GreedyPilot {
    pub fn new() -> Self {
        Self
    }

    /// Nearest food by Manhattan distance, preferring anything that is not
    /// poison. Ties go to the earliest item in the list.
    fn target<'a>(head: Position, foods: &'a [Food]) -> Option<&'a Food> {
        let edible: Vec<&Food> = foods
            .iter()
            .filter(|food| food.kind != FoodKind::Hazard)
            .collect();
        let candidates = if edible.is_empty() {
            foods.iter().collect()
        } else {
            edible
        };

        let mut best: Option<&Food> = None;
        for food in candidates {
            let closer = best
                .map(|b| head.manhattan(food.position) < head.manhattan(b.position))
                .unwrap_or(true);
            if closer {
                best = Some(food);
            }
        }
        best
    }

    /// Walls (the ring just outside the grid) plus every snake body; for the
    /// deciding snake its own head is left out.
    fn obstacles(me: &SnakeView, snakes: &[SnakeView], grid: Grid) -> HashSet<Position> {
        let mut obstacles: HashSet<Position> = grid.border_ring().collect();
        for snake in snakes {
            if snake.player == me.player {
                obstacles.extend(snake.body_segments().iter().copied());
            } else {
                obstacles.extend(snake.body.iter().copied());
            }
        }
        obstacles
    }

    /// Moves allowed from the current heading; reversing is only possible
    /// for a snake of length one.
    fn candidate_moves(me: &SnakeView) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| me.length <= 1 || !me.direction.is_opposite(dir))
            .collect()
    }
}

impl Steerable for GreedyPilot {
    fn decide_direction(
        &self,
        me: &SnakeView,
        foods: &[Food],
        snakes: &[SnakeView],
        grid: Grid,
        rng: &mut dyn RngCore,
    ) -> Direction {
        let head = me.head();
        let Some(target) = Self::target(head, foods) else {
            return me.direction;
        };

        let obstacles = Self::obstacles(me, snakes, grid);
        let is_free = |dir: &Direction| !obstacles.contains(&head.moved_in_direction(*dir));

        let mut ranked = Self::candidate_moves(me);
        ranked.sort_by_key(|dir| head.moved_in_direction(*dir).manhattan(target.position));
        if let Some(dir) = ranked.into_iter().find(is_free) {
            return dir;
        }

        let mut fallback = Self::candidate_moves(me);
        fallback.shuffle(rng);
        fallback.into_iter().find(is_free).unwrap_or(me.direction)
    }
}
