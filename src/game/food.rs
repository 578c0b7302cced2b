use std::collections::HashSet;
use std::time::Duration;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::{FoodSpec, GameConfig};
use super::error::GameError;
use super::state::{FoodView, Grid, Position};

/// Kinds of food that can appear on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    /// Plain food, the common case
    Normal,
    /// Rare food worth several points
    Bonus,
    /// Poison: lowers the score and shrinks the snake
    Hazard,
}

/// A food item placed on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    /// Score delta applied to the snake that eats it
    pub score: i32,
    /// Simulation time at which the item was placed
    pub created_at: Duration,
}

impl Food {
    pub fn new(position: Position, spec: &FoodSpec, created_at: Duration) -> Self {
        Self {
            position,
            kind: spec.kind,
            score: spec.score,
            created_at,
        }
    }

    /// True once `timeout` has elapsed since the item was placed
    pub fn is_timed_out(&self, now: Duration, timeout: Duration) -> bool {
        now.saturating_sub(self.created_at) >= timeout
    }

    /// Fraction of the lifetime left, 1.0 when fresh and 0.0 when expired
    pub fn remaining_fraction(&self, now: Duration, timeout: Duration) -> f32 {
        if timeout.is_zero() {
            return 0.0;
        }
        let elapsed = now.saturating_sub(self.created_at);
        (1.0 - elapsed.as_secs_f32() / timeout.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn view(&self, now: Duration, timeout: Duration) -> FoodView {
        FoodView {
            position: self.position,
            kind: self.kind,
            remaining: self.remaining_fraction(now, timeout),
        }
    }
}

/// Picks food kinds by weight and places them on free cells
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    grid: Grid,
    table: Vec<FoodSpec>,
    weights: WeightedIndex<f64>,
    max_attempts: usize,
}

impl FoodSpawner {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let weights = WeightedIndex::new(config.food_table.iter().map(|spec| spec.weight))
            .map_err(|err| GameError::InvalidConfig(format!("food_table weights: {err}")))?;

        Ok(Self {
            grid: config.grid(),
            table: config.food_table.clone(),
            weights,
            max_attempts: config.max_spawn_attempts,
        })
    }

    /// Draw a food kind from the weighted table
    pub fn choose_spec<R: Rng + ?Sized>(&self, rng: &mut R) -> &FoodSpec {
        &self.table[self.weights.sample(rng)]
    }

    /// Create one food item on a cell not contained in `occupied`.
    ///
    /// Random cells are tried first; once the attempt budget is spent the
    /// free cells are enumerated so a nearly full grid still gets a uniform
    /// pick, and a completely full grid is reported as an error.
    pub fn spawn_one<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Position>,
        now: Duration,
        rng: &mut R,
    ) -> Result<Food, GameError> {
        let spec = self.choose_spec(rng).clone();
        let position = self.free_cell(occupied, rng)?;
        debug!(?position, kind = ?spec.kind, "food spawned");
        Ok(Food::new(position, &spec, now))
    }

    /// Spawn until `foods` holds `cap` items, marking each new cell occupied
    pub fn fill_to<R: Rng + ?Sized>(
        &self,
        foods: &mut Vec<Food>,
        occupied: &mut HashSet<Position>,
        cap: usize,
        now: Duration,
        rng: &mut R,
    ) -> Result<(), GameError> {
        while foods.len() < cap {
            let food = self.spawn_one(occupied, now, rng)?;
            occupied.insert(food.position);
            foods.push(food);
        }
        Ok(())
    }

    fn free_cell<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        for _ in 0..self.max_attempts {
            let pos = Position::new(
                rng.gen_range(0..self.grid.width) as i32,
                rng.gen_range(0..self.grid.height) as i32,
            );
            if !occupied.contains(&pos) {
                return Ok(pos);
            }
        }

        warn!(
            attempts = self.max_attempts,
            occupied = occupied.len(),
            "random food placement exhausted, scanning for free cells"
        );

        self.grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(rng)
            .ok_or(GameError::NoFreeCell {
                width: self.grid.width,
                height: self.grid.height,
            })
    }
}
