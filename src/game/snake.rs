use std::sync::Arc;
use std::time::Duration;

use super::action::Direction;
use super::ai::Steerable;
use super::state::{Grid, Player, Position, SnakeView};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake ran its head into another snake's body
    Body,
    /// Snake lost (or tied) a head-to-head collision
    HeadOn,
}

/// Result of asking a snake to take one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked(CollisionType),
    /// The snake is already dead and stays where it is
    Dead,
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// A snake in the round
#[derive(Debug, Clone)]
pub struct Snake {
    pub player: Player,
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Target length; the body catches up over the next moves when growing
    pub length: usize,
    pub score: u32,
    pub is_dead: bool,
    /// Simulation time of death, recorded once
    pub death_time: Option<Duration>,
    pilot: Option<Arc<dyn Steerable>>,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(player: Player, head: Position, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            player,
            body,
            direction,
            length,
            score: 0,
            is_dead: false,
            death_time: None,
            pilot: None,
        }
    }

    /// Attach a pilot that chooses this snake's heading every tick
    pub fn with_pilot(mut self, pilot: Arc<dyn Steerable>) -> Self {
        self.pilot = Some(pilot);
        self
    }

    pub fn pilot(&self) -> Option<&Arc<dyn Steerable>> {
        self.pilot.as_ref()
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Get the current number of body cells
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Change heading. A reversal straight into the neck is ignored while the
    /// body is longer than one cell; dead snakes keep their final heading.
    pub fn turn(&mut self, direction: Direction) {
        if self.is_dead {
            return;
        }
        if self.body.len() > 1 && self.direction.is_opposite(direction) {
            return;
        }
        self.direction = direction;
    }

    /// Where the head would land on the next move
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Why moving the head to `next` would fail, if it would
    fn blocked_by(&self, next: Position, grid: Grid) -> Option<CollisionType> {
        if !grid.contains(next) {
            return Some(CollisionType::Wall);
        }

        // The tail cell vacates this step, except for snakes of one or two
        // cells where no gap opens.
        if self.body.contains(&next) && (next != self.tail() || self.body.len() <= 2) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Advance one cell in the current direction. A blocked move leaves the
    /// body untouched; the caller decides whether the snake dies.
    pub fn try_move(&mut self, grid: Grid) -> MoveOutcome {
        if self.is_dead {
            return MoveOutcome::Dead;
        }

        let new_head = self.next_head();
        if let Some(collision) = self.blocked_by(new_head, grid) {
            return MoveOutcome::Blocked(collision);
        }

        self.body.insert(0, new_head);
        if self.body.len() > self.length {
            self.body.pop();
        }
        MoveOutcome::Moved
    }

    /// Apply a food's score delta. Positive deltas raise the target length
    /// and the body grows over the following moves; negative deltas shrink
    /// the body at once, never below a single cell. The score floors at 0.
    pub fn grow(&mut self, delta: i32) {
        if self.is_dead {
            return;
        }

        let amount = delta.unsigned_abs();
        if delta >= 0 {
            self.score = self.score.saturating_add(amount);
            self.length += amount as usize;
        } else {
            self.score = self.score.saturating_sub(amount);
            let reduction = (amount as usize).min(self.length - 1);
            self.length -= reduction;
            self.body.truncate(self.length);
        }
    }

    /// Mark the snake dead; only the first call records the time
    pub fn die(&mut self, now: Duration) {
        if !self.is_dead {
            self.is_dead = true;
            self.death_time = Some(now);
        }
    }

    /// Copy of the snake's current state
    pub fn view(&self) -> SnakeView {
        SnakeView {
            player: self.player,
            body: self.body.clone(),
            direction: self.direction,
            length: self.length,
            score: self.score,
            alive: !self.is_dead,
            death_time: self.death_time,
        }
    }
}
