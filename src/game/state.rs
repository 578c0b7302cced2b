use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::GameError;
use super::food::FoodKind;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Bounds of the playing field, `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every cell of the grid in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// The ring of cells lying one step outside the grid on every side
    pub fn border_ring(&self) -> impl Iterator<Item = Position> + '_ {
        let (w, h) = (self.width as i32, self.height as i32);
        let rows = (-1..=w).flat_map(move |x| [Position::new(x, -1), Position::new(x, h)]);
        let cols = (-1..=h).flat_map(move |y| [Position::new(-1, y), Position::new(w, y)]);
        rows.chain(cols)
    }
}

/// Seat a snake occupies in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
    Computer,
}

impl Player {
    /// Whether turn requests from the keyboard may steer this seat
    pub fn is_human(&self) -> bool {
        !matches!(self, Player::Computer)
    }
}

/// Which kind of round is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Single,
    TwoPlayer,
    VersusAi,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Single, GameMode::TwoPlayer, GameMode::VersusAi];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Single => "single",
            GameMode::TwoPlayer => "two-player",
            GameMode::VersusAi => "vs-ai",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "solo" => Ok(GameMode::Single),
            "two-player" | "two_player" | "multi" => Ok(GameMode::TwoPlayer),
            "vs-ai" | "vs_ai" | "ai" => Ok(GameMode::VersusAi),
            _ => Err(GameError::UnknownMode(s.to_string())),
        }
    }
}

/// Immutable copy of one snake, taken once per tick and handed to the
/// computer pilots, the collision resolver and the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeView {
    pub player: Player,
    pub body: Vec<Position>,
    pub direction: Direction,
    pub length: usize,
    pub score: u32,
    pub alive: bool,
    pub death_time: Option<Duration>,
}

impl SnakeView {
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body cells without the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }
}

/// Read-only view of a food item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodView {
    pub position: Position,
    pub kind: FoodKind,
    /// Remaining lifetime normalised to `[0, 1]`
    pub remaining: f32,
}

/// Everything an external renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub mode: GameMode,
    pub grid: Grid,
    pub active: bool,
    pub paused: bool,
    pub winner_message: String,
    pub ticks: u64,
    pub snakes: Vec<SnakeView>,
    pub foods: Vec<FoodView>,
}

impl RoundSnapshot {
    pub fn snake_at(&self, pos: Position) -> Option<(&SnakeView, bool)> {
        self.snakes.iter().find_map(|snake| {
            snake
                .body
                .iter()
                .position(|&cell| cell == pos)
                .map(|idx| (snake, idx == 0))
        })
    }

    pub fn food_at(&self, pos: Position) -> Option<&FoodView> {
        self.foods.iter().find(|food| food.position == pos)
    }
}
