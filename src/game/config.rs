use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::GameError;
use super::food::FoodKind;
use super::state::{GameMode, Grid, Player, Position};

/// Score delta and spawn weight for one kind of food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSpec {
    pub kind: FoodKind,
    /// Added to the eater's score (negative values shrink the snake)
    pub score: i32,
    /// Relative spawn weight
    pub weight: f64,
}

impl FoodSpec {
    pub fn new(kind: FoodKind, score: i32, weight: f64) -> Self {
        Self {
            kind,
            score,
            weight,
        }
    }
}

/// Names used when announcing scores and winners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerLabels {
    pub player_one: String,
    pub player_two: String,
    /// The human seat in a player-vs-computer round
    pub human: String,
    pub computer: String,
    /// Score label for the lone snake of a single-player round
    pub solo: String,
    pub draw: String,
    pub game_over: String,
}

impl Default for PlayerLabels {
    fn default() -> Self {
        Self {
            player_one: "player 1".to_string(),
            player_two: "player 2".to_string(),
            human: "player".to_string(),
            computer: "computer".to_string(),
            solo: "score".to_string(),
            draw: "draw".to_string(),
            game_over: "Game Over".to_string(),
        }
    }
}

/// Configuration for the game
///
/// Built once at startup and handed to the round controller and the food
/// spawner; nothing reads settings from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of every snake
    pub initial_snake_length: usize,
    /// Simulation steps per real-time second
    pub ticks_per_second: u32,
    /// How long a food item stays on the board, in simulated milliseconds
    pub food_timeout_ms: u64,
    /// Food cap for single-player rounds
    pub max_food_single: usize,
    /// Food cap for two-player and player-vs-computer rounds
    pub max_food_multi: usize,
    /// Random placement attempts before falling back to a full free-cell scan
    pub max_spawn_attempts: usize,
    pub food_table: Vec<FoodSpec>,
    pub labels: PlayerLabels,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 1,
            ticks_per_second: 10,
            food_timeout_ms: 10_000,
            max_food_single: 2,
            max_food_multi: 5,
            max_spawn_attempts: 1_000,
            food_table: vec![
                FoodSpec::new(FoodKind::Normal, 1, 0.90),
                FoodSpec::new(FoodKind::Bonus, 5, 0.03),
                FoodSpec::new(FoodKind::Hazard, -3, 0.07),
            ],
            labels: PlayerLabels::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Simulated time covered by one tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.ticks_per_second.max(1)))
    }

    pub fn food_timeout(&self) -> Duration {
        Duration::from_millis(self.food_timeout_ms)
    }

    /// Number of food items kept on the board in the given mode
    pub fn food_cap(&self, mode: GameMode) -> usize {
        match mode {
            GameMode::Single => self.max_food_single,
            GameMode::TwoPlayer | GameMode::VersusAi => self.max_food_multi,
        }
    }

    /// Starting cell and heading for a seat: the first seat starts a quarter
    /// of the way in facing right, the second three quarters in facing left.
    pub fn start_for(&self, player: Player) -> (Position, Direction) {
        let mid_y = (self.grid_height / 2) as i32;
        match player {
            Player::One => (
                Position::new((self.grid_width / 4) as i32, mid_y),
                Direction::Right,
            ),
            Player::Two | Player::Computer => (
                Position::new((self.grid_width * 3 / 4) as i32, mid_y),
                Direction::Left,
            ),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.grid_width < 4 || self.grid_height < 4 {
            return invalid(format!(
                "grid must be at least 4x4, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return invalid("initial_snake_length must be at least 1".to_string());
        }

        let tail_room = self.initial_snake_length - 1;
        if tail_room > self.grid_width / 4 || self.grid_width * 3 / 4 + tail_room >= self.grid_width
        {
            return invalid(format!(
                "initial_snake_length {} does not fit on a grid {} cells wide",
                self.initial_snake_length, self.grid_width
            ));
        }

        if self.ticks_per_second == 0 || self.ticks_per_second > 1000 {
            return invalid(format!(
                "ticks_per_second must be in [1, 1000], got {}",
                self.ticks_per_second
            ));
        }

        if self.food_timeout_ms == 0 {
            return invalid("food_timeout_ms must be positive".to_string());
        }

        if self.max_food_single == 0 || self.max_food_multi == 0 {
            return invalid("food caps must be at least 1".to_string());
        }

        if self.max_spawn_attempts == 0 {
            return invalid("max_spawn_attempts must be at least 1".to_string());
        }

        if self.food_table.is_empty() {
            return invalid("food_table must list at least one food kind".to_string());
        }

        if let Some(spec) = self
            .food_table
            .iter()
            .find(|spec| !spec.weight.is_finite() || spec.weight < 0.0)
        {
            return invalid(format!(
                "weight for {:?} must be a non-negative number, got {}",
                spec.kind, spec.weight
            ));
        }

        let total: f64 = self.food_table.iter().map(|spec| spec.weight).sum();
        if total <= 0.0 {
            return invalid("food_table weights must sum to a positive value".to_string());
        }

        Ok(())
    }
}
