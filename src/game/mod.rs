//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A front end calls [`Game::tick`] once per frame, feeds turn requests in between,
//! and draws from [`Game::snapshot`].

pub mod action;
pub mod ai;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Turn};
pub use ai::{GreedyPilot, Steerable};
pub use config::{FoodSpec, GameConfig, PlayerLabels};
pub use engine::{Game, GameEvent, RoundOutcome};
pub use error::GameError;
pub use food::{Food, FoodKind, FoodSpawner};
pub use snake::{CollisionType, MoveOutcome, Snake};
pub use state::{FoodView, GameMode, Grid, Player, Position, RoundSnapshot, SnakeView};
