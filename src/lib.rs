//! Snake Arena - a grid snake game for one player, two players, or a player
//! against a computer-driven snake
//!
//! This library provides:
//! - Core rules engine: snakes, food, collisions and rounds (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - Execution modes: interactive terminal and headless (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
