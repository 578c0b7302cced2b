use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::game::{GameEvent, RoundOutcome};

/// Running totals for one interactive session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
    pub draws: u32,
    pub food_eaten: u32,
    /// Wins keyed by the winner's display label
    pub wins: BTreeMap<String, u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
            draws: 0,
            food_eaten: 0,
            wins: BTreeMap::new(),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Count food pickups from a tick's events
    pub fn observe(&mut self, events: &[GameEvent]) {
        let eaten = events
            .iter()
            .filter(|event| matches!(event, GameEvent::FoodEaten { .. }))
            .count();
        self.food_eaten += eaten as u32;
    }

    /// Record a finished round; `winner` is the winner's label, if any
    pub fn on_round_end(&mut self, outcome: RoundOutcome, winner: Option<&str>, best_score: u32) {
        self.rounds_played += 1;
        self.high_score = self.high_score.max(best_score);

        match (outcome, winner) {
            (RoundOutcome::Draw, _) => self.draws += 1,
            (RoundOutcome::Winner(_), Some(label)) => {
                *self.wins.entry(label.to_string()).or_default() += 1;
            }
            _ => {}
        }
    }

    pub fn wins_for(&self, label: &str) -> u32 {
        self.wins.get(label).copied().unwrap_or_default()
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
