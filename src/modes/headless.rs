use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::game::{Game, GameEvent, GameMode, RoundSnapshot};

/// Runs a single round with no terminal and no human input.
///
/// Human seats keep their starting heading, so this is mostly useful for
/// watching the computer pilot and for smoke-testing a config file.
pub struct HeadlessMode {
    game: Game,
    mode: GameMode,
    max_ticks: u64,
}

impl HeadlessMode {
    pub fn new(game: Game, mode: GameMode, max_ticks: u64) -> Self {
        Self {
            game,
            mode,
            max_ticks,
        }
    }

    /// Play until the round ends or the tick limit is hit
    pub fn run(&mut self) -> Result<RoundSnapshot> {
        self.game
            .reset(self.mode)
            .with_context(|| format!("Failed to start a {} round", self.mode))?;

        while self.game.is_active() && self.game.ticks() < self.max_ticks {
            let events = self.game.tick().context("Failed to advance the round")?;
            for event in &events {
                log_event(event);
            }
        }

        if self.game.is_active() {
            info!(ticks = self.game.ticks(), "tick limit reached");
        }

        Ok(self.game.snapshot())
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::RoundEnded { message, .. } => info!(%message, "round over"),
        other => debug!(?other, "event"),
    }
}
