use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Game, GameEvent, GameMode, RoundOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Screen};

/// Real-time delay between choosing a mode and the first tick
const COUNTDOWN: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Menu,
    Countdown { until: Instant },
    Playing,
}

/// Interactive terminal session: menu, countdown, then rounds until quit
pub struct HumanMode {
    game: Game,
    phase: Phase,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            phase: Phase::Menu,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Skip the menu and go straight to a countdown for `mode`
    pub fn starting_in(mut self, mode: GameMode) -> Result<Self> {
        self.start_round(mode)?;
        Ok(self)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.game.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let screen = self.screen();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, screen, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn screen(&self) -> Screen {
        match self.phase {
            Phase::Menu => Screen::Menu,
            Phase::Countdown { until } => {
                let left = until.saturating_duration_since(Instant::now());
                Screen::Countdown(left.as_secs() + u64::from(left.subsec_nanos() > 0))
            }
            Phase::Playing => Screen::Round,
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action)?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<()> {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.phase {
            Phase::Menu => {
                if let KeyAction::SelectMode(mode) = action {
                    self.start_round(mode)?;
                }
            }
            Phase::Playing if !self.game.is_active() => match action {
                KeyAction::Restart => self.start_round(self.game.mode())?,
                _ => self.phase = Phase::Menu,
            },
            Phase::Countdown { .. } | Phase::Playing => match action {
                KeyAction::Turn(turn) => self.game.apply(turn),
                KeyAction::Pause if self.phase == Phase::Playing => {
                    self.game.toggle_pause();
                }
                KeyAction::Restart => self.start_round(self.game.mode())?,
                _ => {}
            },
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        match self.phase {
            Phase::Menu => return Ok(()),
            Phase::Countdown { until } => {
                if Instant::now() < until {
                    return Ok(());
                }
                self.phase = Phase::Playing;
                self.metrics.on_game_start();
            }
            Phase::Playing => {}
        }

        let events = self.game.tick().context("Failed to advance the round")?;
        self.metrics.observe(&events);
        self.record_round_end(&events);

        Ok(())
    }

    fn record_round_end(&mut self, events: &[GameEvent]) {
        for event in events {
            let GameEvent::RoundEnded { outcome, .. } = event else {
                continue;
            };

            let winner = match outcome {
                RoundOutcome::Winner(player) => {
                    Some(self.game.label_for(*player).to_string())
                }
                _ => None,
            };
            let best_score = self
                .game
                .snakes()
                .iter()
                .map(|snake| snake.score)
                .max()
                .unwrap_or_default();

            self.metrics
                .on_round_end(*outcome, winner.as_deref(), best_score);
        }
    }

    fn start_round(&mut self, mode: GameMode) -> Result<()> {
        self.game
            .reset(mode)
            .with_context(|| format!("Failed to start a {mode} round"))?;
        self.phase = Phase::Countdown {
            until: Instant::now() + COUNTDOWN,
        };
        info!(%mode, "countdown started");
        debug!(foods = self.game.foods().len(), "initial food placed");
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
