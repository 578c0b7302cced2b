use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{FoodKind, Game, GameMode, Player, Position, RoundSnapshot};
use crate::metrics::GameMetrics;

/// Food with less than this share of its lifetime left is drawn dimmed
const FADING_FOOD: f32 = 0.3;

/// What the session is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    /// Whole seconds left before the round starts ticking
    Countdown(u64),
    Round,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, screen: Screen, game: &Game, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if screen == Screen::Menu {
            frame.render_widget(self.render_title(), chunks[0]);
            frame.render_widget(self.render_menu(metrics), game_area);
            frame.render_widget(self.render_controls(screen, game.mode()), chunks[2]);
            return;
        }

        let snapshot = game.snapshot();
        frame.render_widget(self.render_stats(game, &snapshot, metrics), chunks[0]);

        if screen == Screen::Round && !snapshot.active {
            frame.render_widget(self.render_game_over(game, &snapshot), game_area);
        } else {
            frame.render_widget(self.render_grid(screen, &snapshot), game_area);
        }

        frame.render_widget(self.render_controls(screen, snapshot.mode), chunks[2]);
    }

    fn player_color(player: Player) -> Color {
        match player {
            Player::One => Color::Green,
            Player::Two | Player::Computer => Color::LightBlue,
        }
    }

    fn food_cell(kind: FoodKind, remaining: f32) -> Span<'static> {
        let color = match kind {
            FoodKind::Normal => Color::Red,
            FoodKind::Bonus => Color::Yellow,
            FoodKind::Hazard => Color::Magenta,
        };
        let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if remaining < FADING_FOOD {
            style = style.add_modifier(Modifier::DIM);
        }
        Span::styled("● ", style)
    }

    fn render_grid(&self, screen: Screen, snapshot: &RoundSnapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..snapshot.grid.height {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if let Some((snake, is_head)) = snapshot.snake_at(pos) {
                    let color = if snake.alive {
                        Self::player_color(snake.player)
                    } else {
                        Color::DarkGray
                    };
                    if is_head {
                        Span::styled("■ ", Style::default().fg(color).add_modifier(Modifier::BOLD))
                    } else {
                        Span::styled("□ ", Style::default().fg(color))
                    }
                } else if let Some(food) = snapshot.food_at(pos) {
                    Self::food_cell(food.kind, food.remaining)
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match screen {
            Screen::Countdown(seconds) => format!(" Starting in {seconds} "),
            _ if snapshot.paused => " Paused - press P to continue ".to_string(),
            _ => " Snake ".to_string(),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn score_spans(game: &Game, snapshot: &RoundSnapshot) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for snake in &snapshot.snakes {
            let color = Self::player_color(snake.player);
            spans.push(Span::styled(
                format!("{}: ", game.label_for(snake.player)),
                Style::default().fg(color),
            ));
            spans.push(Span::styled(
                snake.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("    "));
        }
        spans
    }

    fn render_stats(
        &self,
        game: &Game,
        snapshot: &RoundSnapshot,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let mut spans = Self::score_spans(game, snapshot);
        spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            metrics.format_time(),
            Style::default().fg(Color::White),
        ));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_title(&self) -> Paragraph<'_> {
        Paragraph::new(vec![Line::from(Span::styled(
            "SNAKE ARENA",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ))])
        .alignment(Alignment::Center)
    }

    fn render_menu(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let option = |key: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(
                    key,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(text, Style::default().fg(Color::White)),
            ])
        };

        let mut text = vec![
            Line::from(""),
            option("1", "  Single player"),
            option("2", "  Two players"),
            option("3", "  Player vs computer"),
            Line::from(""),
        ];

        if metrics.rounds_played > 0 {
            text.push(Line::from(vec![
                Span::styled("Rounds: ", Style::default().fg(Color::Yellow)),
                Span::raw(metrics.rounds_played.to_string()),
                Span::raw("    "),
                Span::styled("High score: ", Style::default().fg(Color::Yellow)),
                Span::raw(metrics.high_score.to_string()),
                Span::raw("    "),
                Span::styled("Food eaten: ", Style::default().fg(Color::Yellow)),
                Span::raw(metrics.food_eaten.to_string()),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Choose a mode "),
        )
    }

    fn render_game_over(&self, game: &Game, snapshot: &RoundSnapshot) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                snapshot.winner_message.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        for snake in &snapshot.snakes {
            text.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", game.label_for(snake.player)),
                    Style::default().fg(Self::player_color(snake.player)),
                ),
                Span::styled(
                    snake.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or any key for the menu", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, screen: Screen, mode: GameMode) -> Paragraph<'_> {
        let mut spans = Vec::new();
        if screen != Screen::Menu {
            spans.push(Span::styled("↑↓←→", Style::default().fg(Color::Cyan)));
            if mode == GameMode::TwoPlayer {
                spans.push(Span::raw(" / "));
                spans.push(Span::styled("WASD", Style::default().fg(Color::Cyan)));
            }
            spans.push(Span::raw(" to move | "));
            spans.push(Span::styled("P", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" to pause | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
