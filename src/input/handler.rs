use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameMode, Player, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Turn),
    Pause,
    Restart,
    SelectMode(GameMode),
    Quit,
    /// Any key without a binding (used to leave the result screen)
    Other,
}

/// Player one steers with the arrow keys, player two with WASD
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let turn = |player, direction| KeyAction::Turn(Turn::new(player, direction));

        match key.code {
            KeyCode::Up => turn(Player::One, Direction::Up),
            KeyCode::Down => turn(Player::One, Direction::Down),
            KeyCode::Left => turn(Player::One, Direction::Left),
            KeyCode::Right => turn(Player::One, Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => turn(Player::Two, Direction::Up),
                's' => turn(Player::Two, Direction::Down),
                'a' => turn(Player::Two, Direction::Left),
                'd' => turn(Player::Two, Direction::Right),
                'p' => KeyAction::Pause,
                'r' => KeyAction::Restart,
                'q' => KeyAction::Quit,
                '1' => KeyAction::SelectMode(GameMode::Single),
                '2' => KeyAction::SelectMode(GameMode::TwoPlayer),
                '3' => KeyAction::SelectMode(GameMode::VersusAi),
                _ => KeyAction::Other,
            },

            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::Other,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
