//! Application state and key handling.

use crate::input::{digit_position, move_cursor};
use crossterm::event::KeyCode;
use derive_getters::Getters;
use tictactoe_core::{Game, Position};
use tracing::{debug, instrument};

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Arrow keys move the board cursor.
    #[default]
    Board,
    /// Arrow keys move through the step history.
    History,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Board => Focus::History,
            Focus::History => Focus::Board,
        }
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
#[derive(Debug, Getters, derive_new::new)]
pub struct App {
    /// The game being played.
    game: Game,
    /// Highlighted board cell.
    #[new(value = "Position::Center")]
    cursor: Position,
    /// Panel receiving navigation keys.
    #[new(default)]
    focus: Focus,
    /// Highlighted history row.
    #[new(default)]
    selected: usize,
    /// Feedback from the last key, shown under the status line.
    #[new(default)]
    message: Option<String>,
}

impl App {
    /// Handles one key press.
    #[instrument(skip(self), fields(focus = ?self.focus, step = self.game.step()))]
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Tab => {
                self.focus = self.focus.toggle();
                self.selected = self.game.step();
                self.message = None;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.place(pos);
                }
            }
            _ => match self.focus {
                Focus::Board => self.handle_board_key(key),
                Focus::History => self.handle_history_key(key),
            },
        }
        Action::Continue
    }

    fn handle_board_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            other => self.cursor = move_cursor(self.cursor, other),
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.game.history().last_step());
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.jump(self.selected),
            _ => {}
        }
    }

    fn place(&mut self, pos: Position) {
        match self.game.place(pos) {
            Ok(action) => {
                self.selected = self.game.step();
                self.message = Some(format!("{} played", action));
            }
            Err(e) => {
                debug!(error = %e, "Ignoring rejected move");
                self.message = Some(e.to_string());
            }
        }
    }

    fn jump(&mut self, step: usize) {
        match self.game.jump_to(step) {
            Ok(_) if step == 0 => self.message = Some("Back to game start".to_string()),
            Ok(_) => self.message = Some(format!("Back to move #{}", step)),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game.restart();
        self.cursor = Position::Center;
        self.focus = Focus::Board;
        self.selected = 0;
        self.message = Some("Game restarted".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{GameStatus, Player};

    fn keys(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            assert_eq!(app.handle_key(*code), Action::Continue);
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(Game::new());
        assert_eq!(app.handle_key(KeyCode::Char('q')), Action::Quit);
        assert_eq!(app.handle_key(KeyCode::Esc), Action::Quit);
    }

    #[test]
    fn test_digits_play_moves() {
        let mut app = App::new(Game::new());
        keys(&mut app, &[KeyCode::Char('1'), KeyCode::Char('4'), KeyCode::Char('2')]);
        assert_eq!(app.game().state().move_count(), 3);
        assert_eq!(app.cursor(), &Position::TopCenter);
        assert_eq!(app.selected(), &3);
    }

    #[test]
    fn test_cursor_and_enter_play_move() {
        let mut app = App::new(Game::new());
        keys(&mut app, &[KeyCode::Up, KeyCode::Left, KeyCode::Enter]);
        assert_eq!(app.game().state().move_count(), 1);
        assert_eq!(
            app.game().history().move_at(1).map(|m| m.position),
            Some(Position::TopLeft)
        );
    }

    #[test]
    fn test_occupied_square_reports_message() {
        let mut app = App::new(Game::new());
        keys(&mut app, &[KeyCode::Char('5'), KeyCode::Char('5')]);
        assert_eq!(app.game().state().move_count(), 1);
        assert_eq!(
            app.message().as_deref(),
            Some("Square Center is already occupied")
        );
    }

    #[test]
    fn test_history_navigation_jumps_back() {
        let mut app = App::new(Game::new());
        // X wins the top row.
        keys(
            &mut app,
            &[
                KeyCode::Char('1'),
                KeyCode::Char('4'),
                KeyCode::Char('2'),
                KeyCode::Char('5'),
                KeyCode::Char('3'),
            ],
        );
        assert_eq!(app.game().status(), GameStatus::Won(Player::X));

        keys(&mut app, &[KeyCode::Tab, KeyCode::Up, KeyCode::Up, KeyCode::Enter]);
        assert_eq!(app.focus(), &Focus::History);
        assert_eq!(app.game().step(), 3);
        assert_eq!(app.game().status(), GameStatus::InProgress { next: Player::O });
        assert_eq!(app.message().as_deref(), Some("Back to move #3"));
    }

    #[test]
    fn test_history_selection_is_clamped() {
        let mut app = App::new(Game::new());
        keys(&mut app, &[KeyCode::Char('5'), KeyCode::Tab, KeyCode::Down, KeyCode::Down]);
        assert_eq!(app.selected(), &1);
        keys(&mut app, &[KeyCode::Up, KeyCode::Up, KeyCode::Enter]);
        assert_eq!(app.selected(), &0);
        assert_eq!(app.game().step(), 0);
    }

    #[test]
    fn test_restart_clears_board() {
        let mut app = App::new(Game::new());
        keys(&mut app, &[KeyCode::Char('5'), KeyCode::Tab, KeyCode::Char('r')]);
        assert_eq!(app.game().history().len(), 1);
        assert_eq!(app.focus(), &Focus::Board);
        assert_eq!(app.cursor(), &Position::Center);
    }
}
