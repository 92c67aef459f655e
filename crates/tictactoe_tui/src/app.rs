//! Application state and key handling.
//!
//! [`App`] owns the single authoritative [`HistoryState`]. Rendering only
//! reads from it; every key press runs one transition to completion.

use crate::input::{digit_position, move_cursor, move_selection};
use crossterm::event::KeyCode;
use tictactoe_core::{GameStatus, HistoryState, Position};
use tracing::{debug, info, instrument, warn};

/// Which panel receives the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The board: arrows move the cursor, Enter plays.
    Board,
    /// The move list: arrows pick a step, Enter jumps to it.
    History,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    history: HistoryState,
    cursor: Position,
    selected_step: usize,
    focus: Focus,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates a new application with a fresh game.
    pub fn new() -> Self {
        Self {
            history: HistoryState::new(),
            cursor: Position::Center,
            selected_step: 0,
            focus: Focus::Board,
            message: None,
            should_quit: false,
        }
    }

    /// The game history.
    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Highlighted row in the move list.
    pub fn selected_step(&self) -> usize {
        self.selected_step
    }

    /// Focused panel.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Feedback from the last key press, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Status line for the displayed board.
    ///
    /// A full board is always the latest snapshot, so the draw is read from
    /// the game outcome when the cursor sits there.
    pub fn status_line(&self) -> String {
        let at_latest = self.history.step() == self.history.latest_step();
        if at_latest && self.history.outcome() == GameStatus::Draw {
            "Draw".to_string()
        } else {
            self.history.current_status().to_string()
        }
    }

    /// Handles a single key press.
    #[instrument(skip(self), fields(focus = ?self.focus))]
    pub fn handle_key(&mut self, key: KeyCode) {
        self.message = None;

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('n') => self.restart(),
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == Focus::Board => {
                self.play(self.cursor)
            }
            KeyCode::Enter => self.jump(self.selected_step),
            KeyCode::Char(_) => {
                if let Some(pos) = digit_position(key) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            _ => match self.focus {
                Focus::Board => self.cursor = move_cursor(self.cursor, key),
                Focus::History => {
                    self.selected_step = move_selection(self.selected_step, self.history.len(), key)
                }
            },
        }
    }

    /// Plays at `pos`, explaining the refusal if the move is ignored.
    fn play(&mut self, pos: Position) {
        if let Err(reason) = self.history.check_move(pos) {
            debug!(%reason, "Move refused");
            self.message = Some(reason.to_string());
            return;
        }

        let history = std::mem::take(&mut self.history);
        self.history = history.apply_move(pos);
        self.selected_step = self.history.step();
        info!(position = %pos, step = self.history.step(), "Move played");

        let outcome = self.history.outcome();
        if outcome.is_decided() {
            info!(?outcome, "Game decided");
        }
    }

    /// Jumps to `step` in the move list.
    fn jump(&mut self, step: usize) {
        match self.history.clone().jump_to(step) {
            Ok(history) => {
                self.history = history;
                info!(step, "Jumped to step");
            }
            Err(err) => {
                warn!(error = %err, "Jump failed");
                self.message = Some(err.to_string());
            }
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Board => Focus::History,
            Focus::History => {
                self.selected_step = self.history.step();
                Focus::Board
            }
        };
        debug!(focus = ?self.focus, "Focus changed");
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        *self = Self {
            focus: self.focus,
            ..Self::new()
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{Player, Square};

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key);
        }
    }

    #[test]
    fn test_enter_plays_cursor_cell() {
        let mut app = App::new();
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(
            app.history().current_board().get(Position::Center),
            Square::Occupied(Player::X)
        );
        assert_eq!(app.status_line(), "Next player: O");
    }

    #[test]
    fn test_occupied_square_sets_message() {
        let mut app = App::new();
        press(&mut app, &[KeyCode::Char('5'), KeyCode::Char('5')]);
        assert_eq!(app.history().len(), 2);
        assert_eq!(app.message(), Some("Square Center is already occupied"));

        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_jump_through_history_panel() {
        let mut app = App::new();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('5'), KeyCode::Char('9')]);
        assert_eq!(app.selected_step(), 3);

        press(&mut app, &[KeyCode::Tab, KeyCode::Home, KeyCode::Enter]);
        assert_eq!(app.history().step(), 0);
        assert_eq!(app.history().len(), 4);
        assert_eq!(app.status_line(), "Next player: X");

        // Playing from the start discards the rest.
        press(&mut app, &[KeyCode::Tab, KeyCode::Char('3')]);
        assert_eq!(app.history().len(), 2);
        assert_eq!(app.selected_step(), 1);
    }

    #[test]
    fn test_win_then_restart() {
        let mut app = App::new();
        for key in ['1', '4', '2', '5', '3'] {
            app.handle_key(KeyCode::Char(key));
        }
        assert_eq!(app.status_line(), "Winner: X");

        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.history().len(), 6);
        assert_eq!(app.message(), Some("Game is already over (X won)"));

        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.focus(), Focus::Board);
    }

    #[test]
    fn test_draw_status() {
        let mut app = App::new();
        for key in ['1', '2', '3', '5', '4', '6', '8', '7', '9'] {
            app.handle_key(KeyCode::Char(key));
        }
        assert_eq!(app.status_line(), "Draw");

        // Earlier snapshots of a drawn game are still in play.
        press(&mut app, &[KeyCode::Tab, KeyCode::Up, KeyCode::Enter]);
        assert_eq!(app.history().step(), 8);
        assert_eq!(app.status_line(), "Next player: X");
    }

    #[test]
    fn test_quit() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
