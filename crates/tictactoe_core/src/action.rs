//! First-class move and error types.
//!
//! A move is a domain event: the mark a player placed and where. Moves are
//! never stored directly in the history; they are recovered from the
//! difference between consecutive snapshots.

use crate::position::Position;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Reason a move cannot be applied at the current cursor.
///
/// [`HistoryState::apply_move`](crate::HistoryState::apply_move) never
/// returns this; it ignores such moves. Callers that want to explain the
/// refusal ask [`HistoryState::check_move`](crate::HistoryState::check_move).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The displayed board already has a winner.
    #[display("Game is already over ({} won)", _0)]
    GameOver(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Errors surfaced by history navigation and raw-index entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    /// Requested step is past the end of the history.
    #[display("Invalid step {step}: history has {len} snapshots")]
    InvalidStep {
        /// Requested step.
        step: usize,
        /// Number of snapshots in the history.
        len: usize,
    },

    /// Raw cell index outside 0-8.
    #[display("Invalid cell {index}: must be 0-8")]
    InvalidCell {
        /// Requested cell index.
        index: usize,
    },
}
