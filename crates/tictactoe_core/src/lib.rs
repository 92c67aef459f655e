//! Tic-tac-toe with time travel.
//!
//! Two pieces of logic make up the game:
//!
//! - **Rules**: [`detect_winner`] and friends, pure functions over a single
//!   [`Board`] snapshot.
//! - **History**: [`HistoryState`], the list of snapshots since the start of
//!   the game and a cursor selecting the one on display. Moves append a new
//!   snapshot (discarding any "future" past the cursor); jumps move the cursor.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{new_game, Player, Position};
//!
//! let state = new_game()
//!     .apply_move(Position::Center)
//!     .apply_move(Position::TopLeft);
//! assert_eq!(state.current_status().next_to_move, Player::X);
//!
//! let state = state.jump_to(0).expect("step 0 always exists");
//! assert!(state.current_board().is_empty(Position::Center));
//! assert_eq!(state.len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod history;
mod position;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{HistoryError, Move, MoveError};
pub use contracts::{
    Contract, GameUndecided, JumpContract, LegalMove, MoveContract, SquareIsEmpty,
    assert_invariants,
};
pub use history::{HistoryState, StepEntry, new_game};
pub use position::Position;
pub use rules::{LINES, detect_winner, is_draw, is_full, winning_line};
pub use types::{Board, GameStatus, Mark, Player, Square, Status};
