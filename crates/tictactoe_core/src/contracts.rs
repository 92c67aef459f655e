//! Contract-based validation for history transitions.
//!
//! A contract pairs a precondition on `(state, action)` with a postcondition
//! on `(before, after)`. Preconditions always run; postconditions run in
//! debug builds.

use crate::action::{HistoryError, MoveError};
use crate::invariants::{HistoryInvariants, InvariantSet};
use crate::position::Position;
use crate::rules::detect_winner;
use crate::HistoryState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Error reported when a condition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Self::Error>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the displayed board has no winner yet.
pub struct GameUndecided;

impl GameUndecided {
    /// Fails with [`MoveError::GameOver`] when the board at the cursor is won.
    #[instrument(skip(state))]
    pub fn check(state: &HistoryState) -> Result<(), MoveError> {
        match detect_winner(state.current_board()) {
            Some(winner) => Err(MoveError::GameOver(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: the target square is empty on the displayed board.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::SquareOccupied`] when the square is taken.
    #[instrument(skip(state))]
    pub fn check(pos: Position, state: &HistoryState) -> Result<(), MoveError> {
        if state.current_board().is_empty(pos) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(pos))
        }
    }
}

/// Composite precondition: a move is legal if the displayed game is
/// undecided and the square is empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    pub fn check(pos: Position, state: &HistoryState) -> Result<(), MoveError> {
        GameUndecided::check(state)?;
        SquareIsEmpty::check(pos, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract
// ─────────────────────────────────────────────────────────────

/// Contract for applying a move at the cursor.
///
/// Postconditions:
/// - everything past the old cursor was discarded and one snapshot appended
/// - the cursor sits on the new snapshot
/// - all history invariants hold
pub struct MoveContract;

impl Contract<HistoryState, Position> for MoveContract {
    type Error = MoveError;

    fn pre(state: &HistoryState, pos: &Position) -> Result<(), MoveError> {
        LegalMove::check(*pos, state)
    }

    fn post(before: &HistoryState, after: &HistoryState) -> Result<(), MoveError> {
        let kept = before.step() + 1;
        if after.len() != kept + 1 || after.snapshots()[..kept] != before.snapshots()[..kept] {
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: expected {} retained snapshots plus one",
                kept
            )));
        }
        if after.step() != after.latest_step() {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: cursor not on the new snapshot".to_string(),
            ));
        }

        HistoryInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Jump Contract
// ─────────────────────────────────────────────────────────────

/// Contract for moving the cursor.
///
/// Jumping never touches the stored snapshots.
pub struct JumpContract;

impl Contract<HistoryState, usize> for JumpContract {
    type Error = HistoryError;

    fn pre(state: &HistoryState, step: &usize) -> Result<(), HistoryError> {
        if *step < state.len() {
            Ok(())
        } else {
            Err(HistoryError::InvalidStep {
                step: *step,
                len: state.len(),
            })
        }
    }

    fn post(before: &HistoryState, after: &HistoryState) -> Result<(), HistoryError> {
        if before.snapshots() == after.snapshots() && after.step() < after.len() {
            Ok(())
        } else {
            Err(HistoryError::InvalidStep {
                step: after.step(),
                len: after.len(),
            })
        }
    }
}

/// Asserts that all history invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &HistoryState) {
    if let Err(violations) = HistoryInvariants::check_all(state) {
        warn!(?violations, "History invariants violated");
        debug_assert!(false, "History invariants violated: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Player};

    #[test]
    fn test_precondition_empty_square() {
        let state = HistoryState::new();
        assert!(MoveContract::pre(&state, &Position::Center).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let state = HistoryState::new().apply_move(Position::Center);
        assert_eq!(
            MoveContract::pre(&state, &Position::Center),
            Err(MoveError::SquareOccupied(Position::Center))
        );
    }

    #[test]
    fn test_precondition_game_over_takes_priority() {
        let state = [0, 3, 1, 4, 2]
            .into_iter()
            .filter_map(Position::from_index)
            .fold(HistoryState::new(), HistoryState::apply_move);
        assert_eq!(
            MoveContract::pre(&state, &Position::TopLeft),
            Err(MoveError::GameOver(Player::X))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = HistoryState::new().apply_move(Position::Center);
        let after = before.clone().apply_move(Position::TopLeft);
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = HistoryState::new();
        let mut after = before.clone().apply_move(Position::Center);
        after.snapshots[1] = Board::new()
            .with_mark(Position::Center, Player::X)
            .with_mark(Position::TopLeft, Player::O);
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_missing_truncation() {
        let full = HistoryState::new()
            .apply_move(Position::Center)
            .apply_move(Position::TopLeft);
        let before = full.clone().jump_to(0).expect("step 0 exists");
        // Pretend the move appended without discarding the future.
        let mut after = full;
        after.snapshots.push(Board::new());
        after.step = after.latest_step();
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_jump_postcondition_holds_after_jump() {
        let before = HistoryState::new()
            .apply_move(Position::Center)
            .apply_move(Position::TopLeft);
        let after = before.clone().jump_to(1).expect("step 1 exists");
        assert!(JumpContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_jump_postcondition_detects_rewritten_history() {
        let before = HistoryState::new()
            .apply_move(Position::Center)
            .apply_move(Position::TopLeft);
        let mut after = before.clone();
        after.snapshots.truncate(2);
        after.step = 1;
        assert_eq!(
            JumpContract::post(&before, &after),
            Err(HistoryError::InvalidStep { step: 1, len: 2 })
        );
    }

    #[test]
    fn test_jump_postcondition_detects_cursor_out_of_bounds() {
        let before = HistoryState::new().apply_move(Position::Center);
        let mut after = before.clone();
        after.step = 4;
        assert!(JumpContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_jump_precondition_rejects_out_of_range() {
        let state = HistoryState::new();
        assert_eq!(
            JumpContract::pre(&state, &1),
            Err(HistoryError::InvalidStep { step: 1, len: 1 })
        );
    }
}
