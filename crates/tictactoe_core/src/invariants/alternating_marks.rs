//! Alternating marks invariant: X, O, X, O, ... by step parity.

use super::Invariant;
use crate::{HistoryState, Player};

/// Invariant: the mark added at step `n` belongs to the player who was to
/// move at step `n - 1`.
///
/// Since turn order is derived from the cursor, this ties stored snapshots
/// to the derived turn: odd steps add X, even steps add O.
pub struct AlternatingMarksInvariant;

impl Invariant<HistoryState> for AlternatingMarksInvariant {
    fn holds(state: &HistoryState) -> bool {
        (1..state.len()).all(|step| {
            state
                .move_at(step)
                .is_some_and(|mov| mov.player == Player::for_step(step - 1))
        })
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingMarksInvariant::holds(&HistoryState::new()));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let state = HistoryState::new()
            .apply_move(Position::TopLeft)
            .apply_move(Position::Center)
            .apply_move(Position::TopRight);
        assert!(AlternatingMarksInvariant::holds(&state));
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut state = HistoryState::new().apply_move(Position::TopLeft);
        let twice = state.snapshots[1].with_mark(Position::Center, Player::X);
        state.snapshots.push(twice);
        assert!(!AlternatingMarksInvariant::holds(&state));
    }

    #[test]
    fn test_o_first_violates() {
        let mut state = HistoryState::new();
        state
            .snapshots
            .push(Board::new().with_mark(Position::Center, Player::O));
        assert!(!AlternatingMarksInvariant::holds(&state));
    }
}
