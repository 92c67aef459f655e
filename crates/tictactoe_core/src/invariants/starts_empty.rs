//! Starts-empty invariant: the first snapshot is the empty board.

use super::Invariant;
use crate::HistoryState;

/// Invariant: the history is non-empty and its first snapshot has no marks.
pub struct StartsEmptyInvariant;

impl Invariant<HistoryState> for StartsEmptyInvariant {
    fn holds(state: &HistoryState) -> bool {
        state
            .snapshots()
            .first()
            .is_some_and(|board| board.occupied_count() == 0)
    }

    fn description() -> &'static str {
        "History starts with an empty board"
    }
}
