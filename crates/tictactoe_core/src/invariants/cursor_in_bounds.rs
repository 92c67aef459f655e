//! Cursor-in-bounds invariant.

use super::Invariant;
use crate::HistoryState;

/// Invariant: the displayed step indexes an existing snapshot.
pub struct CursorInBoundsInvariant;

impl Invariant<HistoryState> for CursorInBoundsInvariant {
    fn holds(state: &HistoryState) -> bool {
        state.step < state.snapshots.len()
    }

    fn description() -> &'static str {
        "Cursor points at an existing snapshot"
    }
}
