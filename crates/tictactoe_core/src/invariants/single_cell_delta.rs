//! Single-cell delta invariant: each snapshot adds exactly one mark.

use super::Invariant;
use crate::{HistoryState, Square};

/// Invariant: consecutive snapshots differ in exactly one cell, which goes
/// from empty to occupied.
///
/// Together with [`StartsEmptyInvariant`](super::StartsEmptyInvariant) this
/// makes the board monotonic: marks are never removed or overwritten.
pub struct SingleCellDeltaInvariant;

impl Invariant<HistoryState> for SingleCellDeltaInvariant {
    fn holds(state: &HistoryState) -> bool {
        state.snapshots().windows(2).all(|pair| {
            let changed = pair[1].diff(&pair[0]);
            match changed.as_slice() {
                [pos] => pair[0].get(*pos) == Square::Empty,
                _ => false,
            }
        })
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark to an empty square"
    }
}
