//! Time-travel move history.
//!
//! [`HistoryState`] owns every board snapshot since the start of the game
//! and a cursor selecting the one on display. Whose turn it is follows from
//! the cursor's parity and is never stored.
//!
//! Operations take `self` by value and return the next state, so the caller
//! always holds exactly one authoritative history.

use crate::action::{HistoryError, Move, MoveError};
use crate::contracts::{Contract, JumpContract, MoveContract, assert_invariants};
use crate::position::Position;
use crate::rules::{detect_winner, is_full};
use crate::types::{Board, GameStatus, Player, Status};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Board snapshots plus the displayed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryState {
    pub(crate) snapshots: Vec<Board>,
    pub(crate) step: usize,
}

/// Starts a fresh game: one empty snapshot, cursor at step 0.
pub fn new_game() -> HistoryState {
    HistoryState::new()
}

impl HistoryState {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
            step: 0,
        }
    }

    /// All snapshots, index 0 being the empty board.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// The displayed step.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; a history holds at least the starting board.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the most recent snapshot.
    pub fn latest_step(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// The snapshot on display.
    pub fn current_board(&self) -> &Board {
        &self.snapshots[self.step]
    }

    /// The most recent snapshot, regardless of the cursor.
    pub fn latest_board(&self) -> &Board {
        &self.snapshots[self.latest_step()]
    }

    /// Player to move at the cursor: X on even steps, O on odd ones.
    pub fn next_to_move(&self) -> Player {
        Player::for_step(self.step)
    }

    /// Winner and turn indicator for the displayed board.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn current_status(&self) -> Status {
        Status {
            winner: detect_winner(self.current_board()),
            next_to_move: self.next_to_move(),
        }
    }

    /// Whether the game as played so far is won, drawn, or still open.
    ///
    /// Evaluated on the latest snapshot, not the displayed one.
    pub fn outcome(&self) -> GameStatus {
        let board = self.latest_board();
        match detect_winner(board) {
            Some(winner) => GameStatus::Won(winner),
            None if is_full(board) => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Explains why [`apply_move`](Self::apply_move) would ignore `cell`.
    pub fn check_move(&self, cell: Position) -> Result<(), MoveError> {
        MoveContract::pre(self, &cell)
    }

    /// Plays the parity-derived mark at `cell` on the displayed board.
    ///
    /// Snapshots after the cursor are discarded before the new one is
    /// appended, and the cursor moves to it. If the displayed board already
    /// has a winner, or `cell` is occupied, the state is returned unchanged.
    #[instrument(skip(self), fields(step = self.step, len = self.snapshots.len()))]
    pub fn apply_move(self, cell: Position) -> Self {
        if let Err(reason) = self.check_move(cell) {
            debug!(%reason, "Ignoring move");
            return self;
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.next_to_move();
        let mut next = self;
        let discarded = next.snapshots.len() - (next.step + 1);
        next.snapshots.truncate(next.step + 1);
        let board = next.current_board().with_mark(cell, player);
        next.snapshots.push(board);
        next.step = next.latest_step();

        #[cfg(debug_assertions)]
        {
            let verdict = MoveContract::post(&before, &next);
            if let Err(err) = &verdict {
                warn!(error = %err, "Move postcondition failed");
            }
            debug_assert!(verdict.is_ok(), "{:?}", verdict);
        }

        debug!(%player, position = %cell, discarded, step = next.step, "Move applied");
        next
    }

    /// [`apply_move`](Self::apply_move) for a raw cell index.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCell`] if `index` is not 0-8.
    #[instrument(skip(self))]
    pub fn apply_move_at(self, index: usize) -> Result<Self, HistoryError> {
        match Position::from_index(index) {
            Some(cell) => Ok(self.apply_move(cell)),
            None => {
                warn!(index, "Rejecting out-of-range cell");
                Err(HistoryError::InvalidCell { index })
            }
        }
    }

    /// Moves the cursor to `step` without discarding any snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidStep`] if `step` is not below
    /// [`len`](Self::len).
    #[instrument(skip(self), fields(len = self.snapshots.len()))]
    pub fn jump_to(self, step: usize) -> Result<Self, HistoryError> {
        if let Err(err) = JumpContract::pre(&self, &step) {
            warn!(error = %err, "Rejecting jump");
            return Err(err);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut next = self;
        next.step = step;

        #[cfg(debug_assertions)]
        {
            let verdict = JumpContract::post(&before, &next);
            if let Err(err) = &verdict {
                warn!(error = %err, "Jump postcondition failed");
            }
            debug_assert!(verdict.is_ok(), "{:?}", verdict);
        }
        assert_invariants(&next);

        debug!(next_to_move = %next.next_to_move(), "Jumped");
        Ok(next)
    }

    /// The move that produced snapshot `step`, or `None` for step 0 and
    /// steps past the end.
    pub fn move_at(&self, step: usize) -> Option<Move> {
        if step == 0 {
            return None;
        }
        let prev = self.snapshots.get(step - 1)?;
        let board = self.snapshots.get(step)?;
        match board.diff(prev).as_slice() {
            [pos] => board.get(*pos).player().map(|player| Move::new(player, *pos)),
            _ => None,
        }
    }

    /// One entry per snapshot, for rendering the move list.
    pub fn entries(&self) -> Vec<StepEntry> {
        (0..self.snapshots.len())
            .map(|step| StepEntry {
                step,
                mov: self.move_at(step),
                is_current: step == self.step,
            })
            .collect()
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

/// A row of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepEntry {
    /// Snapshot index this entry jumps to.
    pub step: usize,
    /// Move that produced the snapshot (`None` at the start).
    pub mov: Option<Move>,
    /// Whether this snapshot is on display.
    pub is_current: bool,
}

impl StepEntry {
    /// Button text for the entry.
    pub fn label(&self) -> String {
        if self.step == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{}", self.step)
        }
    }
}
