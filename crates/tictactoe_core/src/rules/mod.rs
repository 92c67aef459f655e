//! Game rules for tic-tac-toe.
//!
//! Pure functions over a single board snapshot. They hold no state and can
//! be evaluated at any point in the history, not only the latest move.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, detect_winner, winning_line};
