//! Terminal frontend for time-travel tic-tac-toe.
//!
//! The frontend owns one [`App`], feeds it key presses and redraws after
//! each one. Game rules live in `tictactoe_core`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod ui;

pub use app::{App, Focus};
pub use cli::Cli;
pub use config::{ConfigError, TuiConfig};
