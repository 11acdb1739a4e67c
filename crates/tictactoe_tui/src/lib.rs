//! Terminal host for `tictactoe_core`.
//!
//! Renders the board, the status line and the step history with ratatui,
//! maps keys to core operations, and can mirror every accepted state to a
//! JSON-lines file.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod input;
mod sync;
mod ui;

pub use app::{Action, App, Focus};
pub use cli::Cli;
pub use config::{ConfigError, TuiConfig};
pub use input::{digit_position, move_cursor};
pub use sync::JsonLinesListener;
pub use ui::draw;
