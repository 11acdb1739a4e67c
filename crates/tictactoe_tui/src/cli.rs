//! Command-line interface for the terminal host.

use clap::Parser;
use std::path::PathBuf;

/// Tic-tac-toe in the terminal, with step history
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Append each accepted state as a JSON line to this file
    #[arg(long)]
    pub sync_file: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
