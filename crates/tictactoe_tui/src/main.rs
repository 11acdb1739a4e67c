//! Tic-tac-toe in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tictactoe_core::Game;
use tictactoe_tui::{Action, App, Cli, JsonLinesListener, TuiConfig, draw};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TuiConfig::load(&cli.config)?.with_overrides(cli.log_file, cli.sync_file);

    init_logging(&config)?;
    info!(config = %cli.config.display(), "Starting tic-tac-toe TUI");

    let mut game = Game::new();
    if let Some(path) = config.sync_file() {
        let listener = JsonLinesListener::open(path)?;
        info!(path = %listener.path().display(), "Syncing accepted states");
        game.set_listener(listener);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, App::new(game));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    info!("Exiting");
    res
}

/// Logs go to a file so they don't interfere with the TUI.
fn init_logging(config: &TuiConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(())
}

#[instrument(skip_all)]
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key.code) == Action::Quit
        {
            info!("User quit");
            return Ok(());
        }
    }
}
