//! tmdbsurfer - browse TMDB movies and TV shows from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! tmdbsurfer
//!
//! # CLI mode (for automation)
//! tmdbsurfer movies top-rated
//! tmdbsurfer search "blade runner" --json
//! tmdbsurfer favorites list
//! ```

use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tmdbsurfer::cli::{Cli, Command, ExitCode, Output};
use tmdbsurfer::commands::{self, open_store};
use tmdbsurfer::{
    ui, App, AppAction, Config, ContentService, ContentUpdate, FavoritesStore, FileStore,
    TmdbClient,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    if cli.is_cli_mode() {
        init_tracing(None);
        run_cli(cli, &config).await.into()
    } else {
        init_tracing(log_file_path().as_deref());
        match run_tui(&config).await {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                commands::exit_code_for_error(&e).into()
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Log file used while the TUI owns the terminal
fn log_file_path() -> Option<std::path::PathBuf> {
    dirs::data_dir().map(|p| p.join("tmdbsurfer").join("tmdbsurfer.log"))
}

/// `RUST_LOG` filter (default `warn`); stderr, or a file when given
fn init_tracing(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    let file = log_file.and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        // No usable file in TUI mode: drop logs rather than draw over the screen
        None if log_file.is_some() => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

// =============================================================================
// CLI Mode
// =============================================================================

async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Movies(cmd)) => commands::movies_cmd(cmd, config, &output).await,
        Some(Command::Tv(cmd)) => commands::tv_cmd(cmd, config, &output).await,
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, &output).await,
        Some(Command::Trailer(cmd)) => commands::trailer_cmd(cmd, config, &output).await,
        Some(Command::Favorites(cmd)) => commands::favorites_cmd(cmd, config, &output).await,
        Some(Command::Theme(cmd)) => commands::theme_cmd(cmd, config, &output).await,
        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    // Missing key is fatal before the terminal is touched
    let api_key = config.tmdb_api_key()?;
    let store = open_store(config).context("Failed to open favorites store")?;
    info!(store = %store.path().display(), "Starting TUI");

    let (service, updates) = ContentService::new(TmdbClient::new(api_key));
    let mut app = App::new(FavoritesStore::load(store));
    app.refresh();

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &service, updates).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - applies finished requests, handles input, dispatches work
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App<FileStore>,
    service: &ContentService,
    mut updates: UnboundedReceiver<ContentUpdate>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        while let Ok(update) = updates.try_recv() {
            app.apply_update(update);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        for action in app.take_actions() {
            dispatch(service, action);
        }

        // Let spawned requests make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

fn dispatch(service: &ContentService, action: AppAction) {
    debug!(?action, "Dispatching");
    match action {
        AppAction::FetchAll => service.fetch_all_content(),
        AppAction::Search(query) => service.search_content(query),
        AppAction::FetchTrailer(kind, id) => service.request_trailer(kind, id),
    }
}
