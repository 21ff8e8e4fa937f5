//! CLI - Command Line Interface for tmdbsurfer
//!
//! Every list the TUI shows is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse lists
//! tmdbsurfer movies top-rated --limit 5
//! tmdbsurfer tv on-the-air --json
//!
//! # Search and trailers
//! tmdbsurfer search "the batman" --type movie
//! tmdbsurfer trailer 414906 --type movie
//!
//! # Favorites
//! tmdbsurfer favorites add --movie 414906
//! tmdbsurfer favorites list --filter tv
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::{MovieList, TvList};
use crate::favorites::FavoritesFilter;
use crate::models::MediaType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Requested item does not exist
    NotFound = 4,
    /// Missing API key or unusable config
    ConfigError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// tmdbsurfer - browse TMDB movies and TV shows from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "tmdbsurfer",
    version,
    about = "Browse TMDB movies and TV shows from the terminal",
    long_about = "Popular, top rated and now playing lists, multi-search, \
                  trailers and a local favorites list.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  tmdbsurfer                             Launch interactive TUI\n\
                  tmdbsurfer movies top-rated -l 5       Top rated movies\n\
                  tmdbsurfer search \"blade runner\"       Search movies and TV\n\
                  tmdbsurfer favorites add --movie 78    Favorite a movie by id"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List popular, top rated or now playing movies
    #[command(visible_alias = "m")]
    Movies(MoviesCmd),

    /// List popular, top rated or on-the-air TV shows
    Tv(TvCmd),

    /// Search movies, TV shows and people
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Find the YouTube trailer for a movie or TV show
    #[command(visible_alias = "tr")]
    Trailer(TrailerCmd),

    /// Manage the local favorites list
    #[command(visible_alias = "fav")]
    Favorites(FavoritesCmd),

    /// Show or toggle the dark-mode preference
    Theme(ThemeCmd),
}

// =============================================================================
// List Commands
// =============================================================================

/// Fetch one of the movie lists
#[derive(Args, Debug)]
pub struct MoviesCmd {
    /// Which list to fetch
    #[arg(value_enum, default_value = "popular")]
    pub list: MovieListArg,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieListArg {
    #[default]
    Popular,
    TopRated,
    NowPlaying,
}

impl From<MovieListArg> for MovieList {
    fn from(arg: MovieListArg) -> Self {
        match arg {
            MovieListArg::Popular => MovieList::Popular,
            MovieListArg::TopRated => MovieList::TopRated,
            MovieListArg::NowPlaying => MovieList::NowPlaying,
        }
    }
}

/// Fetch one of the TV lists
#[derive(Args, Debug)]
pub struct TvCmd {
    /// Which list to fetch
    #[arg(value_enum, default_value = "popular")]
    pub list: TvListArg,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TvListArg {
    #[default]
    Popular,
    TopRated,
    OnTheAir,
}

impl From<TvListArg> for TvList {
    fn from(arg: TvListArg) -> Self {
        match arg {
            TvListArg::Popular => TvList::Popular,
            TvListArg::TopRated => TvList::TopRated,
            TvListArg::OnTheAir => TvList::OnTheAir,
        }
    }
}

// =============================================================================
// Search Command
// =============================================================================

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Filter by media type
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,
}

/// Media type filter for search
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFilter {
    /// Movies only
    Movie,
    /// TV shows only
    Tv,
}

impl From<MediaTypeFilter> for MediaType {
    fn from(filter: MediaTypeFilter) -> Self {
        match filter {
            MediaTypeFilter::Movie => MediaType::Movie,
            MediaTypeFilter::Tv => MediaType::Tv,
        }
    }
}

// =============================================================================
// Trailer Command
// =============================================================================

/// Look up the first YouTube trailer for a title
#[derive(Args, Debug)]
pub struct TrailerCmd {
    /// TMDB id
    #[arg(required = true)]
    pub id: u64,

    /// Whether the id is a movie or a TV show
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: MediaTypeFilter,
}

// =============================================================================
// Favorites Command
// =============================================================================

#[derive(Args, Debug)]
pub struct FavoritesCmd {
    #[command(subcommand)]
    pub action: FavoritesAction,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// Print saved favorites
    #[command(visible_alias = "ls")]
    List(FavoritesListCmd),

    /// Fetch a title by id and save it
    Add(FavoriteTarget),

    /// Remove a title by id
    #[command(visible_alias = "rm")]
    Remove(FavoriteTarget),
}

#[derive(Args, Debug)]
pub struct FavoritesListCmd {
    /// Which favorites to show
    #[arg(long, short = 'f', value_enum, default_value = "all")]
    pub filter: FavoritesFilterArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesFilterArg {
    #[default]
    All,
    Movies,
    Tv,
}

impl From<FavoritesFilterArg> for FavoritesFilter {
    fn from(arg: FavoritesFilterArg) -> Self {
        match arg {
            FavoritesFilterArg::All => FavoritesFilter::All,
            FavoritesFilterArg::Movies => FavoritesFilter::Movies,
            FavoritesFilterArg::Tv => FavoritesFilter::TvShows,
        }
    }
}

/// Exactly one of `--movie` / `--tv`
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct FavoriteTarget {
    /// TMDB movie id
    #[arg(long)]
    pub movie: Option<u64>,

    /// TMDB TV show id
    #[arg(long)]
    pub tv: Option<u64>,
}

impl FavoriteTarget {
    pub fn target(&self) -> Option<(MediaType, u64)> {
        match (self.movie, self.tv) {
            (Some(id), None) => Some((MediaType::Movie, id)),
            (None, Some(id)) => Some((MediaType::Tv, id)),
            _ => None,
        }
    }
}

// =============================================================================
// Theme Command
// =============================================================================

#[derive(Args, Debug)]
pub struct ThemeCmd {
    /// Flip the dark-mode flag before printing it
    #[arg(long)]
    pub toggle: bool,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Favorite add/remove response
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteChange {
    pub status: &'static str,
    pub media_type: MediaType,
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Trailer lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct TrailerResponse {
    pub media_type: MediaType,
    pub id: u64,
    pub url: String,
}

/// Theme flag response
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeStatus {
    pub is_dark_mode: bool,
    pub theme: &'static str,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            // For non-JSON, caller should handle formatting
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a pre-rendered line in human mode, or the data as JSON
    pub fn print_or<T: Serialize>(&self, data: T, human: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            println!("{}", human());
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["tmdbsurfer"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_movies_default_list() {
        let cli = Cli::parse_from(["tmdbsurfer", "movies"]);
        match cli.command {
            Some(Command::Movies(cmd)) => {
                assert_eq!(cmd.list, MovieListArg::Popular);
                assert_eq!(cmd.limit, 20);
            }
            other => panic!("Expected Movies command, got {:?}", other),
        }
    }

    #[test]
    fn test_tv_on_the_air() {
        let cli = Cli::parse_from(["tmdbsurfer", "tv", "on-the-air", "-l", "3"]);
        match cli.command {
            Some(Command::Tv(cmd)) => {
                assert_eq!(TvList::from(cmd.list), TvList::OnTheAir);
                assert_eq!(cmd.limit, 3);
            }
            other => panic!("Expected Tv command, got {:?}", other),
        }
    }

    #[test]
    fn test_search_with_type() {
        let cli = Cli::parse_from(["tmdbsurfer", "search", "batman", "--type", "tv"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "batman");
                assert_eq!(cmd.media_type, Some(MediaTypeFilter::Tv));
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "tmdbsurfer",
            "--json",
            "--quiet",
            "--config",
            "/tmp/c.toml",
            "search",
            "test",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_trailer_requires_type() {
        assert!(Cli::try_parse_from(["tmdbsurfer", "trailer", "550"]).is_err());
        let cli = Cli::parse_from(["tmdbsurfer", "trailer", "550", "-t", "movie"]);
        match cli.command {
            Some(Command::Trailer(cmd)) => {
                assert_eq!(cmd.id, 550);
                assert_eq!(MediaType::from(cmd.media_type), MediaType::Movie);
            }
            other => panic!("Expected Trailer command, got {:?}", other),
        }
    }

    #[test]
    fn test_favorites_add_target() {
        let cli = Cli::parse_from(["tmdbsurfer", "favorites", "add", "--tv", "1399"]);
        match cli.command {
            Some(Command::Favorites(FavoritesCmd {
                action: FavoritesAction::Add(target),
            })) => assert_eq!(target.target(), Some((MediaType::Tv, 1399))),
            other => panic!("Expected favorites add, got {:?}", other),
        }
    }

    #[test]
    fn test_favorites_target_is_exclusive() {
        assert!(Cli::try_parse_from(["tmdbsurfer", "favorites", "remove"]).is_err());
        assert!(Cli::try_parse_from([
            "tmdbsurfer",
            "favorites",
            "remove",
            "--movie",
            "1",
            "--tv",
            "2"
        ])
        .is_err());
    }

    #[test]
    fn test_favorites_list_filter() {
        let cli = Cli::parse_from(["tmdbsurfer", "fav", "ls", "--filter", "tv"]);
        match cli.command {
            Some(Command::Favorites(FavoritesCmd {
                action: FavoritesAction::List(cmd),
            })) => assert_eq!(FavoritesFilter::from(cmd.filter), FavoritesFilter::TvShows),
            other => panic!("Expected favorites list, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
        assert_eq!(i32::from(ExitCode::ConfigError), 5);
    }

    #[test]
    fn test_json_error_shape() {
        let out = JsonOutput::<()>::error_msg("boom", ExitCode::NotFound);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["exit_code"], 4);
        assert!(json.get("data").is_none());
    }
}
