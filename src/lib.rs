//! tmdbsurfer - browse TMDB movies and TV shows from the terminal
//!
//! Popular, top rated and now playing lists, multi-search, trailers and a
//! locally persisted favorites list with a dark/light theme.
//!
//! # Modules
//!
//! - `models` - TMDB records (movies, TV shows, search results, videos)
//! - `api` - TMDB HTTP client
//! - `service` - async fetch dispatch and the state it feeds
//! - `store` - key-value persistence
//! - `favorites` - favorites lists on top of the store
//! - `theme` - persisted dark-mode flag
//! - `config` - config file and API key resolution
//! - `app` - TUI state and navigation
//! - `ui` - TUI rendering
//! - `cli` / `commands` - scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod models;
pub mod service;
pub mod store;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use models::{Content, ContentItem, MediaType, Movie, SearchResult, TvShow, Video};

pub use api::{MovieList, TmdbClient, TmdbError, TvList};
pub use app::{App, AppAction, AppState};
pub use config::{Config, ConfigError};
pub use favorites::{FavoritesFilter, FavoritesStore};
pub use service::{ContentService, ContentState, ContentUpdate};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use theme::ThemePreference;
