//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the TMDB client or the local
//! favorites store. Each handler takes CLI args, the loaded config and
//! Output, returns ExitCode.

use serde::Serialize;
use tracing::debug;

use crate::api::{MovieList, TmdbClient, TmdbError, TvList};
use crate::cli::{
    ExitCode, FavoriteChange, FavoriteTarget, FavoritesAction, FavoritesCmd, MoviesCmd, Output,
    SearchCmd, ThemeCmd, ThemeStatus, TrailerCmd, TrailerResponse, TvCmd,
};
use crate::config::{Config, ConfigError};
use crate::favorites::{FavoritesFilter, FavoritesStore};
use crate::models::{Content, ContentItem, MediaType};
use crate::store::{FileStore, StoreError};
use crate::theme::ThemePreference;

// =============================================================================
// Shared Helpers
// =============================================================================

/// Build a client from the resolved API key, or report a config error
fn tmdb_client(config: &Config, output: &Output) -> Result<TmdbClient, ExitCode> {
    config
        .tmdb_api_key()
        .map(TmdbClient::new)
        .map_err(|e| output.error(e.to_string(), ExitCode::ConfigError))
}

/// Open the favorites/theme store at the configured or default location
pub fn open_store(config: &Config) -> Result<FileStore, StoreError> {
    match &config.store_path {
        Some(path) => Ok(FileStore::open(path)),
        None => FileStore::open_default(),
    }
}

fn store_or_exit(config: &Config, output: &Output) -> Result<FileStore, ExitCode> {
    open_store(config).map_err(|e| output.error(e.to_string(), ExitCode::ConfigError))
}

/// Map client errors onto semantic exit codes
pub fn exit_code_for(err: &TmdbError) -> ExitCode {
    match err {
        TmdbError::NotFound => ExitCode::NotFound,
        TmdbError::Unauthorized => ExitCode::ConfigError,
        TmdbError::InvalidResponse(_) => ExitCode::Error,
        TmdbError::RateLimited | TmdbError::Status(_) | TmdbError::RequestFailed(_) => {
            ExitCode::NetworkError
        }
    }
}

/// Exit code for a fatal error from interactive mode, matching the CLI
pub fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<ConfigError>().is_some() || err.downcast_ref::<StoreError>().is_some() {
        ExitCode::ConfigError
    } else if let Some(e) = err.downcast_ref::<TmdbError>() {
        exit_code_for(e)
    } else {
        ExitCode::Error
    }
}

/// One human-readable line per item: id, title, year, rating
pub fn format_row(item: &impl ContentItem, label: &str) -> String {
    let mut line = format!("{:>8}  {}", item.id(), item.display_title());
    if let Some(year) = item.year() {
        line.push_str(&format!(" ({})", year));
    }
    if !label.is_empty() {
        line.push_str(&format!("  [{}]", label));
    }
    if let Some(vote) = item.vote_average() {
        line.push_str(&format!("  ★ {:.1}", vote));
    }
    line
}

fn print_rows<T: Serialize + ContentItem>(
    items: &[T],
    label: impl Fn(&T) -> String,
    output: &Output,
) -> ExitCode {
    let result = output.print_or(items, || {
        if items.is_empty() {
            "No results".to_string()
        } else {
            items
                .iter()
                .map(|item| format_row(item, &label(item)))
                .collect::<Vec<_>>()
                .join("\n")
        }
    });
    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Movies / TV Commands
// =============================================================================

pub async fn movies_cmd(cmd: MoviesCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };
    let list = MovieList::from(cmd.list);
    output.info(format!("Fetching {}...", list.title()));

    match client.movies(list).await {
        Ok(mut movies) => {
            movies.truncate(cmd.limit);
            print_rows(&movies, |_| String::new(), output)
        }
        Err(e) => output.error(format!("{} failed: {}", list.title(), e), exit_code_for(&e)),
    }
}

pub async fn tv_cmd(cmd: TvCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };
    let list = TvList::from(cmd.list);
    output.info(format!("Fetching {}...", list.title()));

    match client.tv_shows(list).await {
        Ok(mut shows) => {
            shows.truncate(cmd.limit);
            print_rows(&shows, |_| String::new(), output)
        }
        Err(e) => output.error(format!("{} failed: {}", list.title(), e), exit_code_for(&e)),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let query = cmd.query.trim();
    if query.is_empty() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }
    let client = match tmdb_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info(format!("Searching for: {}", query));

    match client.search_multi(query).await {
        Ok(response) => {
            let mut results = response.results;
            debug!(total = response.total_results, "Search finished");

            if let Some(filter) = cmd.media_type {
                let wanted = MediaType::from(filter);
                results.retain(|r| r.kind() == Some(wanted));
            }
            results.truncate(cmd.limit);

            print_rows(
                &results,
                |r| Content::from(r.clone()).type_label(),
                output,
            )
        }
        Err(e) => output.error(format!("Search failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Trailer Command
// =============================================================================

pub async fn trailer_cmd(cmd: TrailerCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };
    let kind = MediaType::from(cmd.media_type);

    match client.trailer_url(kind, cmd.id).await {
        Ok(Some(url)) => {
            let response = TrailerResponse {
                media_type: kind,
                id: cmd.id,
                url: url.clone(),
            };
            match output.print_or(response, || url) {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
        Ok(None) => output.error(
            format!("No YouTube trailer for {} {}", kind.path_segment(), cmd.id),
            ExitCode::NotFound,
        ),
        Err(e) => output.error(format!("Trailer lookup failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Favorites Command
// =============================================================================

pub async fn favorites_cmd(cmd: FavoritesCmd, config: &Config, output: &Output) -> ExitCode {
    let store = match store_or_exit(config, output) {
        Ok(store) => store,
        Err(code) => return code,
    };
    let mut favorites = FavoritesStore::load(store);

    match cmd.action {
        FavoritesAction::List(list) => {
            let items = favorites.select(FavoritesFilter::from(list.filter));
            print_rows(&items, |c| c.type_label(), output)
        }
        FavoritesAction::Add(target) => favorite_add(target, config, &mut favorites, output).await,
        FavoritesAction::Remove(target) => favorite_remove(target, &mut favorites, output),
    }
}

async fn favorite_add(
    target: FavoriteTarget,
    config: &Config,
    favorites: &mut FavoritesStore<FileStore>,
    output: &Output,
) -> ExitCode {
    let Some((kind, id)) = target.target() else {
        return output.error("Pass exactly one of --movie or --tv", ExitCode::InvalidArgs);
    };
    let client = match tmdb_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let fetched: Result<Content, TmdbError> = match kind {
        MediaType::Movie => client.movie(id).await.map(Content::from),
        MediaType::Tv => client.tv_show(id).await.map(Content::from),
    };
    let content = match fetched {
        Ok(content) => content,
        Err(e) => {
            return output.error(
                format!("Could not fetch {} {}: {}", kind.path_segment(), id, e),
                exit_code_for(&e),
            )
        }
    };

    let status = if favorites.is_content_favorite(&content) {
        "unchanged"
    } else {
        favorites.add_content(content.clone());
        "added"
    };
    let change = FavoriteChange {
        status,
        media_type: kind,
        id,
        title: Some(content.display_title().to_string()),
    };
    let human = format!("{}: {}", status, format_row(&content, &content.type_label()));
    match output.print_or(change, || human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn favorite_remove(
    target: FavoriteTarget,
    favorites: &mut FavoritesStore<FileStore>,
    output: &Output,
) -> ExitCode {
    let Some((kind, id)) = target.target() else {
        return output.error("Pass exactly one of --movie or --tv", ExitCode::InvalidArgs);
    };

    let in_list = match kind {
        MediaType::Movie => favorites.is_movie_favorite(id),
        MediaType::Tv => favorites.is_tv_show_favorite(id),
    };
    let in_search = favorites
        .search_results()
        .iter()
        .any(|r| r.id == id && r.kind() == Some(kind));

    if !in_list && !in_search {
        return output.error(
            format!("{} {} is not a favorite", kind.path_segment(), id),
            ExitCode::NotFound,
        );
    }

    match kind {
        MediaType::Movie => favorites.remove_movie(id),
        MediaType::Tv => favorites.remove_tv_show(id),
    }
    if in_search {
        favorites.remove_search_result(id);
    }

    let change = FavoriteChange {
        status: "removed",
        media_type: kind,
        id,
        title: None,
    };
    match output.print_or(change, || format!("removed {} {}", kind.path_segment(), id)) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Theme Command
// =============================================================================

pub async fn theme_cmd(cmd: ThemeCmd, config: &Config, output: &Output) -> ExitCode {
    let mut store = match store_or_exit(config, output) {
        Ok(store) => store,
        Err(code) => return code,
    };
    let mut pref = ThemePreference::load(&store);
    if cmd.toggle {
        pref.toggle(&mut store);
    }

    let status = ThemeStatus {
        is_dark_mode: pref.is_dark_mode,
        theme: pref.label(),
    };
    match output.print_or(status, || pref.label().to_string()) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}
