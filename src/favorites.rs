//! Favorites collection
//!
//! Three independent lists (movies, TV shows, search results), each keyed
//! by TMDB id and persisted as a JSON array under its own store key.
//! Adding an id that is already present does nothing, so no list ever
//! holds duplicates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{Content, ContentItem, Movie, SearchResult, TvShow};
use crate::store::KeyValueStore;

pub const MOVIES_KEY: &str = "favoriteMovies";
pub const TV_SHOWS_KEY: &str = "favoriteTVShows";
pub const SEARCH_RESULTS_KEY: &str = "favoriteSearchResults";

/// Which favorites to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesFilter {
    #[default]
    All,
    Movies,
    TvShows,
}

impl FavoritesFilter {
    pub const ALL: [FavoritesFilter; 3] = [
        FavoritesFilter::All,
        FavoritesFilter::Movies,
        FavoritesFilter::TvShows,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FavoritesFilter::All => "All",
            FavoritesFilter::Movies => "Movies",
            FavoritesFilter::TvShows => "TV Shows",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FavoritesFilter::All => FavoritesFilter::Movies,
            FavoritesFilter::Movies => FavoritesFilter::TvShows,
            FavoritesFilter::TvShows => FavoritesFilter::All,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FavoritesFilter::All => FavoritesFilter::TvShows,
            FavoritesFilter::Movies => FavoritesFilter::All,
            FavoritesFilter::TvShows => FavoritesFilter::Movies,
        }
    }
}

/// User favorites backed by a key-value store
pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    movies: Vec<Movie>,
    tv_shows: Vec<TvShow>,
    search_results: Vec<SearchResult>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load all three lists; missing or undecodable blobs start empty
    pub fn load(store: S) -> Self {
        let movies = load_list(&store, MOVIES_KEY);
        let tv_shows = load_list(&store, TV_SHOWS_KEY);
        let search_results = load_list(&store, SEARCH_RESULTS_KEY);
        debug!(
            movies = movies.len(),
            tv_shows = tv_shows.len(),
            search_results = search_results.len(),
            "Loaded favorites"
        );
        Self {
            store,
            movies,
            tv_shows,
            search_results,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn tv_shows(&self) -> &[TvShow] {
        &self.tv_shows
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    /// Borrow the underlying store (e.g. to share it with the theme flag)
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // -------------------------------------------------------------------------
    // Movies
    // -------------------------------------------------------------------------

    pub fn add_movie(&mut self, movie: Movie) {
        if insert_unique(&mut self.movies, movie) {
            save_list(&mut self.store, MOVIES_KEY, &self.movies);
        }
    }

    pub fn remove_movie(&mut self, id: u64) {
        if remove_by_id(&mut self.movies, id) {
            save_list(&mut self.store, MOVIES_KEY, &self.movies);
        }
    }

    pub fn is_movie_favorite(&self, id: u64) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    // -------------------------------------------------------------------------
    // TV Shows
    // -------------------------------------------------------------------------

    pub fn add_tv_show(&mut self, show: TvShow) {
        if insert_unique(&mut self.tv_shows, show) {
            save_list(&mut self.store, TV_SHOWS_KEY, &self.tv_shows);
        }
    }

    pub fn remove_tv_show(&mut self, id: u64) {
        if remove_by_id(&mut self.tv_shows, id) {
            save_list(&mut self.store, TV_SHOWS_KEY, &self.tv_shows);
        }
    }

    pub fn is_tv_show_favorite(&self, id: u64) -> bool {
        self.tv_shows.iter().any(|t| t.id == id)
    }

    // -------------------------------------------------------------------------
    // Search Results
    // -------------------------------------------------------------------------

    pub fn add_search_result(&mut self, result: SearchResult) {
        if insert_unique(&mut self.search_results, result) {
            save_list(&mut self.store, SEARCH_RESULTS_KEY, &self.search_results);
        }
    }

    pub fn remove_search_result(&mut self, id: u64) {
        if remove_by_id(&mut self.search_results, id) {
            save_list(&mut self.store, SEARCH_RESULTS_KEY, &self.search_results);
        }
    }

    pub fn is_search_result_favorite(&self, id: u64) -> bool {
        self.search_results.iter().any(|r| r.id == id)
    }

    // -------------------------------------------------------------------------
    // Any Content
    // -------------------------------------------------------------------------

    pub fn add_content(&mut self, content: Content) {
        match content {
            Content::Movie(m) => self.add_movie(m),
            Content::TvShow(t) => self.add_tv_show(t),
            Content::SearchResult(r) => self.add_search_result(r),
        }
    }

    pub fn remove_content(&mut self, content: &Content) {
        match content {
            Content::Movie(m) => self.remove_movie(m.id),
            Content::TvShow(t) => self.remove_tv_show(t.id),
            Content::SearchResult(r) => self.remove_search_result(r.id),
        }
    }

    pub fn is_content_favorite(&self, content: &Content) -> bool {
        match content {
            Content::Movie(m) => self.is_movie_favorite(m.id),
            Content::TvShow(t) => self.is_tv_show_favorite(t.id),
            Content::SearchResult(r) => self.is_search_result_favorite(r.id),
        }
    }

    /// Add if absent, remove if present. Returns the new favorite status.
    pub fn toggle(&mut self, content: &Content) -> bool {
        if self.is_content_favorite(content) {
            self.remove_content(content);
            false
        } else {
            self.add_content(content.clone());
            true
        }
    }

    /// Movies, then TV shows, then search results
    pub fn all_favorites(&self) -> Vec<Content> {
        self.movies
            .iter()
            .cloned()
            .map(Content::from)
            .chain(self.tv_shows.iter().cloned().map(Content::from))
            .chain(self.search_results.iter().cloned().map(Content::from))
            .collect()
    }

    pub fn select(&self, filter: FavoritesFilter) -> Vec<Content> {
        match filter {
            FavoritesFilter::All => self.all_favorites(),
            FavoritesFilter::Movies => self.movies.iter().cloned().map(Content::from).collect(),
            FavoritesFilter::TvShows => self.tv_shows.iter().cloned().map(Content::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.tv_shows.len() + self.search_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn insert_unique<T: ContentItem>(list: &mut Vec<T>, item: T) -> bool {
    if list.iter().any(|existing| existing.id() == item.id()) {
        return false;
    }
    list.push(item);
    true
}

fn remove_by_id<T: ContentItem>(list: &mut Vec<T>, id: u64) -> bool {
    let before = list.len();
    list.retain(|item| item.id() != id);
    list.len() != before
}

fn load_list<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Vec<T> {
    let Some(blob) = store.get(key) else {
        return Vec::new();
    };
    serde_json::from_str(&blob).unwrap_or_else(|e| {
        warn!("Discarding undecodable favorites under {}: {}", key, e);
        Vec::new()
    })
}

fn save_list<T: Serialize>(store: &mut impl KeyValueStore, key: &str, list: &[T]) {
    let blob = match serde_json::to_string(list) {
        Ok(blob) => blob,
        Err(e) => {
            warn!("Failed to encode favorites for {}: {}", key, e);
            return;
        }
    };
    if let Err(e) = store.set(key, blob) {
        warn!("Failed to save favorites for {}: {}", key, e);
    }
}
