//! Content-fetch service
//!
//! Every request runs as its own tokio task and reports back through an
//! unbounded channel. The UI loop drains the channel and folds each
//! [`ContentUpdate`] into [`ContentState`]. Failures are logged and dropped:
//! a failed list fetch leaves the previous list in place.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::api::{MovieList, TmdbClient, TvList};
use crate::models::{MediaType, Movie, SearchResult, TvShow};

/// Completed request, ready to be applied on the UI side
#[derive(Debug, Clone, PartialEq)]
pub enum ContentUpdate {
    Movies(MovieList, Vec<Movie>),
    TvShows(TvList, Vec<TvShow>),
    SearchResults {
        query: String,
        results: Vec<SearchResult>,
    },
    SearchFailed {
        query: String,
    },
    Trailer {
        kind: MediaType,
        id: u64,
        url: Option<String>,
    },
}

/// Dispatches fire-and-forget TMDB requests
#[derive(Clone)]
pub struct ContentService {
    client: Arc<TmdbClient>,
    updates: UnboundedSender<ContentUpdate>,
}

impl ContentService {
    /// Create a service and the receiving end of its update channel
    pub fn new(client: TmdbClient) -> (Self, UnboundedReceiver<ContentUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                client: Arc::new(client),
                updates: tx,
            },
            rx,
        )
    }

    fn publish(updates: &UnboundedSender<ContentUpdate>, update: ContentUpdate) {
        // Receiver gone means the UI is shutting down
        let _ = updates.send(update);
    }

    pub fn fetch_all_content(&self) {
        self.fetch_movies();
        self.fetch_tv_shows();
    }

    pub fn fetch_movies(&self) {
        for list in MovieList::ALL {
            let client = Arc::clone(&self.client);
            let updates = self.updates.clone();
            tokio::spawn(async move {
                match client.movies(list).await {
                    Ok(movies) => {
                        debug!(endpoint = list.endpoint(), count = movies.len(), "Fetched movies");
                        Self::publish(&updates, ContentUpdate::Movies(list, movies));
                    }
                    Err(e) => warn!("Error fetching {}: {}", list.endpoint(), e),
                }
            });
        }
    }

    pub fn fetch_tv_shows(&self) {
        for list in TvList::ALL {
            let client = Arc::clone(&self.client);
            let updates = self.updates.clone();
            tokio::spawn(async move {
                match client.tv_shows(list).await {
                    Ok(shows) => {
                        debug!(endpoint = list.endpoint(), count = shows.len(), "Fetched TV shows");
                        Self::publish(&updates, ContentUpdate::TvShows(list, shows));
                    }
                    Err(e) => warn!("Error fetching {}: {}", list.endpoint(), e),
                }
            });
        }
    }

    /// Start a multi-search. Callers clear state for empty queries
    /// themselves (see [`ContentState::begin_search`]).
    pub fn search_content(&self, query: String) {
        if query.is_empty() {
            return;
        }
        let client = Arc::clone(&self.client);
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let update = match client.search_multi(&query).await {
                Ok(response) => ContentUpdate::SearchResults {
                    query,
                    results: response.results,
                },
                Err(e) => {
                    warn!("Error searching {:?}: {}", query, e);
                    ContentUpdate::SearchFailed { query }
                }
            };
            Self::publish(&updates, update);
        });
    }

    pub fn request_trailer(&self, kind: MediaType, id: u64) {
        let client = Arc::clone(&self.client);
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let url = match client.trailer_url(kind, id).await {
                Ok(url) => url,
                Err(e) => {
                    warn!("Error fetching trailer for {} {}: {}", kind.path_segment(), id, e);
                    None
                }
            };
            Self::publish(&updates, ContentUpdate::Trailer { kind, id, url });
        });
    }
}

// =============================================================================
// Observable State
// =============================================================================

/// Lists and search state rendered by the UI
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    pub popular_movies: Vec<Movie>,
    pub top_rated_movies: Vec<Movie>,
    pub now_playing_movies: Vec<Movie>,

    pub popular_tv_shows: Vec<TvShow>,
    pub top_rated_tv_shows: Vec<TvShow>,
    pub on_the_air_tv_shows: Vec<TvShow>,

    pub search_query: String,
    pub search_results: Vec<SearchResult>,
    pub is_searching: bool,
}

impl ContentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self, list: MovieList) -> &[Movie] {
        match list {
            MovieList::Popular => &self.popular_movies,
            MovieList::TopRated => &self.top_rated_movies,
            MovieList::NowPlaying => &self.now_playing_movies,
        }
    }

    pub fn tv_shows(&self, list: TvList) -> &[TvShow] {
        match list {
            TvList::Popular => &self.popular_tv_shows,
            TvList::TopRated => &self.top_rated_tv_shows,
            TvList::OnTheAir => &self.on_the_air_tv_shows,
        }
    }

    /// Record a new query. Returns `true` when a request should be sent;
    /// an empty query clears the results instead.
    pub fn begin_search(&mut self, query: &str) -> bool {
        self.search_query = query.to_string();
        if query.is_empty() {
            self.search_results.clear();
            self.is_searching = false;
            return false;
        }
        self.is_searching = true;
        true
    }

    pub fn reset_search(&mut self) {
        self.search_query.clear();
        self.search_results.clear();
        self.is_searching = false;
    }

    /// Fold a completed request into the state.
    /// Search responses for a superseded query are ignored.
    pub fn apply(&mut self, update: ContentUpdate) {
        match update {
            ContentUpdate::Movies(list, movies) => match list {
                MovieList::Popular => self.popular_movies = movies,
                MovieList::TopRated => self.top_rated_movies = movies,
                MovieList::NowPlaying => self.now_playing_movies = movies,
            },
            ContentUpdate::TvShows(list, shows) => match list {
                TvList::Popular => self.popular_tv_shows = shows,
                TvList::TopRated => self.top_rated_tv_shows = shows,
                TvList::OnTheAir => self.on_the_air_tv_shows = shows,
            },
            ContentUpdate::SearchResults { query, results } => {
                if query == self.search_query {
                    self.search_results = results;
                    self.is_searching = false;
                } else {
                    debug!("Dropping stale results for {:?}", query);
                }
            }
            ContentUpdate::SearchFailed { query } => {
                if query == self.search_query {
                    self.is_searching = false;
                }
            }
            // Trailers belong to the detail view
            ContentUpdate::Trailer { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: Some(format!("Movie {}", id)),
            overview: None,
            poster_path: None,
            release_date: None,
            vote_average: None,
            name: None,
        }
    }

    fn result(id: u64) -> SearchResult {
        SearchResult {
            id,
            title: Some("Hit".into()),
            name: None,
            overview: None,
            poster_path: None,
            release_date: None,
            first_air_date: None,
            vote_average: None,
            media_type: Some("movie".into()),
        }
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = ContentState::new();
        assert!(state.popular_movies.is_empty());
        assert!(state.search_results.is_empty());
        assert!(!state.is_searching);
    }

    #[test]
    fn test_apply_movie_lists() {
        let mut state = ContentState::new();
        state.apply(ContentUpdate::Movies(MovieList::TopRated, vec![movie(1), movie(2)]));
        assert_eq!(state.movies(MovieList::TopRated).len(), 2);
        assert!(state.movies(MovieList::Popular).is_empty());
    }

    #[test]
    fn test_empty_query_clears_without_request() {
        let mut state = ContentState::new();
        state.search_results = vec![result(1)];
        assert!(!state.begin_search(""));
        assert!(state.search_results.is_empty());
        assert!(!state.is_searching);
    }

    #[test]
    fn test_search_lifecycle() {
        let mut state = ContentState::new();
        assert!(state.begin_search("batman"));
        assert!(state.is_searching);

        state.apply(ContentUpdate::SearchResults {
            query: "batman".into(),
            results: vec![result(1)],
        });
        assert!(!state.is_searching);
        assert_eq!(state.search_results.len(), 1);
    }

    #[test]
    fn test_stale_search_results_dropped() {
        let mut state = ContentState::new();
        state.begin_search("bat");
        state.begin_search("batman");

        state.apply(ContentUpdate::SearchResults {
            query: "bat".into(),
            results: vec![result(9)],
        });
        assert!(state.is_searching);
        assert!(state.search_results.is_empty());
    }

    #[test]
    fn test_search_failure_clears_flag() {
        let mut state = ContentState::new();
        state.begin_search("x");
        state.apply(ContentUpdate::SearchFailed { query: "x".into() });
        assert!(!state.is_searching);
    }

    #[test]
    fn test_reset_search() {
        let mut state = ContentState::new();
        state.begin_search("x");
        state.reset_search();
        assert!(!state.is_searching);
        assert!(state.search_query.is_empty());
    }
}
