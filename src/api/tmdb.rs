//! TMDB (The Movie Database) API client
//!
//! Lists, multi-search, single records and trailer lookup for movies and
//! TV shows. The API key travels as the `api_key` query parameter.
//! API docs: https://developer.themoviedb.org/docs

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    ContentResponse, MediaType, Movie, SearchResponse, SearchResult, TvShow, Video, VideoResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Invalid API key (401)")]
    Unauthorized,

    #[error("Rate limited (429)")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

pub type TmdbResult<T> = std::result::Result<T, TmdbError>;

/// Fixed list endpoints for movies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    TopRated,
    NowPlaying,
}

impl MovieList {
    pub const ALL: [MovieList; 3] = [MovieList::Popular, MovieList::TopRated, MovieList::NowPlaying];

    pub fn endpoint(&self) -> &'static str {
        match self {
            MovieList::Popular => "movie/popular",
            MovieList::TopRated => "movie/top_rated",
            MovieList::NowPlaying => "movie/now_playing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MovieList::Popular => "Popular Movies",
            MovieList::TopRated => "Top Rated Movies",
            MovieList::NowPlaying => "Now Playing",
        }
    }
}

/// Fixed list endpoints for TV shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvList {
    Popular,
    TopRated,
    OnTheAir,
}

impl TvList {
    pub const ALL: [TvList; 3] = [TvList::Popular, TvList::TopRated, TvList::OnTheAir];

    pub fn endpoint(&self) -> &'static str {
        match self {
            TvList::Popular => "tv/popular",
            TvList::TopRated => "tv/top_rated",
            TvList::OnTheAir => "tv/on_the_air",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TvList::Popular => "Popular TV Shows",
            TvList::TopRated => "Top Rated TV Shows",
            TvList::OnTheAir => "On The Air",
        }
    }
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// `{base}/{endpoint}?api_key={key}` plus extra percent-encoded params
    pub fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?api_key={}",
            self.base_url,
            endpoint.trim_start_matches('/'),
            urlencoding::encode(&self.api_key)
        );
        for (k, v) in params {
            url.push('&');
            url.push_str(k);
            url.push('=');
            url.push_str(&urlencoding::encode(v));
        }
        url
    }

    /// Single-shot GET + JSON decode, no retries
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> TmdbResult<T> {
        let url = self.endpoint_url(endpoint, params);
        debug!(endpoint, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| {
                    TmdbError::InvalidResponse(format!("JSON parse error in {}: {}", endpoint, e))
                })
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(TmdbError::RateLimited),
            status => Err(TmdbError::Status(status.as_u16())),
        }
    }

    /// Fetch any `{"results": [...]}` list endpoint
    pub async fn fetch_content<T: DeserializeOwned>(&self, endpoint: &str) -> TmdbResult<Vec<T>> {
        let response: ContentResponse<T> = self.get(endpoint, &[]).await?;
        Ok(response.results)
    }

    pub async fn movies(&self, list: MovieList) -> TmdbResult<Vec<Movie>> {
        self.fetch_content(list.endpoint()).await
    }

    pub async fn tv_shows(&self, list: TvList) -> TmdbResult<Vec<TvShow>> {
        self.fetch_content(list.endpoint()).await
    }

    pub async fn popular_movies(&self) -> TmdbResult<Vec<Movie>> {
        self.movies(MovieList::Popular).await
    }

    pub async fn top_rated_movies(&self) -> TmdbResult<Vec<Movie>> {
        self.movies(MovieList::TopRated).await
    }

    pub async fn now_playing_movies(&self) -> TmdbResult<Vec<Movie>> {
        self.movies(MovieList::NowPlaying).await
    }

    pub async fn popular_tv_shows(&self) -> TmdbResult<Vec<TvShow>> {
        self.tv_shows(TvList::Popular).await
    }

    pub async fn top_rated_tv_shows(&self) -> TmdbResult<Vec<TvShow>> {
        self.tv_shows(TvList::TopRated).await
    }

    pub async fn on_the_air_tv_shows(&self) -> TmdbResult<Vec<TvShow>> {
        self.tv_shows(TvList::OnTheAir).await
    }

    /// Search movies, TV shows and people in one request
    pub async fn search_multi(&self, query: &str) -> TmdbResult<SearchResponse<SearchResult>> {
        self.get("search/multi", &[("query", query)]).await
    }

    /// Get a single movie by TMDB id
    pub async fn movie(&self, id: u64) -> TmdbResult<Movie> {
        self.get(&format!("movie/{}", id), &[]).await
    }

    /// Get a single TV show by TMDB id
    pub async fn tv_show(&self, id: u64) -> TmdbResult<TvShow> {
        self.get(&format!("tv/{}", id), &[]).await
    }

    /// Videos attached to a movie or show
    pub async fn videos(&self, kind: MediaType, id: u64) -> TmdbResult<Vec<Video>> {
        let endpoint = format!("{}/{}/videos", kind.path_segment(), id);
        let response: VideoResponse = self.get(&endpoint, &[]).await?;
        Ok(response.results)
    }

    /// YouTube trailer URL for a movie or show, if one exists
    pub async fn trailer_url(&self, kind: MediaType, id: u64) -> TmdbResult<Option<String>> {
        let videos = self.videos(kind, id).await?;
        Ok(select_trailer(&videos))
    }

    pub async fn movie_trailer_url(&self, id: u64) -> TmdbResult<Option<String>> {
        self.trailer_url(MediaType::Movie, id).await
    }

    pub async fn tv_trailer_url(&self, id: u64) -> TmdbResult<Option<String>> {
        self.trailer_url(MediaType::Tv, id).await
    }
}

/// First YouTube video typed "Trailer", as a watch URL
pub fn select_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
        .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, video_type: &str) -> Video {
        Video {
            key: key.into(),
            name: key.into(),
            site: site.into(),
            video_type: video_type.into(),
        }
    }

    #[test]
    fn test_endpoint_url_includes_key_and_params() {
        let client = TmdbClient::with_base_url("abc", "https://example.test/3/");
        assert_eq!(
            client.endpoint_url("movie/popular", &[]),
            "https://example.test/3/movie/popular?api_key=abc"
        );
        assert_eq!(
            client.endpoint_url("/search/multi", &[("query", "the batman")]),
            "https://example.test/3/search/multi?api_key=abc&query=the%20batman"
        );
    }

    #[test]
    fn test_movie_trailer_endpoint() {
        let client = TmdbClient::new("k");
        assert_eq!(
            client.endpoint_url("movie/12345/videos", &[]),
            "https://api.themoviedb.org/3/movie/12345/videos?api_key=k"
        );
    }

    #[test]
    fn test_select_trailer_prefers_youtube_trailer() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser"),
            video("vimeo", "Vimeo", "Trailer"),
            video("yt1", "YouTube", "Trailer"),
            video("yt2", "YouTube", "Trailer"),
        ];
        assert_eq!(
            select_trailer(&videos).as_deref(),
            Some("https://www.youtube.com/watch?v=yt1")
        );
    }

    #[test]
    fn test_select_trailer_none() {
        let videos = vec![video("teaser", "YouTube", "Teaser")];
        assert!(select_trailer(&videos).is_none());
        assert!(select_trailer(&[]).is_none());
    }

    #[test]
    fn test_list_endpoints() {
        assert_eq!(MovieList::NowPlaying.endpoint(), "movie/now_playing");
        assert_eq!(TvList::OnTheAir.endpoint(), "tv/on_the_air");
        assert_eq!(TvList::OnTheAir.title(), "On The Air");
    }
}
