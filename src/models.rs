//! Data structures and types for tmdbsurfer
//!
//! Contains all shared models used across the application organized by domain:
//! - **Content**: movies, TV shows and multi-search results from TMDB
//! - **Envelopes**: list, search and video response wrappers
//! - **Favorites**: the owned `Content` enum stored in the favorites lists

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL for poster images (w500 rendition)
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Build the full poster URL for a poster path
///
/// Returns `None` when there is no path. Otherwise the path is appended to
/// [`IMAGE_BASE_URL`] as-is (TMDB paths already start with `/`).
pub fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| format!("{}{}", IMAGE_BASE_URL, path))
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    if date.len() >= 4 {
        date.get(..4)?.parse().ok()
    } else {
        None
    }
}

// =============================================================================
// Media Type
// =============================================================================

/// Media type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Parse the `media_type` discriminator used by TMDB multi-search
    pub fn from_discriminator(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }

    /// Path segment used by TMDB endpoints (`movie/...`, `tv/...`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

// =============================================================================
// Content Items
// =============================================================================

/// Common read-only view over movies, TV shows and search results
pub trait ContentItem {
    fn id(&self) -> u64;
    fn title(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn overview(&self) -> Option<&str>;
    fn poster_path(&self) -> Option<&str>;
    /// Release date for movies, first air date for TV
    fn release_date(&self) -> Option<&str>;
    fn vote_average(&self) -> Option<f64>;

    /// Title, falling back to name, falling back to empty
    fn display_title(&self) -> &str {
        self.title().or_else(|| self.name()).unwrap_or("")
    }

    fn full_poster_url(&self) -> Option<String> {
        poster_url(self.poster_path())
    }

    fn year(&self) -> Option<u16> {
        self.release_date().and_then(extract_year)
    }
}

/// Movie record as returned by the `movie/*` list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ContentItem for Movie {
    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }
    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
    fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }
    fn vote_average(&self) -> Option<f64> {
        self.vote_average
    }
}

/// TV show record as returned by the `tv/*` list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ContentItem for TvShow {
    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }
    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
    fn release_date(&self) -> Option<&str> {
        self.first_air_date.as_deref()
    }
    fn vote_average(&self) -> Option<f64> {
        self.vote_average
    }
}

/// Result from TMDB multi-search
///
/// Movies use `title`/`release_date`, TV uses `name`/`first_air_date`.
/// `media_type` is kept verbatim so `person` results survive a round trip
/// through the favorites store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub media_type: Option<String>,
}

impl SearchResult {
    pub fn is_movie(&self) -> bool {
        self.media_type.as_deref() == Some("movie")
    }

    pub fn is_tv_show(&self) -> bool {
        self.media_type.as_deref() == Some("tv")
    }

    /// Typed discriminator, `None` for people and unknown kinds
    pub fn kind(&self) -> Option<MediaType> {
        self.media_type
            .as_deref()
            .and_then(MediaType::from_discriminator)
    }
}

impl ContentItem for SearchResult {
    fn id(&self) -> u64 {
        self.id
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }
    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
    fn release_date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }
    fn vote_average(&self) -> Option<f64> {
        self.vote_average
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        match self.kind() {
            Some(kind) => write!(f, "{}{} [{}]", self.display_title(), year_str, kind),
            None => write!(f, "{}{}", self.display_title(), year_str),
        }
    }
}

// =============================================================================
// Owned Content (favorites, detail view)
// =============================================================================

/// Any of the three content records, owned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Movie(Movie),
    TvShow(TvShow),
    SearchResult(SearchResult),
}

impl Content {
    fn inner(&self) -> &dyn ContentItem {
        match self {
            Content::Movie(m) => m,
            Content::TvShow(t) => t,
            Content::SearchResult(r) => r,
        }
    }

    /// Media type this item resolves to, if any
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            Content::Movie(_) => Some(MediaType::Movie),
            Content::TvShow(_) => Some(MediaType::Tv),
            Content::SearchResult(r) => r.kind(),
        }
    }

    /// Badge shown next to favorites ("Movie", "TV Show", capitalized media type)
    pub fn type_label(&self) -> String {
        match self {
            Content::Movie(_) => "Movie".to_string(),
            Content::TvShow(_) => "TV Show".to_string(),
            Content::SearchResult(r) => r
                .media_type
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(capitalize)
                .unwrap_or_else(|| "Content".to_string()),
        }
    }
}

impl ContentItem for Content {
    fn id(&self) -> u64 {
        self.inner().id()
    }
    fn title(&self) -> Option<&str> {
        self.inner().title()
    }
    fn name(&self) -> Option<&str> {
        self.inner().name()
    }
    fn overview(&self) -> Option<&str> {
        self.inner().overview()
    }
    fn poster_path(&self) -> Option<&str> {
        self.inner().poster_path()
    }
    fn release_date(&self) -> Option<&str> {
        self.inner().release_date()
    }
    fn vote_average(&self) -> Option<f64> {
        self.inner().vote_average()
    }
}

impl From<Movie> for Content {
    fn from(m: Movie) -> Self {
        Content::Movie(m)
    }
}

impl From<TvShow> for Content {
    fn from(t: TvShow) -> Self {
        Content::TvShow(t)
    }
}

impl From<SearchResult> for Content {
    fn from(r: SearchResult) -> Self {
        Content::SearchResult(r)
    }
}

/// "movie" -> "Movie"
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Wrapper for the list endpoints (`{"results": [...]}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse<T> {
    pub results: Vec<T>,
}

/// Wrapper for search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Video attached to a movie or TV show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResponse {
    pub results: Vec<Video>,
}
