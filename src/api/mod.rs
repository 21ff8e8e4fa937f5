//! API clients for external services
//!
//! - TMDB: movie/TV lists, multi-search and trailers

pub mod tmdb;

pub use tmdb::{MovieList, TmdbClient, TmdbError, TvList};
