//! Favorites and theme persistence tests
//!
//! Exercise the favorites lists and the dark-mode flag against a real
//! file-backed store in a temp directory.

use tmdbsurfer::favorites::{FavoritesFilter, FavoritesStore, MOVIES_KEY, TV_SHOWS_KEY};
use tmdbsurfer::models::{Content, ContentItem, Movie, SearchResult, TvShow};
use tmdbsurfer::store::{FileStore, KeyValueStore};
use tmdbsurfer::theme::ThemePreference;

fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: Some(title.into()),
        overview: Some("overview".into()),
        poster_path: Some(format!("/{}.jpg", id)),
        release_date: Some("2020-01-01".into()),
        vote_average: Some(7.5),
        name: None,
    }
}

fn show(id: u64, name: &str) -> TvShow {
    TvShow {
        id,
        name: Some(name.into()),
        overview: None,
        poster_path: None,
        first_air_date: Some("2019-05-05".into()),
        vote_average: Some(8.0),
        title: None,
    }
}

fn search_result(id: u64, media_type: &str) -> SearchResult {
    SearchResult {
        id,
        title: Some(format!("Result {}", id)),
        name: None,
        overview: None,
        poster_path: None,
        release_date: None,
        first_air_date: None,
        vote_average: None,
        media_type: Some(media_type.into()),
    }
}

#[test]
fn test_favorites_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut favorites = FavoritesStore::load(FileStore::open(&path));
        favorites.add_movie(movie(1, "Arrival"));
        favorites.add_movie(movie(2, "Dune"));
        favorites.add_tv_show(show(10, "Severance"));
        favorites.add_search_result(search_result(20, "movie"));
    }

    let favorites = FavoritesStore::load(FileStore::open(&path));
    assert_eq!(favorites.movies().len(), 2);
    assert_eq!(favorites.movies()[0].display_title(), "Arrival");
    assert_eq!(favorites.tv_shows()[0].display_title(), "Severance");
    assert!(favorites.is_search_result_favorite(20));
    assert_eq!(favorites.len(), 4);
}

#[test]
fn test_duplicate_add_keeps_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut favorites = FavoritesStore::load(FileStore::open(&path));
    favorites.add_movie(movie(7, "Heat"));
    favorites.add_movie(movie(7, "Heat (again)"));
    assert_eq!(favorites.movies().len(), 1);
    // First write wins
    assert_eq!(favorites.movies()[0].display_title(), "Heat");

    let reloaded = FavoritesStore::load(FileStore::open(&path));
    assert_eq!(reloaded.movies().len(), 1);
}

#[test]
fn test_remove_persists_and_non_member_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut favorites = FavoritesStore::load(FileStore::open(&path));
    favorites.add_tv_show(show(1, "Dark"));
    favorites.add_tv_show(show(2, "Lost"));
    favorites.remove_tv_show(99);
    assert_eq!(favorites.tv_shows().len(), 2);

    favorites.remove_tv_show(1);
    let reloaded = FavoritesStore::load(FileStore::open(&path));
    assert_eq!(reloaded.tv_shows().len(), 1);
    assert_eq!(reloaded.tv_shows()[0].id, 2);
}

#[test]
fn test_lists_are_stored_as_json_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut favorites = FavoritesStore::load(FileStore::open(&path));
    favorites.add_movie(movie(5, "Alien"));

    let store = FileStore::open(&path);
    let blob = store.get(MOVIES_KEY).unwrap();
    let decoded: Vec<Movie> = serde_json::from_str(&blob).unwrap();
    assert_eq!(decoded[0].id, 5);
    assert!(store.get(TV_SHOWS_KEY).is_none());
}

#[test]
fn test_all_favorites_order_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let mut favorites = FavoritesStore::load(FileStore::open(dir.path().join("store.json")));
    favorites.add_search_result(search_result(3, "tv"));
    favorites.add_tv_show(show(2, "Fargo"));
    favorites.add_movie(movie(1, "Up"));

    let all = favorites.all_favorites();
    let kinds: Vec<&str> = all
        .iter()
        .map(|c| match c {
            Content::Movie(_) => "movie",
            Content::TvShow(_) => "tv",
            Content::SearchResult(_) => "search",
        })
        .collect();
    assert_eq!(kinds, vec!["movie", "tv", "search"]);

    assert_eq!(favorites.select(FavoritesFilter::All).len(), 3);
    assert_eq!(favorites.select(FavoritesFilter::Movies).len(), 1);
    assert_eq!(favorites.select(FavoritesFilter::TvShows).len(), 1);
}

#[test]
fn test_theme_flag_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path);
    let mut pref = ThemePreference::load(&store);
    assert!(!pref.is_dark_mode);
    pref.toggle(&mut store);

    let reloaded = FileStore::open(&path);
    assert!(ThemePreference::load(&reloaded).is_dark_mode);
}

#[test]
fn test_theme_and_favorites_share_one_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut favorites = FavoritesStore::load(FileStore::open(&path));
    favorites.add_movie(movie(1, "Up"));
    let mut pref = ThemePreference::load(favorites.store());
    pref.toggle(favorites.store_mut());

    let store = FileStore::open(&path);
    assert!(ThemePreference::load(&store).is_dark_mode);
    assert_eq!(FavoritesStore::load(store).movies().len(), 1);
}
