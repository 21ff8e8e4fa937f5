//! UI rendering tests
//!
//! Draw the whole app into a `TestBackend` and check what lands on screen:
//! tabs, lists, empty states, the search modal and the theme palette.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use tmdbsurfer::api::{MovieList, TvList};
use tmdbsurfer::app::App;
use tmdbsurfer::favorites::FavoritesStore;
use tmdbsurfer::models::{Movie, SearchResult, TvShow};
use tmdbsurfer::service::ContentUpdate;
use tmdbsurfer::store::MemoryStore;
use tmdbsurfer::ui::{self, Theme};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn app() -> App<MemoryStore> {
    App::new(FavoritesStore::load(MemoryStore::new()))
}

fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: Some(title.into()),
        overview: Some("A film".into()),
        poster_path: None,
        release_date: Some("2021-09-15".into()),
        vote_average: Some(7.9),
        name: None,
    }
}

fn show(id: u64, name: &str) -> TvShow {
    TvShow {
        id,
        name: Some(name.into()),
        overview: None,
        poster_path: None,
        first_air_date: Some("2016-07-15".into()),
        vote_average: Some(8.6),
        title: None,
    }
}

/// Render and return the screen as one string per row
fn render(app: &App<MemoryStore>, width: u16, height: u16) -> (Vec<String>, Terminal<TestBackend>) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let rows = (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol().to_string()).collect())
        .collect();
    (rows, terminal)
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_renders_at_small_and_large_sizes() {
    let app = app();
    for (w, h) in [(80, 24), (200, 50)] {
        let (rows, _) = render(&app, w, h);
        assert!(screen_contains(&rows, "1 Movies"), "tabs at {}x{}", w, h);
        assert!(screen_contains(&rows, "3 Favorites"));
    }
}

#[test]
fn test_movie_tab_shows_three_sections() {
    let mut app = app();
    app.apply_update(ContentUpdate::Movies(
        MovieList::Popular,
        vec![movie(1, "Dune"), movie(2, "Arrival")],
    ));

    let (rows, _) = render(&app, 150, 20);
    assert!(screen_contains(&rows, "Popular Movies (1/2)"));
    assert!(screen_contains(&rows, "Top Rated Movies"));
    assert!(screen_contains(&rows, "Now Playing"));
    assert!(screen_contains(&rows, "Dune (2021)"));
    // Lists still in flight show a placeholder
    assert!(screen_contains(&rows, "Loading..."));
}

#[test]
fn test_tv_tab_titles() {
    let mut app = app();
    app.apply_update(ContentUpdate::TvShows(TvList::OnTheAir, vec![show(66732, "Stranger Things")]));
    app.handle_key(key(KeyCode::Char('2')));

    let (rows, _) = render(&app, 150, 20);
    assert!(screen_contains(&rows, "Popular TV Shows"));
    assert!(screen_contains(&rows, "Top Rated TV Shows"));
    assert!(screen_contains(&rows, "On The Air"));
    assert!(screen_contains(&rows, "Stranger Things"));
}

// =============================================================================
// Favorites Tests
// =============================================================================

#[test]
fn test_empty_favorites_message() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('3')));

    let (rows, _) = render(&app, 100, 24);
    assert!(screen_contains(&rows, "No Favorites Yet"));
    assert!(screen_contains(&rows, "TV Shows"));
}

#[test]
fn test_favorites_list_shows_type_badges() {
    let mut app = app();
    app.favorites.add_movie(movie(1, "Dune"));
    app.favorites.add_tv_show(show(2, "Dark"));
    app.handle_key(key(KeyCode::Char('3')));

    let (rows, _) = render(&app, 100, 24);
    assert!(screen_contains(&rows, "♥ Dune"));
    assert!(screen_contains(&rows, "[Movie]"));
    assert!(screen_contains(&rows, "[TV Show]"));
}

// =============================================================================
// Search Modal Tests
// =============================================================================

#[test]
fn test_search_prompt_then_searching() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('/')));
    let (rows, _) = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Search for something..."));

    app.handle_key(key(KeyCode::Char('x')));
    let (rows, _) = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Searching..."));
    assert!(screen_contains(&rows, "INSERT"));
}

#[test]
fn test_search_no_results_and_results() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('/')));
    app.handle_key(key(KeyCode::Char('z')));
    app.apply_update(ContentUpdate::SearchResults {
        query: "z".into(),
        results: vec![],
    });
    let (rows, _) = render(&app, 100, 30);
    assert!(screen_contains(&rows, "No results found"));

    app.handle_key(key(KeyCode::Char('z')));
    app.apply_update(ContentUpdate::SearchResults {
        query: "zz".into(),
        results: vec![SearchResult {
            id: 9,
            title: None,
            name: Some("Zorro".into()),
            overview: None,
            poster_path: None,
            release_date: None,
            first_air_date: Some("1957-10-10".into()),
            vote_average: Some(7.0),
            media_type: Some("tv".into()),
        }],
    });
    let (rows, _) = render(&app, 100, 30);
    assert!(screen_contains(&rows, "Zorro (1957)"));
    assert!(screen_contains(&rows, "[Tv]"));
}

// =============================================================================
// Detail + Theme Tests
// =============================================================================

#[test]
fn test_detail_view_from_list() {
    let mut app = app();
    app.apply_update(ContentUpdate::Movies(MovieList::Popular, vec![movie(1, "Dune")]));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('f')));

    let (rows, _) = render(&app, 100, 24);
    assert!(screen_contains(&rows, "[Movie]"));
    assert!(screen_contains(&rows, "2021-09-15"));
    assert!(screen_contains(&rows, "♥ yes"));
    assert!(screen_contains(&rows, "press v to look up"));
}

#[test]
fn test_theme_toggle_switches_palette() {
    let mut app = app();
    let (_, terminal) = render(&app, 80, 24);
    let light_bg = terminal.backend().buffer()[(40, 12)].bg;
    assert_eq!(light_bg, Theme::light().background);

    app.handle_key(key(KeyCode::Char('t')));
    let (rows, terminal) = render(&app, 80, 24);
    let dark_bg = terminal.backend().buffer()[(40, 12)].bg;
    assert_eq!(dark_bg, Theme::dark().background);
    assert!(screen_contains(&rows, "dark"));
}
