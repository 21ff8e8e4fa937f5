//! App state and core application logic
//!
//! Manages the screen state machine, navigation stack, and per-view
//! selection. Network work is never started here: key handlers queue
//! [`AppAction`]s that the event loop hands to the content service, and
//! completed requests come back through [`App::apply_update`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{MovieList, TvList};
use crate::favorites::{FavoritesFilter, FavoritesStore};
use crate::models::{Content, ContentItem, MediaType};
use crate::service::{ContentState, ContentUpdate};
use crate::store::{FileStore, KeyValueStore};
use crate::theme::ThemePreference;

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Movie lists tab
    #[default]
    Movies,
    /// TV show lists tab
    TvShows,
    /// Favorites tab
    Favorites,
    /// Search modal
    Search,
    /// Detail view for one item
    Detail,
}

impl AppState {
    pub const TABS: [AppState; 3] = [AppState::Movies, AppState::TvShows, AppState::Favorites];

    pub fn is_tab(&self) -> bool {
        Self::TABS.contains(self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppState::Movies => "Movies",
            AppState::TvShows => "TV Shows",
            AppState::Favorites => "Favorites",
            AppState::Search => "Search",
            AppState::Detail => "Details",
        }
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Work for the event loop to dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    FetchAll,
    Search(String),
    FetchTrailer(MediaType, u64),
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// First row to draw in a viewport of `visible_height` rows.
    /// The list stays at the top until the selection runs past the
    /// first screen, then the selection is kept on the bottom row.
    pub fn window_start(&self, visible_height: usize) -> usize {
        if visible_height == 0 || self.selected < visible_height {
            0
        } else {
            self.selected + 1 - visible_height
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// One tab of three horizontal sections (Popular / Top Rated / ...)
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    /// Focused section index (0..3)
    pub section: usize,
    pub lists: [ListState; 3],
}

impl BrowseState {
    pub fn next_section(&mut self) {
        self.section = (self.section + 1) % self.lists.len();
    }

    pub fn prev_section(&mut self) {
        self.section = (self.section + self.lists.len() - 1) % self.lists.len();
    }

    pub fn list(&self) -> &ListState {
        &self.lists[self.section]
    }

    pub fn list_mut(&mut self) -> &mut ListState {
        &mut self.lists[self.section]
    }
}

/// Search modal state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in query (byte offset, always on a char boundary)
    pub cursor: usize,
    /// Results list state
    pub list: ListState,
}

impl SearchState {
    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.query.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.query.len() {
            self.query.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(c) = self.query[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.query[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }
}

/// Trailer lookup progress in the detail view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TrailerState {
    #[default]
    NotRequested,
    Loading,
    Found(String),
    Unavailable,
}

/// Detail view state
#[derive(Debug, Clone)]
pub struct DetailState {
    pub content: Content,
    pub trailer: TrailerState,
}

impl DetailState {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            trailer: TrailerState::NotRequested,
        }
    }
}

/// Favorites tab state
#[derive(Debug, Clone, Default)]
pub struct FavoritesViewState {
    pub filter: FavoritesFilter,
    pub list: ListState,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
pub struct App<S: KeyValueStore = FileStore> {
    /// Current state/screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// One-line feedback shown in the status bar until the next key
    pub notice: Option<String>,

    pub content: ContentState,
    pub favorites: FavoritesStore<S>,
    pub theme: ThemePreference,

    // View-specific states
    pub movies: BrowseState,
    pub tv_shows: BrowseState,
    pub favorites_view: FavoritesViewState,
    pub search: SearchState,
    pub detail: Option<DetailState>,
    /// Detail views still on the navigation stack, oldest first
    detail_stack: Vec<DetailState>,

    actions: Vec<AppAction>,
}

impl<S: KeyValueStore> App<S> {
    /// Create the app over a loaded favorites store; the theme flag is read
    /// from the same store
    pub fn new(favorites: FavoritesStore<S>) -> Self {
        let theme = ThemePreference::load(favorites.store());
        let mut app = Self {
            state: AppState::Movies,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            notice: None,
            content: ContentState::new(),
            favorites,
            theme,
            movies: BrowseState::default(),
            tv_shows: BrowseState::default(),
            favorites_view: FavoritesViewState::default(),
            search: SearchState::default(),
            detail: None,
            detail_stack: Vec::new(),
            actions: Vec::new(),
        };
        app.sync_favorites_len();
        app
    }

    /// Drain queued work for the event loop
    pub fn take_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.actions)
    }

    /// Queue a refresh of all six lists
    pub fn refresh(&mut self) {
        self.actions.push(AppAction::FetchAll);
    }

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.nav_stack.push(self.state);
            self.state = state;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Switch to a top-level tab, dropping the navigation history
    pub fn select_tab(&mut self, tab: AppState) {
        if tab.is_tab() {
            self.nav_stack.clear();
            self.detail_stack.clear();
            self.detail = None;
            self.state = tab;
            self.input_mode = InputMode::Normal;
            if tab == AppState::Favorites {
                self.sync_favorites_len();
            }
        }
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            if self.state == AppState::Detail {
                // Falls back to the detail view underneath, if any
                self.detail = self.detail_stack.pop();
            }
            self.state = prev;
            if prev == AppState::Favorites {
                self.sync_favorites_len();
            }
            true
        } else {
            false
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Open the search modal with the input focused
    pub fn focus_search(&mut self) {
        if self.state != AppState::Search {
            self.navigate(AppState::Search);
        }
        self.input_mode = InputMode::Editing;
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle(self.favorites.store_mut());
    }

    // -------------------------------------------------------------------------
    // Content Access
    // -------------------------------------------------------------------------

    pub fn movie_list(&self) -> MovieList {
        MovieList::ALL[self.movies.section]
    }

    pub fn tv_list(&self) -> TvList {
        TvList::ALL[self.tv_shows.section]
    }

    /// Items shown in the favorites tab under the current filter
    pub fn visible_favorites(&self) -> Vec<Content> {
        self.favorites.select(self.favorites_view.filter)
    }

    /// Item under the cursor in the current view
    pub fn selected_content(&self) -> Option<Content> {
        match self.state {
            AppState::Movies => self
                .content
                .movies(self.movie_list())
                .get(self.movies.list().selected)
                .cloned()
                .map(Content::from),
            AppState::TvShows => self
                .content
                .tv_shows(self.tv_list())
                .get(self.tv_shows.list().selected)
                .cloned()
                .map(Content::from),
            AppState::Favorites => self
                .visible_favorites()
                .into_iter()
                .nth(self.favorites_view.list.selected),
            AppState::Search => self
                .content
                .search_results
                .get(self.search.list.selected)
                .cloned()
                .map(Content::from),
            AppState::Detail => self.detail.as_ref().map(|d| d.content.clone()),
        }
    }

    pub fn is_favorite(&self, content: &Content) -> bool {
        self.favorites.is_content_favorite(content)
    }

    /// Toggle the favorite status of the item under the cursor
    pub fn toggle_selected_favorite(&mut self) {
        let Some(content) = self.selected_content() else {
            return;
        };
        let added = self.favorites.toggle(&content);
        self.notice = Some(if added {
            format!("♥ Added \"{}\" to favorites", content.display_title())
        } else {
            format!("Removed \"{}\" from favorites", content.display_title())
        });
        self.sync_favorites_len();
    }

    /// Open the detail view for the item under the cursor
    pub fn open_detail(&mut self) {
        if self.state == AppState::Detail {
            return;
        }
        if let Some(content) = self.selected_content() {
            if let Some(below) = self.detail.replace(DetailState::new(content)) {
                self.detail_stack.push(below);
            }
            self.navigate(AppState::Detail);
        }
    }

    /// Ask for the trailer of the item in the detail view
    pub fn request_trailer(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        if matches!(detail.trailer, TrailerState::Loading | TrailerState::Found(_)) {
            return;
        }
        match detail.content.media_type() {
            Some(kind) => {
                detail.trailer = TrailerState::Loading;
                self.actions
                    .push(AppAction::FetchTrailer(kind, detail.content.id()));
            }
            None => detail.trailer = TrailerState::Unavailable,
        }
    }

    /// Record a search query and queue the request (or clear on empty)
    fn submit_search(&mut self) {
        self.search.list.reset();
        if self.content.begin_search(&self.search.query) {
            self.actions.push(AppAction::Search(self.search.query.clone()));
        }
        self.search.list.set_len(self.content.search_results.len());
    }

    // -------------------------------------------------------------------------
    // Async Completions
    // -------------------------------------------------------------------------

    /// Fold a finished request into state and re-clamp the affected lists
    pub fn apply_update(&mut self, update: ContentUpdate) {
        match &update {
            ContentUpdate::Movies(list, movies) => {
                let idx = MovieList::ALL.iter().position(|l| l == list).unwrap_or(0);
                self.movies.lists[idx].set_len(movies.len());
            }
            ContentUpdate::TvShows(list, shows) => {
                let idx = TvList::ALL.iter().position(|l| l == list).unwrap_or(0);
                self.tv_shows.lists[idx].set_len(shows.len());
            }
            ContentUpdate::Trailer { kind, id, url } => {
                if let Some(detail) = self.detail.as_mut() {
                    if detail.content.id() == *id && detail.content.media_type() == Some(*kind) {
                        detail.trailer = match url {
                            Some(url) => TrailerState::Found(url.clone()),
                            None => TrailerState::Unavailable,
                        };
                    }
                }
            }
            ContentUpdate::SearchResults { .. } | ContentUpdate::SearchFailed { .. } => {}
        }
        self.content.apply(update);
        self.search.list.set_len(self.content.search_results.len());
    }

    fn sync_favorites_len(&mut self) {
        let len = self.favorites.select(self.favorites_view.filter).len();
        self.favorites_view.list.set_len(len);
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode; every edit re-runs the search
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.submit_search();
                true
            }
            KeyCode::Down => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Char(c)
                if key
                    .modifiers
                    .intersection(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    .is_empty() =>
            {
                self.search.insert(c);
                self.submit_search();
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.submit_search();
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                self.submit_search();
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            KeyCode::Char('1') => {
                self.select_tab(AppState::Movies);
                return true;
            }
            KeyCode::Char('2') => {
                self.select_tab(AppState::TvShows);
                return true;
            }
            KeyCode::Char('3') => {
                self.select_tab(AppState::Favorites);
                return true;
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                return true;
            }
            KeyCode::Char('r') => {
                self.refresh();
                return true;
            }
            KeyCode::Char('f') => {
                self.toggle_selected_favorite();
                return true;
            }
            _ => {}
        }

        match self.state {
            AppState::Movies => Self::handle_browse_key(&mut self.movies, key) || self.handle_open_key(key),
            AppState::TvShows => {
                Self::handle_browse_key(&mut self.tv_shows, key) || self.handle_open_key(key)
            }
            AppState::Favorites => self.handle_favorites_key(key),
            AppState::Search => self.handle_search_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_open_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            self.open_detail();
            true
        } else {
            false
        }
    }

    fn handle_browse_key(browse: &mut BrowseState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                browse.prev_section();
                true
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                browse.next_section();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                browse.list_mut().up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                browse.list_mut().down();
                true
            }
            KeyCode::PageUp => {
                browse.list_mut().page_up(10);
                true
            }
            KeyCode::PageDown => {
                browse.list_mut().page_down(10);
                true
            }
            KeyCode::Home => {
                browse.list_mut().first();
                true
            }
            KeyCode::End => {
                browse.list_mut().last();
                true
            }
            _ => false,
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.favorites_view.filter = self.favorites_view.filter.prev();
                self.favorites_view.list.reset();
                self.sync_favorites_len();
                true
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.favorites_view.filter = self.favorites_view.filter.next();
                self.favorites_view.list.reset();
                self.sync_favorites_len();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.favorites_view.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.favorites_view.list.down();
                true
            }
            KeyCode::Enter => {
                self.open_detail();
                true
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.search.list.selected == 0 {
                    self.input_mode = InputMode::Editing;
                } else {
                    self.search.list.up();
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.list.down();
                true
            }
            KeyCode::Char('i') => {
                self.input_mode = InputMode::Editing;
                true
            }
            KeyCode::Enter => {
                self.open_detail();
                true
            }
            KeyCode::PageUp => {
                self.search.list.page_up(10);
                true
            }
            KeyCode::PageDown => {
                self.search.list.page_down(10);
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('v') => {
                self.request_trailer();
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
