//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout; the palette
//! follows the persisted dark-mode flag.

pub mod browser;
pub mod detail;
pub mod favorites;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};

use crate::api::{MovieList, TvList};
use crate::app::{App, AppState, InputMode};
use crate::models::{Movie, TvShow};
use crate::store::KeyValueStore;

/// Main render function - dispatches to view-specific renderers
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let theme = Theme::for_preference(app.theme);
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.text_style()), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app, &theme);

    if app.state == AppState::Search {
        // Keep the previous screen visible behind the modal
        let behind = app
            .nav_stack
            .last()
            .copied()
            .filter(|s| *s != AppState::Search)
            .unwrap_or(AppState::Movies);
        render_screen(frame, chunks[1], app, behind, &theme);
        search::render_search(frame, chunks[1], app, &theme);
    } else {
        render_screen(frame, chunks[1], app, app.state, &theme);
    }

    render_status_bar(frame, chunks[2], app, &theme);
}

/// Tab the header highlights for a given screen
fn active_tab<S: KeyValueStore>(app: &App<S>) -> AppState {
    if app.state.is_tab() {
        return app.state;
    }
    app.nav_stack
        .iter()
        .rev()
        .copied()
        .find(AppState::is_tab)
        .unwrap_or(AppState::Movies)
}

fn render_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let titles: Vec<Line> = AppState::TABS
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
        .collect();
    let selected = AppState::TABS
        .iter()
        .position(|t| *t == active_tab(app))
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme.text_style())
        .highlight_style(theme.highlighted())
        .divider(Span::styled("│", theme.dimmed()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style())
                .title(Line::from(vec![
                    Span::styled(" TMDB", theme.title()),
                    Span::styled("surfer ", theme.secondary_style()),
                ])),
        );
    frame.render_widget(tabs, area);
}

fn render_screen<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, state: AppState, theme: &Theme) {
    match state {
        AppState::Movies => {
            let is_favorite = |m: &Movie| app.favorites.is_movie_favorite(m.id);
            let sections = MovieList::ALL.map(|list| (list.title(), app.content.movies(list)));
            browser::render_sections(frame, area, sections, &app.movies, theme, &is_favorite);
        }
        AppState::TvShows => {
            let is_favorite = |t: &TvShow| app.favorites.is_tv_show_favorite(t.id);
            let sections = TvList::ALL.map(|list| (list.title(), app.content.tv_shows(list)));
            browser::render_sections(frame, area, sections, &app.tv_shows, theme, &is_favorite);
        }
        AppState::Favorites => favorites::render_favorites(frame, area, app, theme),
        AppState::Detail => match &app.detail {
            Some(detail) => {
                let is_favorite = app.is_favorite(&detail.content);
                detail::render_detail(frame, area, detail, is_favorite, theme);
            }
            None => {
                let empty = Paragraph::new("Nothing selected")
                    .style(theme.dimmed())
                    .alignment(Alignment::Center);
                frame.render_widget(empty, area);
            }
        },
        // Search is drawn as an overlay by `draw`
        AppState::Search => {}
    }
}

/// Key hints for the current screen
pub fn help_text(state: AppState) -> &'static str {
    match state {
        AppState::Movies | AppState::TvShows => {
            " ←→:section ↑↓:move ⏎:details f:favorite /:search t:theme r:refresh q:quit "
        }
        AppState::Favorites => " ←→:filter ↑↓:move ⏎:details f:remove /:search t:theme q:quit ",
        AppState::Search => " ↑↓:move ⏎:details f:favorite i:edit ESC:back ",
        AppState::Detail => " f:favorite v:trailer ESC:back q:quit ",
    }
}

fn render_status_bar<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(" NORMAL ", theme.highlighted()),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let state_indicator = Span::styled(format!(" {} ", app.state.label().to_uppercase()), theme.dimmed());
    let theme_indicator = Span::styled(format!(" {} ", app.theme.label()), theme.secondary_style());

    let tail = match &app.notice {
        Some(notice) => Span::styled(notice.clone(), theme.favorite_style()),
        None => Span::styled(help_text(app.state), theme.dimmed()),
    };

    let status_line = Line::from(vec![
        mode_indicator,
        state_indicator,
        theme_indicator,
        Span::raw("│ "),
        tail,
    ]);

    frame.render_widget(Paragraph::new(status_line).style(theme.status_bar()), area);
}
