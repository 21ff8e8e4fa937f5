//! Search modal
//!
//! Query input on top, results below. The result area shows, in order of
//! precedence: a spinner while a request is pending, the results, "No results
//! found" for a finished empty search, or a prompt when the query is empty.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, InputMode};
use crate::models::{Content, SearchResult};
use crate::store::KeyValueStore;
use crate::ui::browser::ContentList;
use crate::ui::Theme;

/// What the result pane should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPane {
    Searching,
    Results,
    NoResults,
    Prompt,
}

impl SearchPane {
    pub fn message(&self) -> &'static str {
        match self {
            SearchPane::Searching => "Searching...",
            SearchPane::NoResults => "No results found",
            SearchPane::Prompt => "Search for something...",
            SearchPane::Results => "",
        }
    }
}

pub fn search_pane(query: &str, is_searching: bool, results: &[SearchResult]) -> SearchPane {
    if is_searching {
        SearchPane::Searching
    } else if !results.is_empty() {
        SearchPane::Results
    } else if !query.is_empty() {
        SearchPane::NoResults
    } else {
        SearchPane::Prompt
    }
}

/// Centered rectangle taking `percent_x`/`percent_y` of `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the modal over whatever is behind it
pub fn render_search<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let modal = centered_rect(80, 80, area);
    frame.render_widget(Clear, modal);
    frame.render_widget(Block::default().style(theme.text_style()), modal);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(modal);

    render_input(frame, chunks[0], app, theme);

    let content = &app.content;
    let pane = search_pane(&app.search.query, content.is_searching, &content.search_results);

    if pane == SearchPane::Results {
        let is_favorite = |r: &SearchResult| app.favorites.is_search_result_favorite(r.id);
        let label = |r: &SearchResult| Content::from(r.clone()).type_label();
        ContentList {
            title: "Results".to_string(),
            items: &content.search_results,
            list: &app.search.list,
            focused: app.input_mode == InputMode::Normal,
            theme,
            empty: pane.message(),
            label: Some(&label),
            is_favorite: &is_favorite,
        }
        .render(frame, chunks[1]);
        return;
    }

    let style = if pane == SearchPane::Searching {
        theme.loading()
    } else {
        theme.dimmed()
    };
    let message = Paragraph::new(pane.message())
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style()),
        );
    frame.render_widget(message, chunks[1]);
}

fn render_input<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let editing = app.input_mode == InputMode::Editing;
    let query = &app.search.query;

    let text = if editing {
        let cursor = app.search.cursor.min(query.len());
        let (before, after) = query.split_at(cursor);
        format!("⌕ {}│{}", before, after)
    } else if query.is_empty() {
        "⌕ Press / or i to type...".to_string()
    } else {
        format!("⌕ {}", query)
    };

    let input = Paragraph::new(text)
        .style(if editing {
            theme.input().fg(theme.primary)
        } else {
            theme.input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    theme.border_focused()
                } else {
                    theme.border_style()
                })
                .title(Span::styled(" Search movies and TV shows ", theme.title())),
        );
    frame.render_widget(input, area);
}
