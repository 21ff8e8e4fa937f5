//! Favorites tab: filter picker above the saved list

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::favorites::FavoritesFilter;
use crate::models::Content;
use crate::store::KeyValueStore;
use crate::ui::browser::ContentList;
use crate::ui::Theme;

pub const EMPTY_TITLE: &str = "No Favorites Yet";
pub const EMPTY_HINT: &str = "Press f on any movie or TV show to save it here.";

/// `All │ Movies │ TV Shows` with the active filter highlighted
pub fn filter_line(active: FavoritesFilter, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, filter) in FavoritesFilter::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", theme.dimmed()));
        }
        let style = if *filter == active {
            theme.highlighted()
        } else {
            theme.text_style()
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }
    Line::from(spans)
}

pub fn render_favorites<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let picker = Paragraph::new(filter_line(app.favorites_view.filter, theme))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style())
                .title(Span::styled(" ←/→ filter ", theme.dimmed())),
        );
    frame.render_widget(picker, chunks[0]);

    let items = app.visible_favorites();
    if items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("♥", theme.favorite_style())),
            Line::from(Span::styled(EMPTY_TITLE, theme.title())),
            Line::from(Span::styled(EMPTY_HINT, theme.dimmed())),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style()),
        );
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let label = |c: &Content| c.type_label();
    let is_favorite = |_: &Content| true;
    ContentList {
        title: app.favorites_view.filter.label().to_string(),
        items: &items,
        list: &app.favorites_view.list,
        focused: true,
        theme,
        empty: EMPTY_TITLE,
        label: Some(&label),
        is_favorite: &is_favorite,
    }
    .render(frame, chunks[1]);
}
