//! Content browser view
//!
//! Movie and TV tabs show their three lists side by side; the focused
//! column follows ←/→. Rows are rendered by [`ContentList`], which the
//! favorites tab and the search modal reuse.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{BrowseState, ListState};
use crate::models::ContentItem;
use crate::ui::Theme;

/// A titled, scrollable list of content rows
pub struct ContentList<'a, T: ContentItem> {
    pub title: String,
    pub items: &'a [T],
    pub list: &'a ListState,
    pub focused: bool,
    pub theme: &'a Theme,
    /// Text shown when `items` is empty
    pub empty: &'a str,
    /// Optional badge per row (e.g. "Movie", "TV Show")
    pub label: Option<&'a dyn Fn(&T) -> String>,
    pub is_favorite: &'a dyn Fn(&T) -> bool,
}

impl<'a, T: ContentItem> ContentList<'a, T> {
    fn block(&self) -> Block<'static> {
        let border_style = if self.focused {
            self.theme.border_focused()
        } else {
            self.theme.border_style()
        };
        let title = if self.items.is_empty() {
            format!(" {} ", self.title)
        } else {
            format!(" {} ({}/{}) ", self.title, self.list.selected + 1, self.items.len())
        };

        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, self.theme.title()))
            .title_alignment(Alignment::Left)
    }

    /// Render the list into `area`
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let block = self.block();

        if self.items.is_empty() {
            let empty = Paragraph::new(self.empty)
                .style(self.theme.dimmed())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let visible_height = area.height.saturating_sub(2) as usize;

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(self.list.window_start(visible_height))
            .take(visible_height)
            .map(|(i, item)| self.render_item(item, i == self.list.selected))
            .collect();

        frame.render_widget(
            List::new(items).block(block).style(self.theme.text_style()),
            area,
        );
    }

    /// Format: ▸ ♥ Title (Year) [Label] ★ 8.5
    fn render_item(&self, item: &T, is_selected: bool) -> ListItem<'static> {
        let theme = self.theme;
        let selected_here = is_selected && self.focused;

        let marker = if selected_here { "▸ " } else { "  " };
        let heart = if (self.is_favorite)(item) { "♥ " } else { "" };

        let mut spans = vec![
            Span::styled(
                marker,
                if selected_here {
                    theme.accent_style()
                } else {
                    theme.dimmed()
                },
            ),
            Span::styled(heart, theme.favorite_style()),
            Span::styled(
                item.display_title().to_string(),
                if selected_here {
                    theme.highlighted()
                } else {
                    theme.text_style()
                },
            ),
        ];

        if let Some(year) = item.year() {
            spans.push(Span::styled(format!(" ({})", year), theme.year()));
        }
        if let Some(label) = self.label {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("[{}]", label(item)), theme.secondary_style()));
        }
        if let Some(vote) = item.vote_average() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("★ {:.1}", vote), theme.rating(vote)));
        }

        ListItem::new(Line::from(spans))
    }
}

/// Split `area` into one column per section
pub fn section_columns(area: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

/// Render a movie or TV tab: three lists, one focused
pub fn render_sections<T: ContentItem>(
    frame: &mut Frame,
    area: Rect,
    sections: [(&str, &[T]); 3],
    browse: &BrowseState,
    theme: &Theme,
    is_favorite: &dyn Fn(&T) -> bool,
) {
    let columns = section_columns(area, sections.len());
    for (i, ((title, items), column)) in sections.into_iter().zip(columns).enumerate() {
        ContentList {
            title: title.to_string(),
            items,
            list: &browse.lists[i],
            focused: i == browse.section,
            theme,
            empty: "Loading...",
            label: None,
            is_favorite,
        }
        .render(frame, column);
    }
}
