//! Detail view for one movie, TV show or search result
//!
//! Title, type badge, date, rating, overview, poster URL, favorite status
//! and the trailer link once it has been looked up.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{DetailState, TrailerState};
use crate::models::ContentItem;
use crate::ui::Theme;

/// Text for the trailer row
pub fn trailer_text(state: &TrailerState) -> String {
    match state {
        TrailerState::NotRequested => "press v to look up".to_string(),
        TrailerState::Loading => "looking up...".to_string(),
        TrailerState::Found(url) => url.clone(),
        TrailerState::Unavailable => "no trailer available".to_string(),
    }
}

fn field<'a>(label: &'a str, value: impl Into<String>, style: Style, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), theme.dimmed()),
        Span::styled(value.into(), style),
    ])
}

pub fn render_detail(frame: &mut Frame, area: Rect, detail: &DetailState, is_favorite: bool, theme: &Theme) {
    let content = &detail.content;
    let title = content.display_title();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focused())
        .title(Span::styled(format!(" {} ", title), theme.title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title.to_string(), theme.title()),
            Span::raw("  "),
            Span::styled(format!("[{}]", content.type_label()), theme.secondary_style()),
        ]),
        Line::from(""),
    ];

    if let Some(date) = content.release_date().filter(|d| !d.is_empty()) {
        lines.push(field("Released", date, theme.year(), theme));
    }
    if let Some(vote) = content.vote_average() {
        lines.push(field("Rating", format!("★ {:.1}", vote), theme.rating(vote), theme));
    }
    lines.push(field(
        "Poster",
        content.full_poster_url().unwrap_or_else(|| "none".to_string()),
        theme.dimmed(),
        theme,
    ));
    lines.push(if is_favorite {
        field("Favorite", "♥ yes", theme.favorite_style(), theme)
    } else {
        field("Favorite", "no", theme.dimmed(), theme)
    });
    let trailer_style = match detail.trailer {
        TrailerState::Found(_) => theme.accent_style(),
        TrailerState::Loading => theme.loading(),
        TrailerState::Unavailable => theme.error_style(),
        TrailerState::NotRequested => theme.dimmed(),
    };
    lines.push(field("Trailer", trailer_text(&detail.trailer), trailer_style, theme));

    lines.push(Line::from(""));
    let overview = content
        .overview()
        .filter(|o| !o.trim().is_empty())
        .unwrap_or("No overview available.");
    lines.push(Line::from(Span::styled(overview.to_string(), theme.text_style())));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" f ", theme.keybind()),
        Span::styled("favorite  ", theme.dimmed()),
        Span::styled(" v ", theme.keybind()),
        Span::styled("trailer  ", theme.dimmed()),
        Span::styled(" ESC ", theme.keybind()),
        Span::styled("back", theme.dimmed()),
    ]));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Content, TvShow};
    use ratatui::backend::TestBackend;

    fn detail() -> DetailState {
        DetailState::new(Content::from(TvShow {
            id: 1399,
            name: Some("Game of Thrones".into()),
            overview: Some("Seven noble families fight for control.".into()),
            poster_path: Some("/got.jpg".into()),
            first_air_date: Some("2011-04-17".into()),
            vote_average: Some(8.4),
            title: None,
        }))
    }

    #[test]
    fn test_trailer_text() {
        assert_eq!(trailer_text(&TrailerState::Loading), "looking up...");
        assert_eq!(
            trailer_text(&TrailerState::Found("https://www.youtube.com/watch?v=x".into())),
            "https://www.youtube.com/watch?v=x"
        );
        assert_eq!(trailer_text(&TrailerState::Unavailable), "no trailer available");
    }

    #[test]
    fn test_render_detail_fields() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let detail = detail();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_detail(frame, frame.area(), &detail, true, &theme))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Game of Thrones"));
        assert!(text.contains("[TV Show]"));
        assert!(text.contains("2011-04-17"));
        assert!(text.contains("https://image.tmdb.org/t/p/w500/got.jpg"));
        assert!(text.contains("♥ yes"));
        assert!(text.contains("Seven noble families"));
    }
}
