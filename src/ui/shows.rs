//! Show list rendering
//!
//! Shapes a sequence of [`Show`] records into display blocks and draws them
//! into the show-list region. Each block carries its show's id, so episode
//! lookups read the identifier straight off the selected block instead of
//! recovering it from rendering structure.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::models::Show;
use crate::ui::Theme;

/// One rendered block of the show list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowBlock {
    /// Identifier of the show this block displays, used for episode lookups
    pub id: u64,
    pub name: String,
    /// Summary with HTML markup stripped for terminal display
    pub summary: String,
    pub image: String,
}

/// Build one display block per show. Replaces any previous list; callers
/// render the returned blocks wholesale, so blocks never accumulate across
/// searches.
pub fn show_blocks(shows: &[Show]) -> Vec<ShowBlock> {
    shows
        .iter()
        .map(|show| ShowBlock {
            id: show.id,
            name: show.name.clone(),
            summary: strip_markup(&show.summary),
            image: show.image.clone(),
        })
        .collect()
}

/// Strip HTML tags from a summary and collapse the remaining whitespace.
pub fn strip_markup(summary: &str) -> String {
    let stripped = match regex::Regex::new(r"<[^>]*>") {
        Ok(re) => re.replace_all(summary, " ").into_owned(),
        Err(_) => summary.to_string(),
    };
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render the show-list region.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" SHOWS ({}) ", app.search.shows.len()),
            Theme::title(),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.search.loading.is_loading() {
        let loading = Paragraph::new("⟳ Searching...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if app.search.shows.is_empty() {
        let empty = Paragraph::new(if app.search.query.is_empty() {
            "Type / to search for TV shows..."
        } else {
            "No shows found"
        })
        .style(Theme::dimmed())
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let blocks = show_blocks(&app.search.shows);
    let items: Vec<ListItem> = blocks
        .iter()
        .enumerate()
        .map(|(i, show)| {
            let is_selected = i == app.search.list.selected;
            let marker = if is_selected { "▸ " } else { "  " };

            let title_line = Line::from(vec![
                Span::styled(
                    marker,
                    if is_selected {
                        Theme::accent()
                    } else {
                        Theme::dimmed()
                    },
                ),
                Span::styled(
                    show.name.clone(),
                    if is_selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
                Span::raw(" "),
                Span::styled(format!("#{}", show.id), Theme::secondary()),
            ]);

            let summary_line = Line::from(vec![
                Span::raw("    "),
                Span::styled(truncate(&show.summary, 96), Theme::summary()),
            ]);

            ListItem::new(vec![title_line, summary_line])
        })
        .collect();

    let list = List::new(items).style(Theme::text());
    frame.render_widget(list, inner);
}

/// Truncate a string to at most `max` characters, appending an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
