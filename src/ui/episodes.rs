//! Episode list rendering
//!
//! Formats a sequence of [`Episode`] records into display lines and draws
//! them into the episode region. The region is only drawn while an episode
//! view is active; a new search hides it again.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::models::Episode;
use crate::ui::Theme;

/// Build one display line per episode, formatted as
/// `"<name> (season <season>, number <number>)"`. The previous list is
/// replaced wholesale, never appended to.
pub fn episode_lines(episodes: &[Episode]) -> Vec<String> {
    episodes.iter().map(|e| e.to_string()).collect()
}

/// Render the episode region.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = match &app.episodes.show {
        Some((_, name)) => format!(" EPISODES: {} ", name),
        None => " EPISODES ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.episodes.loading.is_loading() {
        let loading = Paragraph::new("⟳ Fetching episodes...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if app.episodes.episodes.is_empty() {
        let empty = Paragraph::new("No episodes")
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = episode_lines(&app.episodes.episodes)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let is_selected = i == app.episodes.list.selected;
            let marker = if is_selected { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(
                    marker,
                    if is_selected {
                        Theme::accent()
                    } else {
                        Theme::dimmed()
                    },
                ),
                Span::styled(
                    line,
                    if is_selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
            ]))
        })
        .collect();

    let list = List::new(items).style(Theme::text());
    frame.render_widget(list, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_episode_line_format() {
        let episodes = vec![Episode {
            id: 1,
            name: "Pilot".to_string(),
            season: 1,
            number: 1,
        }];
        let lines = episode_lines(&episodes);
        assert_eq!(lines, vec!["Pilot (season 1, number 1)"]);
    }

    #[test]
    fn test_one_line_per_episode() {
        let episodes: Vec<Episode> = (1..=7)
            .map(|n| Episode {
                id: n,
                name: format!("Episode {}", n),
                season: 1,
                number: n as u32,
            })
            .collect();
        let lines = episode_lines(&episodes);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "Episode 7 (season 1, number 7)");
    }

    #[test]
    fn test_rebuilding_replaces_lines() {
        let first = episode_lines(&[Episode {
            id: 1,
            name: "Pilot".to_string(),
            season: 1,
            number: 1,
        }]);
        assert_eq!(first.len(), 1);

        let second = episode_lines(&[]);
        assert!(second.is_empty());
    }
}
