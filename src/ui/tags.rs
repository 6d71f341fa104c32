use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use itertools::Itertools;
use std::collections::HashMap;

use crate::{app::App, problem::ProblemRecord};

/// How many records carry each topic; repeats within a record count once
pub fn tag_counts(records: &[ProblemRecord]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for topic in records.iter().flat_map(|r| r.topics.iter().unique()) {
        *counts.entry(topic.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Render the tag picker list into `area`
pub fn render_tag_list(app: &mut App, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    app.scroll_to_tag_cursor(visible);

    let counts = tag_counts(app.dashboard.records());
    let tags = app.dashboard.tags();

    let lines: Vec<Line> = tags
        .iter()
        .enumerate()
        .skip(app.tag_scroll)
        .take(visible)
        .map(|(idx, tag)| {
            let selected = app.dashboard.is_tag_selected(tag);
            let check = if selected { "[x] " } else { "[ ] " };
            let count = counts.get(tag.as_str()).copied().unwrap_or(0);

            let mut style = if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if idx == app.tag_cursor {
                style = style.bg(Color::DarkGray);
            }

            Line::from(vec![
                Span::styled(format!("{check}{tag}"), style),
                Span::styled(format!(" ({count})"), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let title = if tags.is_empty() {
        "Tags (none)".to_string()
    } else {
        format!("Tags ({}/{})", (app.tag_cursor + 1).min(tags.len()), tags.len())
    };

    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
