pub mod screen;
pub mod table;
pub mod tags;

use std::rc::Rc;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{app::App, problem::Difficulty, ui::screen::current_screen};

/// Draw whichever screen the app's mode asks for
pub fn render(app: &mut App, f: &mut Frame) {
    current_screen(&app.mode).render(app, f);
}

/// Header, body, status line, help
pub(crate) fn body_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // sort, progress and filters
            Constraint::Min(0),    // table or tag list
            Constraint::Length(1), // status
            Constraint::Length(4), // instructions
        ])
        .split(area)
}

pub(crate) fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let dashboard = &app.dashboard;
    let sort = dashboard.sort();
    let progress = dashboard.progress();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut progress_spans = vec![
        Span::styled(
            format!("Solved {}/{}", progress.solved, progress.total),
            bold.fg(Color::Cyan),
        ),
        Span::raw("  "),
    ];
    for difficulty in Difficulty::ALL {
        let (solved, total) = progress
            .by_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or((0, 0));
        progress_spans.push(Span::styled(
            format!("{difficulty} {solved}/{total}  "),
            table::difficulty_style(difficulty),
        ));
    }
    progress_spans.push(Span::styled(
        format!("Sort: {} {}", sort.key, sort.direction.arrow()),
        bold,
    ));

    let filter_text = if dashboard.selected_tags().is_empty() {
        "Tags: all".to_string()
    } else {
        let selected: Vec<&str> = dashboard.selected_tags().iter().map(String::as_str).collect();
        format!(
            "Tags: {} ({} matching)",
            selected.join(" | "),
            dashboard.view_len()
        )
    };

    let header = Paragraph::new(vec![
        Line::from(progress_spans),
        Line::from(Span::styled(
            filter_text,
            Style::default().fg(Color::Magenta),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("leetdash"))
    .alignment(Alignment::Center);

    f.render_widget(header, area);
}

pub(crate) fn render_status(app: &App, f: &mut Frame, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let style = if status.is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let line = Paragraph::new(Span::styled(status.text.clone(), style)).alignment(Alignment::Center);
    f.render_widget(line, area);
}

pub(crate) fn render_instructions(text: &'static str, f: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(instructions, area);
}
