use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::App,
    problem::{Difficulty, ProblemRecord},
    view::SortKey,
};

/// Topics shown before collapsing the rest into `+N`
pub const MAX_TOPICS: usize = 3;

const SOLVED_WIDTH: u16 = 3;
const DIFFICULTY_WIDTH: u16 = 12;
const NUMBER_WIDTH: u16 = 9;
/// Solved, difficulty, two number columns and the gaps between six columns
const FIXED_WIDTH: u16 = SOLVED_WIDTH + DIFFICULTY_WIDTH + 2 * NUMBER_WIDTH + 5;

pub fn difficulty_style(difficulty: Difficulty) -> Style {
    let color = match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Percentage cell text; NaN renders as a dash
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "—".to_string()
    } else {
        format!("{value:.1}")
    }
}

/// First [`MAX_TOPICS`] topics plus an overflow count
pub fn topic_summary(topics: &[String]) -> String {
    let shown = topics
        .iter()
        .take(MAX_TOPICS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match topics.len().saturating_sub(MAX_TOPICS) {
        0 => shown,
        extra => format!("{shown} +{extra}"),
    }
}

/// Cut `text` to `max` display columns, ending in `…` when shortened
pub fn fit(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pure presenter for a single problem row
pub fn present_row(record: &ProblemRecord, solved: bool, title_width: usize) -> Row<'static> {
    let mark = if solved {
        Cell::from("✓").style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Cell::from("·").style(Style::default().fg(Color::DarkGray))
    };

    let title_style = if solved {
        Style::default()
            .add_modifier(Modifier::DIM)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    Row::new(vec![
        mark,
        Cell::from(record.difficulty.to_string()).style(difficulty_style(record.difficulty)),
        Cell::from(fit(&record.title, title_width)).style(title_style),
        Cell::from(format_percent(record.frequency)),
        Cell::from(format_percent(record.acceptance_rate)),
        Cell::from(topic_summary(&record.topics)).style(Style::default().fg(Color::Cyan)),
    ])
}

fn header_cell(label: &str, key: SortKey, app: &App) -> Cell<'static> {
    let sort = app.dashboard.sort();
    if sort.key == key {
        Cell::from(format!("{label} {}", sort.direction.arrow()))
    } else {
        Cell::from(label.to_string())
    }
}

/// Render the problem table into `area`
pub fn render_problem_table(app: &mut App, f: &mut Frame, area: Rect) {
    let total_rows = app.dashboard.view_len();

    if total_rows == 0 {
        let message = if app.dashboard.records().is_empty() {
            "No problems loaded."
        } else {
            "No problems match the selected tags.\nPress (c) to clear filters."
        };
        let empty = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title("Problems"))
            .style(Style::default().fg(Color::Gray))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    // borders + header
    let table_height = area.height.saturating_sub(3) as usize;
    app.scroll_to_selection(table_height);

    let inner_width = area.width.saturating_sub(2);
    let title_width = inner_width.saturating_sub(FIXED_WIDTH) * 3 / 5;

    let header = Row::new(vec![
        Cell::from(""),
        header_cell("Difficulty", SortKey::Difficulty, app),
        Cell::from("Title"),
        header_cell("Freq %", SortKey::Frequency, app),
        header_cell("Acc %", SortKey::AcceptanceRate, app),
        Cell::from("Topics"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let selected_style = Style::default().bg(Color::DarkGray);
    let rows: Vec<Row> = (app.scroll_offset..total_rows)
        .take(table_height)
        .filter_map(|pos| {
            let record = app.dashboard.view_record(pos)?;
            let row = present_row(
                record,
                app.dashboard.is_solved(&record.link),
                title_width as usize,
            );
            Some(if pos == app.selected {
                row.style(selected_style)
            } else {
                row
            })
        })
        .collect();

    let scroll_info = if total_rows > table_height {
        format!(
            " ({}/{} rows)",
            (app.scroll_offset + rows.len()).min(total_rows),
            total_rows
        )
    } else {
        format!(" ({total_rows})")
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(SOLVED_WIDTH),
            Constraint::Length(DIFFICULTY_WIDTH),
            Constraint::Length(title_width),
            Constraint::Length(NUMBER_WIDTH),
            Constraint::Length(NUMBER_WIDTH),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Problems{scroll_info}")),
    );

    f.render_widget(table, area);
}
