//! Metric readout cards.
//!
//! Four cards, one per monitored metric, each showing the latest formatted
//! value with a border colored by its classification.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Status;

/// Render the four metric cards in a row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    let metrics: [(&str, Option<(String, Status)>); 4] = match app.latest {
        Some(ref c) => [
            ("Temperature", Some((c.reading.format_temperature(), c.temperature))),
            ("pH", Some((c.reading.format_ph(), c.ph))),
            ("Dissolved O₂", Some((c.reading.format_dissolved_oxygen(), c.dissolved_oxygen))),
            ("Agitator", Some((c.reading.format_rpm(), c.rpm))),
        ],
        None => [
            ("Temperature", None),
            ("pH", None),
            ("Dissolved O₂", None),
            ("Agitator", None),
        ],
    };

    for (column, (title, metric)) in columns.iter().zip(metrics) {
        render_card(frame, app, *column, title, metric);
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    metric: Option<(String, Status)>,
) {
    let (value_line, status_line, border_style) = match metric {
        Some((value, status)) => (
            Line::from(Span::styled(
                value,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                status.symbol(),
                app.theme.status_style(status),
            )),
            app.theme.status_style(status),
        ),
        None => (
            Line::from(Span::styled("--", Style::default().add_modifier(Modifier::DIM))),
            Line::from(""),
            Style::default().fg(app.theme.border),
        ),
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    // Vertically center the value inside the card
    let inner_height = area.height.saturating_sub(2);
    let padding = inner_height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
    lines.push(value_line);
    lines.push(status_line);

    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
