//! Connection indicator and agitator setpoint gauge.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Status;

/// Render the control strip: connection toggle state and agitator gauge.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Length(26), Constraint::Min(20)]).split(area);

    render_connection(frame, app, columns[0]);
    render_agitator(frame, app, columns[1]);
}

fn render_connection(frame: &mut Frame, app: &App, area: Rect) {
    let (icon, label, style) = if app.is_connected() {
        ("●", "Connected", app.theme.status_style(Status::Normal))
    } else {
        ("○", "Disconnected", Style::default().add_modifier(Modifier::DIM))
    };

    let action = if app.is_connected() {
        "c:disconnect"
    } else {
        "c:connect"
    };

    let line = Line::from(vec![
        Span::styled(format!("{} {}", icon, label), style),
        Span::raw("  "),
        Span::styled(action, Style::default().add_modifier(Modifier::DIM)),
    ]);

    let block = Block::default()
        .title(" Link ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_agitator(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Agitator Setpoint ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(app.theme.gauge)
        .percent(app.agitator as u16)
        .label(app.agitator_label());

    frame.render_widget(gauge, area);
}
