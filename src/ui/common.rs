//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Status;

/// Render the header bar with connection state and vessel health overview.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (conn_icon, conn_style, conn_label) = if app.is_connected() {
        ("●", app.theme.status_style(Status::Normal), "Connected")
    } else {
        ("○", Style::default().add_modifier(Modifier::DIM), "Disconnected")
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", conn_icon), conn_style),
        Span::styled("FERMWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(format!("{} ({})", conn_label, app.link_description())),
    ];

    if let Some(ref classified) = app.latest {
        let overall_style = app.theme.status_style(classified.overall);
        spans.push(Span::raw(" │ vessel "));
        spans.push(Span::styled(classified.overall.symbol(), overall_style));
        spans.push(Span::raw(format!(
            " │ {} samples",
            app.history.total_samples()
        )));

        if let Some(stats) = app.history.temperature_stats() {
            spans.push(Span::raw(format!(
                " │ T {:.1}-{:.1} °C (mean {:.1})",
                stats.min, stats.max, stats.mean
            )));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: link errors, temporary status messages, time since last reading,
/// and available controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.link_error {
        let paragraph = Paragraph::new(format!(" Link error: {} | q:quit", err))
            .style(Style::default().fg(app.theme.danger));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "c:connect ←→:agitator Home/End:min/max r:refresh e:export ?:help q:quit";
    let status = match app.last_updated {
        Some(updated) => format!(
            " Updated {:.1}s ago | {}",
            updated.elapsed().as_secs_f64(),
            controls
        ),
        None if app.is_connected() => format!(" Waiting for first reading... | {}", controls),
        None => format!(" Press c to connect | {}", controls),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Connection",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  c/Enter/Space  Connect or disconnect"),
        Line::from("  r              Force a fresh reading"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Agitator",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l       Adjust setpoint by 1%"),
        Line::from("  ↑/↓ k/j       Adjust setpoint by 5%"),
        Line::from("  PgUp/PgDn     Adjust setpoint by 10%"),
        Line::from("  Home/End      Setpoint to 0% / 100%"),
        Line::from("  Scroll wheel  Adjust setpoint by 1%"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e         Export session to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
