//! Rolling temperature chart.
//!
//! Renders the chart window as a single line series with wall-clock time
//! labels on the x axis and no legend.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the temperature trend chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Temperature (°C) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.chart.is_empty() {
        let placeholder = Paragraph::new("No readings yet")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(placeholder, area);
        return;
    }

    let coords = app.chart.coords();

    // Y bounds track the warning band with a little headroom, so danger
    // excursions still land inside the plot
    let band = app.thresholds.temperature.warning;
    let y_min = band.min - 2.0;
    let y_max = band.max + 2.0;

    // Oldest and newest time labels anchor the x axis
    let mut x_labels: Vec<Span> = Vec::new();
    if let Some((label, _)) = app.chart.oldest() {
        x_labels.push(Span::raw(label.clone()));
    }
    if let Some((label, _)) = app.chart.latest() {
        x_labels.push(Span::raw(label.clone()));
    }

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.highlight))
        .data(&coords);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, (app.chart.capacity() - 1) as f64])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.0}", y_min)),
                    Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ])
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(chart, area);
}
