//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Status;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and the chart line.
    pub highlight: Color,
    /// Color for warning-level status.
    pub warning: Color,
    /// Color for danger-level status.
    pub danger: Color,
    /// Color for normal status.
    pub normal: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headers.
    pub header: Style,
    /// Style for the agitator gauge fill.
    pub gauge: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            danger: Color::Red,
            normal: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            gauge: Style::default().fg(Color::Cyan).bg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            danger: Color::Red,
            normal: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            gauge: Style::default().fg(Color::Blue).bg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a classification status
    pub fn status_style(&self, status: Status) -> Style {
        match status {
            Status::Normal => Style::default().fg(self.normal),
            Status::Warning => Style::default().fg(self.warning),
            Status::Danger => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
        }
    }
}
