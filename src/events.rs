use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Connection toggle
        KeyCode::Char('c') | KeyCode::Enter | KeyCode::Char(' ') => app.toggle_connection(),

        // Agitator setpoint
        KeyCode::Left | KeyCode::Char('h') => app.adjust_agitator(-1),
        KeyCode::Right | KeyCode::Char('l') => app.adjust_agitator(1),
        KeyCode::Down | KeyCode::Char('j') => app.adjust_agitator(-5),
        KeyCode::Up | KeyCode::Char('k') => app.adjust_agitator(5),
        KeyCode::PageDown => app.adjust_agitator(-10),
        KeyCode::PageUp => app.adjust_agitator(10),
        KeyCode::Home => app.set_agitator(0),
        KeyCode::End => app.set_agitator(100),

        // Force a fresh sample
        KeyCode::Char('r') => {
            let _ = app.refresh();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("fermwatch_export.json");
            match app.export_session(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel nudges the agitator setpoint
        MouseEventKind::ScrollUp => app.adjust_agitator(1),
        MouseEventKind::ScrollDown => app.adjust_agitator(-1),
        _ => {}
    }
}
