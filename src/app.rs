//! Application state and control logic.
//!
//! [`App`] is the dashboard controller: it exclusively owns the link handle,
//! the sampler clock, the chart window, and the session history. All state
//! mutation happens on the UI thread in response to discrete events (key
//! press, mouse, tick).

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::data::{ChartWindow, ClassifiedReading, Reading, SessionHistory, Thresholds};
use crate::link::{Command, ControllerLink};
use crate::ui::Theme;

/// Connection state of the dashboard.
///
/// Transitions only via explicit user action ([`App::connect`] /
/// [`App::disconnect`]); there is no automatic reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub connection: ConnectionState,
    pub show_help: bool,

    // Data
    link: Box<dyn ControllerLink>,
    pub latest: Option<ClassifiedReading>,
    pub chart: ChartWindow,
    pub history: SessionHistory,
    pub link_error: Option<String>,
    pub thresholds: Thresholds,

    // Agitator setpoint in percent (0-100)
    pub agitator: u8,

    // Sampler clock
    tick_period: Duration,
    last_sample: Option<Instant>,
    pub last_updated: Option<Instant>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given link, thresholds, and sampler period.
    pub fn new(link: Box<dyn ControllerLink>, thresholds: Thresholds, tick_period: Duration) -> Self {
        Self {
            running: true,
            connection: ConnectionState::Disconnected,
            show_help: false,
            link,
            latest: None,
            chart: ChartWindow::default(),
            history: SessionHistory::new(),
            link_error: None,
            thresholds,
            agitator: 50,
            tick_period,
            last_sample: None,
            last_updated: None,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    /// Returns a description of the current link.
    pub fn link_description(&self) -> &str {
        self.link.description()
    }

    /// Open the connection and arm the sampler.
    ///
    /// No-op if already connected, so a second connect can never arm a
    /// second sampler.
    pub fn connect(&mut self) {
        if self.is_connected() {
            return;
        }
        self.connection = ConnectionState::Connected;
        self.last_sample = None;
        self.set_status_message(format!("Connected ({})", self.link.description()));
    }

    /// Close the connection and disarm the sampler.
    ///
    /// Idempotent: calling while already disconnected changes nothing.
    pub fn disconnect(&mut self) {
        if !self.is_connected() {
            return;
        }
        self.connection = ConnectionState::Disconnected;
        self.last_sample = None;
        self.set_status_message("Disconnected".to_string());
    }

    /// Toggle between connected and disconnected.
    pub fn toggle_connection(&mut self) {
        if self.is_connected() {
            self.disconnect();
        } else {
            self.connect();
        }
    }

    /// Advance the sampler clock.
    ///
    /// Polls the link for a reading when connected and a full period has
    /// elapsed since the last sample (or immediately after connecting).
    /// Returns true if a new reading was applied. Never polls while
    /// disconnected.
    pub fn tick(&mut self) -> bool {
        if !self.is_connected() {
            return false;
        }

        let due = match self.last_sample {
            None => true,
            Some(last) => last.elapsed() >= self.tick_period,
        };
        if !due {
            return false;
        }

        self.last_sample = Some(Instant::now());
        self.sample()
    }

    /// Force an immediate sample, resetting the tick clock.
    ///
    /// Does nothing while disconnected.
    pub fn refresh(&mut self) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.last_sample = Some(Instant::now());
        self.sample()
    }

    /// Poll the link once and apply any reading it delivers.
    fn sample(&mut self) -> bool {
        let polled = self.link.poll();
        self.link_error = self.link.last_error();

        if let Some(reading) = polled {
            self.apply_reading(reading);
            true
        } else {
            false
        }
    }

    /// Classify a reading and feed it to the readouts, chart, and history.
    fn apply_reading(&mut self, reading: Reading) {
        self.chart.push_now(reading.temperature);
        self.history.record(&reading);
        self.latest = Some(self.thresholds.classify(&reading));
        self.last_updated = Some(Instant::now());
    }

    /// Set the agitator setpoint, clamped to 0-100.
    ///
    /// When connected the new setpoint is forwarded to the controller; while
    /// disconnected only the displayed value changes.
    pub fn set_agitator(&mut self, percent: u8) {
        self.agitator = percent.min(100);
        if self.is_connected() {
            if let Err(e) = self.link.send(Command::SetAgitatorSpeed(self.agitator)) {
                self.link_error = Some(e.to_string());
            }
        }
    }

    /// Adjust the agitator setpoint by a signed delta.
    pub fn adjust_agitator(&mut self, delta: i16) {
        let next = (self.agitator as i16 + delta).clamp(0, 100);
        self.set_agitator(next as u8);
    }

    /// The displayed setpoint label, e.g. `"50%"`.
    pub fn agitator_label(&self) -> String {
        format!("{}%", self.agitator)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the latest reading and session statistics to a JSON file.
    pub fn export_session(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let Some(ref classified) = self.latest else {
            anyhow::bail!("No readings to export");
        };

        let mut export = serde_json::Map::new();

        export.insert(
            "reading".to_string(),
            serde_json::to_value(classified.reading)?,
        );
        export.insert(
            "status".to_string(),
            serde_json::json!({
                "temperature": format!("{:?}", classified.temperature),
                "ph": format!("{:?}", classified.ph),
                "dissolved_oxygen": format!("{:?}", classified.dissolved_oxygen),
                "rpm": format!("{:?}", classified.rpm),
                "overall": format!("{:?}", classified.overall),
            }),
        );
        export.insert(
            "agitator_percent".to_string(),
            serde_json::json!(self.agitator),
        );

        let mut session = serde_json::Map::new();
        session.insert(
            "samples".to_string(),
            serde_json::json!(self.history.total_samples()),
        );
        let stats = [
            ("temperature", self.history.temperature_stats()),
            ("ph", self.history.ph_stats()),
            ("dissolved_oxygen", self.history.dissolved_oxygen_stats()),
            ("rpm", self.history.rpm_stats()),
        ];
        for (name, stat) in stats {
            if let Some(s) = stat {
                session.insert(
                    name.to_string(),
                    serde_json::json!({ "min": s.min, "max": s.max, "mean": s.mean }),
                );
            }
        }
        export.insert("session".to_string(), serde_json::Value::Object(session));

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{ChannelLink, SimulatedLink};

    fn test_app() -> App {
        // Zero period: every tick is due, no sleeping in tests
        App::new(
            Box::new(SimulatedLink::with_seed(42)),
            Thresholds::default(),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_starts_disconnected() {
        let app = test_app();
        assert_eq!(app.connection, ConnectionState::Disconnected);
        assert!(app.latest.is_none());
    }

    #[test]
    fn test_no_readings_while_disconnected() {
        let mut app = test_app();
        for _ in 0..10 {
            assert!(!app.tick());
        }
        assert!(app.history.is_empty());
        assert!(app.chart.is_empty());
    }

    #[test]
    fn test_connect_starts_emission() {
        let mut app = test_app();
        app.connect();
        assert!(app.tick());
        assert_eq!(app.history.total_samples(), 1);
        assert_eq!(app.chart.len(), 1);
        assert!(app.latest.is_some());
    }

    #[test]
    fn test_disconnect_then_connect_resumes() {
        let mut app = test_app();
        app.connect();
        assert!(app.tick());

        app.disconnect();
        assert!(!app.tick());
        assert_eq!(app.history.total_samples(), 1);

        app.connect();
        assert!(app.tick());
        assert_eq!(app.history.total_samples(), 2);
    }

    #[test]
    fn test_disconnect_when_disconnected_is_noop() {
        let mut app = test_app();
        app.disconnect();
        assert_eq!(app.connection, ConnectionState::Disconnected);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_connect_when_connected_is_noop() {
        let mut app = test_app();
        app.connect();
        assert!(app.tick());

        // A second connect must not rearm the sampler or reset anything
        app.connect();
        assert_eq!(app.connection, ConnectionState::Connected);
        assert_eq!(app.history.total_samples(), 1);
    }

    #[test]
    fn test_toggle_connection() {
        let mut app = test_app();
        app.toggle_connection();
        assert!(app.is_connected());
        app.toggle_connection();
        assert!(!app.is_connected());
    }

    #[test]
    fn test_agitator_label_and_clamping() {
        let mut app = test_app();
        app.set_agitator(55);
        assert_eq!(app.agitator_label(), "55%");

        app.set_agitator(200);
        assert_eq!(app.agitator_label(), "100%");

        app.adjust_agitator(-250);
        assert_eq!(app.agitator_label(), "0%");

        app.adjust_agitator(10);
        assert_eq!(app.agitator_label(), "10%");
    }

    #[test]
    fn test_agitator_commands_only_sent_while_connected() {
        let (_reading_tx, mut command_rx, link) = ChannelLink::create("test");
        let mut app = App::new(Box::new(link), Thresholds::default(), Duration::ZERO);

        // Disconnected: display-only update, nothing on the wire
        app.set_agitator(30);
        assert!(command_rx.try_recv().is_err());

        app.connect();
        app.set_agitator(60);
        assert_eq!(command_rx.try_recv().unwrap(), Command::SetAgitatorSpeed(60));
    }

    #[test]
    fn test_chart_window_caps_at_capacity() {
        let mut app = test_app();
        app.connect();
        for _ in 0..30 {
            assert!(app.tick());
        }
        assert_eq!(app.chart.len(), app.chart.capacity());
        assert_eq!(app.history.total_samples(), 30);
    }

    #[test]
    fn test_export_session() {
        let mut app = test_app();
        app.connect();
        app.tick();

        let file = tempfile::NamedTempFile::new().unwrap();
        app.export_session(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(json["reading"]["temperature"].is_number());
        assert_eq!(json["status"]["overall"], "Normal");
        assert_eq!(json["session"]["samples"], 1);
    }

    #[test]
    fn test_export_without_readings_fails() {
        let app = test_app();
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(app.export_session(file.path()).is_err());
    }

    #[test]
    fn test_status_message_visible_until_expiry() {
        let mut app = test_app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));
    }
}
