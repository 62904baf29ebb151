//! File replay link.
//!
//! Polls a JSON file for a reading, re-reading whenever the file changes.
//! Useful for demoing the dashboard against a recorded reading, or for
//! driving it from any process that can write a file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;

use super::{Command, ControllerLink};
use crate::data::Reading;

/// A link that reads the current reading from a JSON file.
///
/// The link tracks the file's modification time and only returns a reading
/// when the file has been updated since the last poll.
#[derive(Debug)]
pub struct ReplayLink {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl ReplayLink {
    /// Create a replay link for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("replay: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being polled.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Reading> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(reading) => {
                    self.last_error = None;
                    Some(reading)
                }
                Err(e) => {
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl ControllerLink for ReplayLink {
    fn poll(&mut self) -> Option<Reading> {
        let current_modified = self.modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep the last reading
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(reading) = self.read_file() {
                self.last_modified = current_modified;
                return Some(reading);
            }
        }

        None
    }

    fn send(&mut self, _command: Command) -> Result<()> {
        // A recording has no controller to command
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{ "temperature": 25.0, "ph": 7.0, "dissolved_oxygen": 95.0, "rpm": 600 }"#
    }

    #[test]
    fn test_replay_link_new() {
        let link = ReplayLink::new("/tmp/reading.json");
        assert_eq!(link.path(), Path::new("/tmp/reading.json"));
        assert_eq!(link.description(), "replay: /tmp/reading.json");
        assert!(link.last_error().is_none());
    }

    #[test]
    fn test_poll_reads_file_once_until_changed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut link = ReplayLink::new(file.path());

        let reading = link.poll().expect("first poll returns the reading");
        assert_eq!(reading.rpm, 600);

        // Unchanged file yields nothing
        assert!(link.poll().is_none());
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut link = ReplayLink::new("/nonexistent/path/reading.json");

        assert!(link.poll().is_none());
        assert!(link.last_error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_invalid_json_reports_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut link = ReplayLink::new(file.path());

        assert!(link.poll().is_none());
        assert!(link.last_error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_send_is_accepted() {
        let mut link = ReplayLink::new("/tmp/reading.json");
        assert!(link.send(Command::SetAgitatorSpeed(10)).is_ok());
    }
}
