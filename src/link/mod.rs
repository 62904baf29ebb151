//! Controller link abstraction for receiving readings and sending commands.
//!
//! This module provides a trait-based abstraction over the connection to a
//! bioreactor controller. The default implementation is a simulator; channel
//! and stream links exist so a real device transport can be plugged in
//! without touching the rendering logic.

mod channel;
mod replay;
mod simulated;
mod stream;

pub use channel::ChannelLink;
pub use replay::ReplayLink;
pub use simulated::SimulatedLink;
pub use stream::StreamLink;

use std::fmt::Debug;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::Reading;

/// A command sent to the controller.
///
/// Serialized as newline-delimited JSON on stream links, e.g.
/// `{"set_agitator_speed":55}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Set the agitator speed setpoint, in percent (0-100).
    SetAgitatorSpeed(u8),
}

/// Bidirectional connection to a bioreactor controller.
///
/// Implementations deliver incoming readings via non-blocking [`poll`] calls
/// and accept outgoing commands via [`send`]. The dashboard polls once per
/// sampler tick while connected and never polls while disconnected.
///
/// [`poll`]: ControllerLink::poll
/// [`send`]: ControllerLink::send
///
/// # Example
///
/// ```
/// use fermwatch::{ControllerLink, SimulatedLink};
///
/// let mut link = SimulatedLink::with_seed(7);
/// let reading = link.poll().expect("simulator always has a reading");
/// assert!(reading.temperature >= 22.0 && reading.temperature <= 28.0);
/// ```
pub trait ControllerLink: Send + Debug {
    /// Poll for the latest reading.
    ///
    /// Returns `Some(reading)` if new data is available, `None` otherwise.
    /// This method must be non-blocking.
    fn poll(&mut self) -> Option<Reading>;

    /// Send a command to the controller.
    fn send(&mut self, command: Command) -> Result<()>;

    /// Returns a human-readable description of the link.
    ///
    /// Used for display in the status bar.
    fn description(&self) -> &str;

    /// The most recent link error, if any.
    fn last_error(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_string(&Command::SetAgitatorSpeed(55)).unwrap();
        assert_eq!(json, r#"{"set_agitator_speed":55}"#);

        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Command::SetAgitatorSpeed(55));
    }
}
