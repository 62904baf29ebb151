//! Channel-based controller link.
//!
//! Receives readings via a tokio watch channel and forwards commands through
//! an unbounded mpsc channel. This is the seam for in-process producers, such
//! as a device driver task that pushes readings rather than being polled.

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, watch};

use super::{Command, ControllerLink};
use crate::data::Reading;

/// A link that receives readings pushed through a channel.
///
/// The producer side holds the `watch::Sender<Option<Reading>>` and the
/// `mpsc::UnboundedReceiver<Command>` returned by [`ChannelLink::create`].
///
/// # Example
///
/// ```
/// use fermwatch::ChannelLink;
///
/// let (reading_tx, command_rx, link) = ChannelLink::create("driver: sim");
/// # let _ = (reading_tx, command_rx, link);
/// ```
#[derive(Debug)]
pub struct ChannelLink {
    readings: watch::Receiver<Option<Reading>>,
    commands: mpsc::UnboundedSender<Command>,
    description: String,
}

impl ChannelLink {
    /// Create a link together with its producer-side endpoints.
    ///
    /// Returns (reading sender, command receiver, link).
    pub fn create(
        description: &str,
    ) -> (
        watch::Sender<Option<Reading>>,
        mpsc::UnboundedReceiver<Command>,
        Self,
    ) {
        let (reading_tx, reading_rx) = watch::channel(None);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let link = Self {
            readings: reading_rx,
            commands: command_tx,
            description: format!("channel: {}", description),
        };
        (reading_tx, command_rx, link)
    }
}

impl ControllerLink for ChannelLink {
    fn poll(&mut self) -> Option<Reading> {
        // Non-blocking: only hand out a reading the producer hasn't shown us yet
        if self.readings.has_changed().unwrap_or(false) {
            *self.readings.borrow_and_update()
        } else {
            None
        }
    }

    fn send(&mut self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("controller command channel closed"))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn last_error(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> Reading {
        Reading {
            temperature: 25.0,
            ph: 7.0,
            dissolved_oxygen: 95.0,
            rpm: 600,
        }
    }

    #[test]
    fn test_poll_returns_only_new_readings() {
        let (tx, _command_rx, mut link) = ChannelLink::create("test");

        // Nothing sent yet
        assert!(link.poll().is_none());

        tx.send(Some(reading())).unwrap();
        assert_eq!(link.poll(), Some(reading()));

        // No change since the last poll
        assert!(link.poll().is_none());
    }

    #[test]
    fn test_commands_reach_the_producer() {
        let (_tx, mut command_rx, mut link) = ChannelLink::create("test");

        link.send(Command::SetAgitatorSpeed(40)).unwrap();
        assert_eq!(command_rx.try_recv().unwrap(), Command::SetAgitatorSpeed(40));
    }

    #[test]
    fn test_send_fails_when_producer_dropped() {
        let (_tx, command_rx, mut link) = ChannelLink::create("test");
        drop(command_rx);

        assert!(link.send(Command::SetAgitatorSpeed(40)).is_err());
    }

    #[test]
    fn test_description() {
        let (_tx, _rx, link) = ChannelLink::create("driver: sim");
        assert_eq!(link.description(), "channel: driver: sim");
    }
}
