//! Stream-based controller link.
//!
//! Talks newline-delimited JSON over a pair of async byte streams: readings
//! arrive on the read half, commands go out on the write half. This is the
//! transport for network-connected controllers (e.g. a TCP bridge to the
//! vessel's embedded board).

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use super::{Command, ControllerLink};
use crate::data::Reading;

/// A link that exchanges readings and commands over async byte streams.
///
/// Spawns two background tasks: a reader parsing one JSON reading per line,
/// and a writer serializing queued commands one per line. Both hand off to
/// the UI thread through non-blocking channels.
///
/// # Example
///
/// ```
/// use fermwatch::StreamLink;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"temperature\":25.0,\"ph\":7.0,\"dissolved_oxygen\":95.0,\"rpm\":600}\n";
/// let reader = std::io::Cursor::new(data.to_vec());
/// let link = StreamLink::spawn(reader, tokio::io::sink(), "example");
/// # let _ = link;
/// # });
/// ```
#[derive(Debug)]
pub struct StreamLink {
    readings: mpsc::Receiver<Reading>,
    commands: mpsc::UnboundedSender<Command>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl StreamLink {
    /// Spawn reader and writer tasks over the given stream halves.
    ///
    /// The reader expects newline-delimited JSON, one [`Reading`] per line.
    /// Unparseable lines are skipped and surface via [`last_error`].
    ///
    /// [`last_error`]: ControllerLink::last_error
    pub fn spawn<R, W>(reader: R, writer: W, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (reading_tx, reading_rx) = mpsc::channel(16);
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<Command>();
        let last_error = Arc::new(Mutex::new(None));

        let error_handle = last_error.clone();
        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        *error_handle.lock().unwrap() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => match serde_json::from_str::<Reading>(line.trim()) {
                        Ok(reading) => {
                            *error_handle.lock().unwrap() = None;
                            if reading_tx.send(reading).await.is_err() {
                                // Receiver dropped
                                break;
                            }
                        }
                        Err(e) => {
                            *error_handle.lock().unwrap() = Some(format!("Parse error: {}", e));
                        }
                    },
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        let error_handle = last_error.clone();
        tokio::spawn(async move {
            let mut writer = writer;
            while let Some(command) = command_rx.recv().await {
                let mut line = match serde_json::to_vec(&command) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Encode error: {}", e));
                        continue;
                    }
                };
                line.push(b'\n');
                if let Err(e) = writer.write_all(&line).await {
                    *error_handle.lock().unwrap() = Some(format!("Write error: {}", e));
                    break;
                }
                let _ = writer.flush().await;
            }
        });

        Self {
            readings: reading_rx,
            commands: command_tx,
            description: format!("stream: {}", description),
            last_error,
        }
    }
}

impl ControllerLink for StreamLink {
    fn poll(&mut self) -> Option<Reading> {
        match self.readings.try_recv() {
            Ok(reading) => Some(reading),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                let mut err = self.last_error.lock().unwrap();
                if err.is_none() {
                    *err = Some("Stream disconnected".to_string());
                }
                None
            }
        }
    }

    fn send(&mut self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("stream writer task stopped"))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::AsyncReadExt;

    fn sample_json() -> &'static str {
        r#"{"temperature":25.0,"ph":7.0,"dissolved_oxygen":95.0,"rpm":600}"#
    }

    #[tokio::test]
    async fn test_readings_arrive_line_by_line() {
        let data = format!("{}\n{}\n", sample_json(), sample_json());
        let mut link = StreamLink::spawn(Cursor::new(data), tokio::io::sink(), "test");

        // Give the background task time to process
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(link.poll().is_some());
        assert!(link.poll().is_some());
        assert!(link.poll().is_none());
    }

    #[tokio::test]
    async fn test_invalid_lines_are_skipped() {
        let data = "not valid json\n";
        let mut link = StreamLink::spawn(Cursor::new(data.to_string()), tokio::io::sink(), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(link.poll().is_none());
    }

    #[tokio::test]
    async fn test_commands_are_written_as_json_lines() {
        let (client, server) = tokio::io::duplex(256);
        let (server_read, server_write) = tokio::io::split(server);
        let mut link = StreamLink::spawn(server_read, server_write, "test");

        link.send(Command::SetAgitatorSpeed(55)).unwrap();

        // Read what the writer task put on the wire
        let (mut client_read, _client_write) = tokio::io::split(client);
        let mut buf = vec![0u8; 64];
        let n = tokio::time::timeout(
            tokio::time::Duration::from_secs(1),
            client_read.read(&mut buf),
        )
        .await
        .unwrap()
        .unwrap();

        let line = String::from_utf8_lossy(&buf[..n]);
        assert_eq!(line.trim(), r#"{"set_agitator_speed":55}"#);
    }

    #[tokio::test]
    async fn test_eof_reports_connection_closed() {
        let mut link = StreamLink::spawn(Cursor::new(String::new()), tokio::io::sink(), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(link.poll().is_none());
        assert_eq!(link.last_error(), Some("Connection closed".to_string()));
    }

    #[tokio::test]
    async fn test_description() {
        let link = StreamLink::spawn(
            Cursor::new(String::new()),
            tokio::io::sink(),
            "tcp://vessel:9600",
        );
        assert_eq!(link.description(), "stream: tcp://vessel:9600");
    }
}
