//! Stream-based telemetry source.
//!
//! Receives reading sets as newline-delimited JSON from an async byte
//! stream, such as a TCP connection to a real sensor gateway.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::warn;
use twinwatch_types::ReadingSet;

use super::{TelemetryEvent, TelemetrySource};

/// A telemetry source that reads reading sets from an async stream.
///
/// A background task reads one JSON reading set per line. Malformed lines
/// are reported through [`TelemetrySource::error`] and skipped.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use twinwatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<TelemetryEvent>,
    description: String,
    last_error: Option<String>,
    finished: bool,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                let event = match reader.read_line(&mut line).await {
                    Ok(0) => {
                        let closed = TelemetryEvent::SourceError("Connection closed".into());
                        let _ = tx.send(closed).await;
                        break;
                    }
                    Ok(_) if line.trim().is_empty() => continue,
                    Ok(_) => match serde_json::from_str::<ReadingSet>(line.trim()) {
                        Ok(reading) => TelemetryEvent::Reading(reading),
                        Err(e) => {
                            warn!(error = %e, "skipping malformed telemetry line");
                            TelemetryEvent::SourceError(format!("Parse error: {}", e))
                        }
                    },
                    Err(e) => {
                        let failed = TelemetryEvent::SourceError(format!("Read error: {}", e));
                        let _ = tx.send(failed).await;
                        break;
                    }
                };

                if tx.send(event).await.is_err() {
                    // Receiver dropped
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error: None,
            finished: false,
        }
    }
}

impl TelemetrySource for StreamSource {
    /// Drains everything queued and returns the newest reading, if any.
    fn read(&mut self) -> Option<ReadingSet> {
        let mut latest = None;

        loop {
            match self.receiver.try_recv() {
                Ok(TelemetryEvent::Reading(reading)) => {
                    self.last_error = None;
                    latest = Some(reading);
                }
                Ok(TelemetryEvent::SourceError(e)) => self.last_error = Some(e),
                Ok(TelemetryEvent::Waiting) => {}
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.finished = true;
                    if self.last_error.is_none() {
                        self.last_error = Some("Stream disconnected".to_string());
                    }
                    break;
                }
            }
        }

        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
