//! Channel-based telemetry source.
//!
//! Receives reading sets via a tokio watch channel. The telemetry ticker
//! writes this way, and so can any external producer that pushes readings
//! rather than having them polled.

use tokio::sync::watch;
use twinwatch_types::ReadingSet;

use super::TelemetrySource;

/// The value carried on a telemetry channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TelemetryEvent {
    /// No reading has been produced yet.
    #[default]
    Waiting,
    /// A fresh reading set; replaces the previous one wholesale.
    Reading(ReadingSet),
    /// The upstream source failed its last read.
    SourceError(String),
}

/// A telemetry source that receives reading sets via a channel.
///
/// # Example
///
/// ```
/// use twinwatch::{ChannelSource, TelemetryEvent, TelemetrySource};
/// use twinwatch_types::ReadingSet;
///
/// let (tx, mut source) = ChannelSource::create("bridge");
/// tx.send(TelemetryEvent::Reading(ReadingSet::default())).unwrap();
/// assert_eq!(source.read(), Some(ReadingSet::default()));
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<TelemetryEvent>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where readings come from
    pub fn new(receiver: watch::Receiver<TelemetryEvent>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            last_error: None,
        }
    }

    /// Create a channel pair for sending readings to a ChannelSource.
    ///
    /// Returns (sender, source).
    pub fn create(source_description: &str) -> (watch::Sender<TelemetryEvent>, Self) {
        let (tx, rx) = watch::channel(TelemetryEvent::default());
        (tx, Self::new(rx, source_description))
    }

    /// Wait until the producer publishes a new event. The event stays
    /// pending, so the next [`TelemetrySource::read`] still returns it.
    ///
    /// Returns `false` once the producer is gone.
    pub async fn changed(&mut self) -> bool {
        if self.receiver.changed().await.is_err() {
            return false;
        }
        self.receiver.mark_changed();
        true
    }

    /// Whether an unread event is waiting.
    pub fn has_pending(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }
}

impl TelemetrySource for ChannelSource {
    fn read(&mut self) -> Option<ReadingSet> {
        // Err means the producer was dropped; nothing new can arrive
        if !self.receiver.has_changed().unwrap_or(false) {
            return None;
        }

        match self.receiver.borrow_and_update().clone() {
            TelemetryEvent::Waiting => None,
            TelemetryEvent::Reading(reading) => {
                self.last_error = None;
                Some(reading)
            }
            TelemetryEvent::SourceError(e) => {
                self.last_error = Some(e);
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
