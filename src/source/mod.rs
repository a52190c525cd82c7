//! Telemetry source abstraction for receiving reading sets.
//!
//! The dashboard never cares where readings come from. The random
//! [`SimulatedSource`] stands in for real ingestion; a file replay, a pushed
//! channel or a newline-delimited JSON stream can replace it without touching
//! classification or display.

mod channel;
mod file;
mod simulator;
mod stream;

pub use channel::{ChannelSource, TelemetryEvent};
pub use file::FileSource;
pub use simulator::{generate, generate_reading, SimulatedSource};
pub use stream::StreamSource;

use std::fmt::Debug;

use twinwatch_types::ReadingSet;

/// Trait for receiving reading sets from various sources.
///
/// # Example
///
/// ```
/// use twinwatch::{SimulatedSource, TelemetrySource};
///
/// let mut source = SimulatedSource::seeded(7);
/// let reading = source.read().expect("the simulator always yields a reading");
/// assert!(reading.in_simulated_range());
/// ```
pub trait TelemetrySource: Send + Debug {
    /// Read the latest reading set.
    ///
    /// Returns `Some(reading)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn read(&mut self) -> Option<ReadingSet>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error message if the last read failed.
    fn error(&self) -> Option<&str>;

    /// Whether the source can never yield another reading.
    ///
    /// A parse error on one line is not final; a closed stream is.
    fn is_finished(&self) -> bool {
        false
    }
}
