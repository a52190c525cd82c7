//! # twinwatch
//!
//! A terminal dashboard and library for monitoring a simulated smart
//! facility: energy, climate, air quality, device health and data flow.
//!
//! Readings come from a [`TelemetrySource`]. Each metric is mapped through a
//! per-metric policy into a Good/Warning/Critical status, and the result is
//! shown as KPI cards with trend arrows, progress bars and a recent alerts
//! panel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │ ticker  │───▶│   app    │───▶│   ui    │───▶│Terminal │  │
//! │  │ (tasks) │    │ (state)  │    │(render) │    │         │  │
//! │  └────┬────┘    └────┬─────┘    └─────────┘    └─────────┘  │
//! │       │              ▼                                      │
//! │       │         ┌──────────┐                                │
//! │       │         │   data   │ Dashboard, History, Export     │
//! │       ▼         └──────────┘                                │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── SimulatedSource | FileSource | StreamSource │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`TelemetrySource`] trait with a seeded random
//!   simulator, a JSON file replay, a pushed channel and an NDJSON stream
//! - **[`ticker`]**: Clock, telemetry and connectivity tasks, each the only
//!   writer of its own watch channel
//! - **[`data`]**: Classified dashboard cards, rolling history, alerts,
//!   connectivity and JSON export
//! - **[`settings`]**: Layered configuration (defaults, file, environment,
//!   command line)
//! - **[`app`]** / **[`events`]** / **[`ui`]**: TUI state, input handling and
//!   ratatui rendering
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Simulated facility, default cadence
//! twinwatch
//!
//! # Reproducible run, faster telemetry
//! twinwatch --seed 42 --telemetry-interval 1s
//!
//! # Print one classified reading set and exit
//! twinwatch --once
//! ```
//!
//! ### As a library
//!
//! ```
//! use twinwatch::{Export, Policies, SimulatedSource, TelemetrySource};
//!
//! let mut source = SimulatedSource::seeded(42);
//! let reading = source.read().unwrap();
//! let export = Export::new(reading, &Policies::default(), None);
//! assert_eq!(export.overall, reading.overall(&Policies::default()));
//! ```
//!
//! ### Driving the periodic tasks
//!
//! ```
//! use twinwatch::{Settings, SimulatedSource, Ticker};
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default();
//! let (mut ticker, mut feeds) = Ticker::spawn(Box::new(SimulatedSource::seeded(1)), &settings);
//! assert!(feeds.telemetry.changed().await);
//! ticker.shutdown();
//! # });
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod settings;
pub mod source;
pub mod ticker;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::{Alert, AlertLevel, Connectivity, Dashboard, Export, History, MetricCard};
pub use error::{Result, TwinError};
pub use settings::{Intervals, Overrides, Settings};
pub use source::{
    ChannelSource, FileSource, SimulatedSource, StreamSource, TelemetryEvent, TelemetrySource,
};
pub use ticker::{Feeds, Ticker};
pub use twinwatch_types::{Metric, Policies, ReadingSet, Status, Thresholds, Trend};
