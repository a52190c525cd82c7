//! Data models and processing for telemetry readings.
//!
//! This module turns raw reading sets into classified, display-ready data.
//!
//! ## Submodules
//!
//! - [`alerts`]: The recent alerts feed
//! - [`connectivity`]: Simulated link state for the header badge
//! - [`dashboard`]: Per-metric cards with status, trend and progress
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "3s", "500ms")
//! - [`export`]: JSON export of a classified reading set
//! - [`history`]: Rolling window of readings for sparklines and trends
//!
//! ## Data Flow
//!
//! ```text
//! ReadingSet (from a TelemetrySource)
//!        │
//!        ├──▶ History::record() (for sparklines and trends)
//!        │
//!        ▼
//! Dashboard::from_reading()
//!        │
//!        └──▶ MetricCard (status from Policies, trend from History)
//! ```

pub mod alerts;
pub mod connectivity;
pub mod dashboard;
pub mod duration;
pub mod export;
pub mod history;

pub use alerts::{recent_alerts, Alert, AlertLevel};
pub use connectivity::{Connectivity, DEFAULT_UPTIME};
pub use dashboard::{Dashboard, MetricCard};
pub use export::Export;
pub use history::{History, MAX_HISTORY_SIZE};
