//! # twinwatch-types
//!
//! Core types for digital twin telemetry. This crate defines the reading set
//! produced by a telemetry source, the metrics it carries, and the
//! two-threshold policy used to classify each metric as good, warning or
//! critical.
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) serialization. Reading sets use
//!   camelCase keys, statuses serialize as lowercase strings.
//!
//! ## Example
//!
//! ```rust
//! use twinwatch_types::{classify, Metric, Policies, ReadingSet, Status, Thresholds};
//!
//! assert_eq!(classify(95.0, Thresholds::new(90.0, 75.0)), Status::Good);
//! assert_eq!(classify(80.0, Thresholds::new(90.0, 75.0)), Status::Warning);
//! assert_eq!(classify(60.0, Thresholds::new(90.0, 75.0)), Status::Critical);
//!
//! // Power usage is "lower is better": 92% is inverted to 8 before classification.
//! let reading = ReadingSet { power_usage: 92, ..ReadingSet::default() };
//! let policies = Policies::default();
//! assert_eq!(reading.status(Metric::PowerUsage, &policies), Some(Status::Critical));
//! ```

mod metric;
mod policy;
mod reading;
mod status;

pub use metric::{Metric, Trend};
pub use policy::{MetricPolicy, Policies, Transform};
pub use reading::ReadingSet;
pub use status::{classify, Status, Thresholds};
