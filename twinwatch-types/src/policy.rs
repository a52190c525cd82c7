//! Per-metric classification policies.
//!
//! Some metrics are "lower is better" or "closer to a setpoint is better".
//! A [`MetricPolicy`] maps the raw value into a "higher is better" score
//! before running [`classify`].

use crate::{classify, Metric, Status, Thresholds};

/// Value transform applied before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Classify the raw value.
    Identity,
    /// `ceiling - value`.
    Invert { ceiling: f64 },
    /// `ceiling - |value - setpoint|`.
    Setpoint { ceiling: f64, setpoint: f64 },
}

impl Transform {
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Transform::Identity => value,
            Transform::Invert { ceiling } => ceiling - value,
            Transform::Setpoint { ceiling, setpoint } => ceiling - (value - setpoint).abs(),
        }
    }
}

/// A transform paired with the thresholds applied to its output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPolicy {
    pub transform: Transform,
    pub thresholds: Thresholds,
}

impl MetricPolicy {
    pub fn classify(&self, value: f64) -> Status {
        classify(self.transform.apply(value), self.thresholds)
    }
}

/// Thresholds for every classified metric.
///
/// Transforms are fixed per metric; only the thresholds are configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Policies {
    pub power_usage: Thresholds,
    pub temperature: Thresholds,
    pub humidity: Thresholds,
    pub air_quality: Thresholds,
    pub system_health: Thresholds,
    pub active_devices: Thresholds,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            power_usage: Thresholds::new(20.0, 10.0),
            temperature: Thresholds::new(5.0, 3.0),
            humidity: Thresholds::new(40.0, 25.0),
            air_quality: Thresholds::new(80.0, 60.0),
            system_health: Thresholds::new(90.0, 75.0),
            active_devices: Thresholds::new(95.0, 90.0),
        }
    }
}

impl Policies {
    /// The policy for a metric, or `None` for unclassified metrics.
    pub fn get(&self, metric: Metric) -> Option<MetricPolicy> {
        let (transform, thresholds) = match metric {
            Metric::PowerUsage => (Transform::Invert { ceiling: 100.0 }, self.power_usage),
            Metric::Temperature => (
                Transform::Setpoint {
                    ceiling: 30.0,
                    setpoint: 22.0,
                },
                self.temperature,
            ),
            Metric::Humidity => (
                Transform::Setpoint {
                    ceiling: 100.0,
                    setpoint: 50.0,
                },
                self.humidity,
            ),
            Metric::AirQuality => (Transform::Identity, self.air_quality),
            Metric::SystemHealth => (Transform::Identity, self.system_health),
            Metric::ActiveDevices => (Transform::Identity, self.active_devices),
            Metric::DataFlow => return None,
        };
        Some(MetricPolicy {
            transform,
            thresholds,
        })
    }

    /// Metrics whose thresholds have `good < warning`.
    pub fn unordered(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.get(*m).is_some_and(|p| !p.thresholds.is_ordered()))
            .collect()
    }
}
