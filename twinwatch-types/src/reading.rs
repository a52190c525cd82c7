//! Reading set - one synchronized snapshot of every simulated metric.

use crate::{Metric, Policies, Status};

/// One tick's worth of facility telemetry.
///
/// Reading sets are replaced wholesale on every tick; there is no per-field
/// merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReadingSet {
    /// Power draw as a percentage of capacity.
    pub power_usage: u32,
    /// Ambient temperature in degrees Celsius.
    pub temperature: i32,
    /// Relative humidity percentage.
    pub humidity: u32,
    /// Air quality index (higher is better).
    pub air_quality: u32,
    /// Aggregate system health percentage.
    pub system_health: u32,
    /// Connected device count, out of 100.
    pub active_devices: u32,
    /// Data throughput in MB/s.
    pub data_flow: u32,
}

impl Default for ReadingSet {
    /// The lower bound of every simulated range.
    fn default() -> Self {
        Self {
            power_usage: 70,
            temperature: 18,
            humidity: 40,
            air_quality: 60,
            system_health: 85,
            active_devices: 95,
            data_flow: 150,
        }
    }
}

impl ReadingSet {
    /// Raw value of a metric.
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::PowerUsage => self.power_usage.into(),
            Metric::Temperature => self.temperature.into(),
            Metric::Humidity => self.humidity.into(),
            Metric::AirQuality => self.air_quality.into(),
            Metric::SystemHealth => self.system_health.into(),
            Metric::ActiveDevices => self.active_devices.into(),
            Metric::DataFlow => self.data_flow.into(),
        }
    }

    /// Status of a metric under the given policies, `None` if unclassified.
    pub fn status(&self, metric: Metric, policies: &Policies) -> Option<Status> {
        policies
            .get(metric)
            .map(|policy| policy.classify(self.value(metric) as f64))
    }

    /// Worst status across all classified metrics.
    pub fn overall(&self, policies: &Policies) -> Status {
        Metric::ALL
            .into_iter()
            .filter_map(|m| self.status(m, policies))
            .max()
            .unwrap_or_default()
    }

    /// Whether every field lies inside its simulated range.
    pub fn in_simulated_range(&self) -> bool {
        Metric::ALL
            .into_iter()
            .all(|m| m.range().contains(&self.value(m)))
    }
}
