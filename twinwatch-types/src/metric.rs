//! The metrics carried by a reading set.

use core::fmt;
use core::ops::Range;

/// One simulated facility metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Metric {
    PowerUsage,
    Temperature,
    Humidity,
    AirQuality,
    SystemHealth,
    ActiveDevices,
    DataFlow,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 7] = [
        Metric::PowerUsage,
        Metric::Temperature,
        Metric::Humidity,
        Metric::AirQuality,
        Metric::SystemHealth,
        Metric::ActiveDevices,
        Metric::DataFlow,
    ];

    /// Human-readable title.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::PowerUsage => "Power Usage",
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::AirQuality => "Air Quality",
            Metric::SystemHealth => "Overall Health",
            Metric::ActiveDevices => "Active Devices",
            Metric::DataFlow => "Data Flow",
        }
    }

    /// camelCase key used in serialized reading sets and exports.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::PowerUsage => "powerUsage",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::AirQuality => "airQuality",
            Metric::SystemHealth => "systemHealth",
            Metric::ActiveDevices => "activeDevices",
            Metric::DataFlow => "dataFlow",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::PowerUsage | Metric::Humidity | Metric::SystemHealth => "%",
            Metric::Temperature => "°C",
            Metric::AirQuality => "AQI",
            Metric::ActiveDevices => "/100",
            Metric::DataFlow => "MB/s",
        }
    }

    /// Half-open range the simulator samples this metric from.
    pub fn range(&self) -> Range<i64> {
        match self {
            Metric::PowerUsage => 70..100,
            Metric::Temperature => 18..28,
            Metric::Humidity => 40..60,
            Metric::AirQuality => 60..100,
            Metric::SystemHealth => 85..100,
            Metric::ActiveDevices => 95..100,
            Metric::DataFlow => 150..200,
        }
    }

    /// Whether this metric receives a status. Data flow is shown as a stream
    /// indicator only.
    pub fn is_classified(&self) -> bool {
        !matches!(self, Metric::DataFlow)
    }

    /// Whether the card shows a progress bar of the raw value.
    pub fn has_progress(&self) -> bool {
        matches!(self, Metric::PowerUsage | Metric::SystemHealth)
    }

    /// Trend hint used before any history is available.
    pub fn default_trend(&self) -> Trend {
        match self {
            Metric::PowerUsage | Metric::AirQuality | Metric::SystemHealth => Trend::Up,
            Metric::Humidity => Trend::Down,
            Metric::Temperature | Metric::ActiveDevices | Metric::DataFlow => Trend::Stable,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of recent change for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Trend from the difference between the previous and current value.
    pub fn from_delta(delta: i64) -> Self {
        match delta.signum() {
            1 => Trend::Up,
            -1 => Trend::Down,
            _ => Trend::Stable,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}
