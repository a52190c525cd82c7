//! Three-level status classification.

use core::fmt;

/// Qualitative status of a metric.
///
/// Ordered from best to worst, so `max()` over a set of statuses yields the
/// worst one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    #[default]
    Good,
    Warning,
    Critical,
}

impl Status {
    /// Badge text for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Good => "GOOD",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A two-threshold policy. Both bounds are inclusive lower bounds.
///
/// Results are only meaningful when `good >= warning`; this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Values at or above this are good.
    pub good: f64,
    /// Values at or above this (and below `good`) are a warning.
    pub warning: f64,
}

impl Thresholds {
    pub const fn new(good: f64, warning: f64) -> Self {
        Self { good, warning }
    }

    /// Whether `good >= warning` holds.
    pub fn is_ordered(&self) -> bool {
        self.good >= self.warning
    }
}

/// Classify a value against a threshold policy.
///
/// Total over all `f64`: NaN fails both comparisons and is critical.
pub fn classify(value: f64, thresholds: Thresholds) -> Status {
    if value >= thresholds.good {
        Status::Good
    } else if value >= thresholds.warning {
        Status::Warning
    } else {
        Status::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: Thresholds = Thresholds::new(90.0, 75.0);

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(95.0, POLICY), Status::Good);
        assert_eq!(classify(80.0, POLICY), Status::Warning);
        assert_eq!(classify(60.0, POLICY), Status::Critical);
    }

    #[test]
    fn test_classify_inclusive_lower_bounds() {
        assert_eq!(classify(90.0, POLICY), Status::Good);
        assert_eq!(classify(75.0, POLICY), Status::Warning);
        assert_eq!(classify(74.999, POLICY), Status::Critical);
        assert_eq!(classify(89.999, POLICY), Status::Warning);
    }

    #[test]
    fn test_classify_is_pure() {
        for v in [-1e9, -1.0, 0.0, 74.0, 75.0, 89.0, 90.0, 1e9] {
            assert_eq!(classify(v, POLICY), classify(v, POLICY));
        }
    }

    #[test]
    fn test_classify_total_over_special_values() {
        assert_eq!(classify(f64::NAN, POLICY), Status::Critical);
        assert_eq!(classify(f64::INFINITY, POLICY), Status::Good);
        assert_eq!(classify(f64::NEG_INFINITY, POLICY), Status::Critical);
    }

    #[test]
    fn test_inverted_power_usage_scenario() {
        assert_eq!(classify(100.0 - 92.0, Thresholds::new(20.0, 10.0)), Status::Critical);
    }

    #[test]
    fn test_degenerate_thresholds() {
        // good < warning: nothing lands in the warning band
        let inverted = Thresholds::new(10.0, 20.0);
        assert!(!inverted.is_ordered());
        assert_eq!(classify(15.0, inverted), Status::Good);
        assert_eq!(classify(5.0, inverted), Status::Critical);
    }

    #[test]
    fn test_status_ordering_worst_is_max() {
        let worst = [Status::Good, Status::Critical, Status::Warning].into_iter().max();
        assert_eq!(worst, Some(Status::Critical));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Warning).unwrap(), "\"warning\"");
    }
}
