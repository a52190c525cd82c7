//! Recent alerts feed.
//!
//! The simulated facility does not raise alerts of its own; the panel shows
//! a fixed feed of recent events.

use std::time::Duration;

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

/// A single entry in the recent alerts panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
    /// How long ago the alert was raised.
    pub age: Duration,
}

impl Alert {
    pub fn new(message: impl Into<String>, level: AlertLevel, age: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            age,
        }
    }

    /// Relative age, e.g. "2 minutes ago".
    pub fn age_label(&self) -> String {
        let secs = self.age.as_secs();
        match secs {
            0..=59 => "just now".to_string(),
            60..=119 => "1 minute ago".to_string(),
            120..=3599 => format!("{} minutes ago", secs / 60),
            3600..=7199 => "1 hour ago".to_string(),
            _ => format!("{} hours ago", secs / 3600),
        }
    }
}

/// The recent alerts feed, newest first.
pub fn recent_alerts() -> Vec<Alert> {
    vec![
        Alert::new(
            "Temperature spike detected in Zone A",
            AlertLevel::Warning,
            Duration::from_secs(2 * 60),
        ),
        Alert::new(
            "Power consumption optimized",
            AlertLevel::Info,
            Duration::from_secs(5 * 60),
        ),
        Alert::new(
            "Sensor network synchronized",
            AlertLevel::Info,
            Duration::from_secs(8 * 60),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_alerts_newest_first() {
        let alerts = recent_alerts();
        assert_eq!(alerts.len(), 3);
        assert!(alerts.windows(2).all(|w| w[0].age <= w[1].age));
        assert_eq!(alerts[0].level, AlertLevel::Warning);
    }

    #[test]
    fn test_age_label() {
        let alert = |secs| Alert::new("x", AlertLevel::Info, Duration::from_secs(secs));
        assert_eq!(alert(10).age_label(), "just now");
        assert_eq!(alert(90).age_label(), "1 minute ago");
        assert_eq!(alert(120).age_label(), "2 minutes ago");
        assert_eq!(alert(7200).age_label(), "2 hours ago");
    }
}
