use std::time::Duration;

use crate::error::{Result, TwinError};

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
];

/// Parse duration strings like "3s", "500ms", "1.5s", "2m"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str
                .trim()
                .parse()
                .map_err(|_| TwinError::InvalidDuration(s.to_string()))?;
            if !val.is_finite() || val < 0.0 {
                return Err(TwinError::InvalidDuration(s.to_string()));
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    Err(TwinError::InvalidDuration(s.to_string()))
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0ns".to_string()
    } else if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.0}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{}s", trim_zeros(d.as_secs_f64()))
    }
}

fn trim_zeros(secs: f64) -> String {
    let s = format!("{:.2}", secs);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
