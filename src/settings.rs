//! Layered settings: built-in defaults, then an optional TOML file, then
//! `TWINWATCH_`-prefixed environment variables, then command-line overrides.
//!
//! ```toml
//! telemetry_interval = "2s"
//! uptime = 0.95
//!
//! [thresholds.air_quality]
//! good = 85
//! warning = 65
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `TWINWATCH_THRESHOLDS__AIR_QUALITY__GOOD=85`.

use std::path::Path;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use tracing::warn;
use twinwatch_types::{Policies, Thresholds};

use crate::data::duration::parse_duration;
use crate::data::DEFAULT_UPTIME;
use crate::error::{Result, TwinError};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TWINWATCH";

/// Periods of the three independent periodic tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub clock: Duration,
    pub telemetry: Duration,
    pub connectivity: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            clock: Duration::from_secs(1),
            telemetry: Duration::from_secs(3),
            connectivity: Duration::from_secs(5),
        }
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub intervals: Intervals,
    /// Probability that a connectivity tick reports the link as up.
    pub uptime: f64,
    /// Seed for the simulator and connectivity sampling.
    pub seed: Option<u64>,
    pub policies: Policies,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intervals: Intervals::default(),
            uptime: DEFAULT_UPTIME,
            seed: None,
            policies: Policies::default(),
        }
    }
}

/// Command-line values, layered above the file and the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub clock_interval: Option<String>,
    pub telemetry_interval: Option<String>,
    pub connectivity_interval: Option<String>,
    pub uptime: Option<f64>,
    pub seed: Option<u64>,
}

impl Overrides {
    fn apply(&self, builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>> {
        Ok(builder
            .set_override_option("clock_interval", self.clock_interval.clone())?
            .set_override_option("telemetry_interval", self.telemetry_interval.clone())?
            .set_override_option("connectivity_interval", self.connectivity_interval.clone())?
            .set_override_option("uptime", self.uptime)?
            .set_override_option("seed", self.seed)?)
    }
}

/// Settings exactly as they come out of the config layers.
#[derive(Debug, Deserialize)]
struct RawSettings {
    clock_interval: String,
    telemetry_interval: String,
    connectivity_interval: String,
    uptime: f64,
    seed: Option<u64>,
    thresholds: Policies,
}

impl Settings {
    /// Load every layer, with `overrides` taking precedence over the rest.
    pub fn load_layered(
        path: Option<&Path>,
        env: Environment,
        overrides: &Overrides,
    ) -> Result<Self> {
        let mut builder = defaults(Config::builder())?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = overrides.apply(builder.add_source(env))?;
        let raw: RawSettings = builder.build()?.try_deserialize()?;
        Self::from_raw(raw)
    }

    /// The `TWINWATCH_` environment layer.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let intervals = Intervals {
            clock: positive("clock_interval", &raw.clock_interval)?,
            telemetry: positive("telemetry_interval", &raw.telemetry_interval)?,
            connectivity: positive("connectivity_interval", &raw.connectivity_interval)?,
        };

        if !(0.0..=1.0).contains(&raw.uptime) {
            return Err(TwinError::InvalidSetting {
                key: "uptime",
                reason: format!("{} is not a probability in [0, 1]", raw.uptime),
            });
        }

        for metric in raw.thresholds.unordered() {
            warn!(%metric, "good threshold is below warning threshold; warning band is empty");
        }

        Ok(Self {
            intervals,
            uptime: raw.uptime,
            seed: raw.seed,
            policies: raw.thresholds,
        })
    }
}

fn positive(key: &'static str, value: &str) -> Result<Duration> {
    let duration = parse_duration(value)?;
    if duration.is_zero() {
        return Err(TwinError::InvalidSetting {
            key,
            reason: "interval must be greater than zero".to_string(),
        });
    }
    Ok(duration)
}

/// Threshold tables and their config keys.
fn threshold_entries(policies: &Policies) -> [(&'static str, Thresholds); 6] {
    [
        ("power_usage", policies.power_usage),
        ("temperature", policies.temperature),
        ("humidity", policies.humidity),
        ("air_quality", policies.air_quality),
        ("system_health", policies.system_health),
        ("active_devices", policies.active_devices),
    ]
}

/// Register every default key so later layers can override single values.
fn defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>> {
    let mut builder = builder
        .set_default("clock_interval", "1s")?
        .set_default("telemetry_interval", "3s")?
        .set_default("connectivity_interval", "5s")?
        .set_default("uptime", DEFAULT_UPTIME)?;

    for (name, thresholds) in threshold_entries(&Policies::default()) {
        builder = builder
            .set_default(format!("thresholds.{name}.good"), thresholds.good)?
            .set_default(format!("thresholds.{name}.warning"), thresholds.warning)?;
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::environment().source(Some(map.into_iter().collect()))
    }

    fn load(path: Option<&Path>, env: Environment) -> Result<Settings> {
        Settings::load_layered(path, env, &Overrides::default())
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = load(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.intervals.telemetry, Duration::from_secs(3));
        assert_eq!(settings.intervals.clock, Duration::from_secs(1));
        assert_eq!(settings.intervals.connectivity, Duration::from_secs(5));
        assert_eq!(settings.policies.power_usage, Thresholds::new(20.0, 10.0));
        assert_eq!(settings.policies.system_health, Thresholds::new(90.0, 75.0));
    }

    #[test]
    fn test_file_overrides_single_key() {
        let file = toml_file(
            r#"
            telemetry_interval = "2s"

            [thresholds.air_quality]
            good = 85
            "#,
        );
        let settings = load(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.intervals.telemetry, Duration::from_secs(2));
        assert_eq!(settings.policies.air_quality, Thresholds::new(85.0, 60.0));
        assert_eq!(settings.intervals.clock, Duration::from_secs(1));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file(r#"telemetry_interval = "2s""#);
        let settings = load(
            Some(file.path()),
            env(&[
                ("TWINWATCH_TELEMETRY_INTERVAL", "500ms"),
                ("TWINWATCH_SEED", "42"),
                ("TWINWATCH_THRESHOLDS__HUMIDITY__WARNING", "30"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.intervals.telemetry, Duration::from_millis(500));
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.policies.humidity, Thresholds::new(40.0, 30.0));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = load(None, env(&[("TWINWATCH_CLOCK_INTERVAL", "0s")])).unwrap_err();
        assert!(matches!(err, TwinError::InvalidSetting { key: "clock_interval", .. }));
    }

    #[test]
    fn test_rejects_bad_duration() {
        let err = load(None, env(&[("TWINWATCH_CLOCK_INTERVAL", "often")])).unwrap_err();
        assert!(matches!(err, TwinError::InvalidDuration(_)));
    }

    #[test]
    fn test_rejects_uptime_outside_unit_interval() {
        let err = load(None, env(&[("TWINWATCH_UPTIME", "1.5")])).unwrap_err();
        assert!(matches!(err, TwinError::InvalidSetting { key: "uptime", .. }));
    }

    #[test]
    fn test_overrides_beat_environment() {
        let overrides = Overrides {
            telemetry_interval: Some("1s".to_string()),
            uptime: Some(0.5),
            seed: Some(9),
            ..Overrides::default()
        };
        let settings = Settings::load_layered(
            None,
            env(&[("TWINWATCH_TELEMETRY_INTERVAL", "500ms"), ("TWINWATCH_SEED", "42")]),
            &overrides,
        )
        .unwrap();
        assert_eq!(settings.intervals.telemetry, Duration::from_secs(1));
        assert_eq!(settings.uptime, 0.5);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.intervals.clock, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = Overrides {
            connectivity_interval: Some("0ms".to_string()),
            ..Overrides::default()
        };
        let err = Settings::load_layered(None, env(&[]), &overrides).unwrap_err();
        assert!(matches!(err, TwinError::InvalidSetting { key: "connectivity_interval", .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/twinwatch.toml")), env(&[]));
        assert!(matches!(err, Err(TwinError::Config(_))));
    }
}
