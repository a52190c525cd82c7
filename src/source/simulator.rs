//! Random telemetry generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use twinwatch_types::{Metric, ReadingSet};

use super::TelemetrySource;

/// Sample one metric uniformly from its half-open range.
fn sample<R: Rng + ?Sized>(rng: &mut R, metric: Metric) -> i64 {
    rng.random_range(metric.range())
}

/// Generate a fresh reading set. Every field is sampled independently.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> ReadingSet {
    ReadingSet {
        power_usage: sample(rng, Metric::PowerUsage) as u32,
        temperature: sample(rng, Metric::Temperature) as i32,
        humidity: sample(rng, Metric::Humidity) as u32,
        air_quality: sample(rng, Metric::AirQuality) as u32,
        system_health: sample(rng, Metric::SystemHealth) as u32,
        active_devices: sample(rng, Metric::ActiveDevices) as u32,
        data_flow: sample(rng, Metric::DataFlow) as u32,
    }
}

/// Generate a reading set from the thread-local generator.
pub fn generate_reading() -> ReadingSet {
    generate(&mut rand::rng())
}

/// A source that produces a new random reading set on every read.
#[derive(Debug)]
pub struct SimulatedSource {
    rng: StdRng,
    description: String,
}

impl SimulatedSource {
    /// Create a simulator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            description: "simulator".to_string(),
        }
    }

    /// Create a deterministic simulator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            description: format!("simulator (seed {})", seed),
        }
    }

    /// Seeded when `seed` is set, otherwise OS-seeded.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for SimulatedSource {
    fn read(&mut self) -> Option<ReadingSet> {
        Some(generate(&mut self.rng))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
