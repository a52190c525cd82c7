//! Simulated network connectivity.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default probability of being connected on any connectivity tick.
pub const DEFAULT_UPTIME: f64 = 0.9;

/// Link state shown in the header badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Connected,
    Offline,
}

impl Connectivity {
    /// Sample a link state: connected with probability `uptime`.
    ///
    /// `uptime` must lie in `[0, 1]`; settings validation enforces this.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, uptime: f64) -> Self {
        if rng.random_bool(uptime) {
            Connectivity::Connected
        } else {
            Connectivity::Offline
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Connected => "CONNECTED",
            Connectivity::Offline => "OFFLINE",
        }
    }
}
