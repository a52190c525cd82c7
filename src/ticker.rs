//! Periodic tasks driving the dashboard.
//!
//! Three independent tasks run on their own cadence, and each is the only
//! writer of its own watch channel:
//!
//! ```text
//! clock         every 1s  ──▶ watch<DateTime<Local>>
//! telemetry     every 3s  ──▶ watch<TelemetryEvent>   (via ChannelSource)
//! connectivity  every 5s  ──▶ watch<Connectivity>
//! ```
//!
//! The UI loop is the only reader. Each tick replaces its slice of state
//! wholesale. [`Ticker`] aborts every task on shutdown or drop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::data::Connectivity;
use crate::settings::Settings;
use crate::source::{ChannelSource, TelemetryEvent, TelemetrySource};

/// Receiving ends of the periodic tasks, handed to the UI.
#[derive(Debug)]
pub struct Feeds {
    pub clock: watch::Receiver<DateTime<Local>>,
    pub telemetry: ChannelSource,
    pub connectivity: watch::Receiver<Connectivity>,
    /// Wakes the telemetry task for an immediate reading.
    pub refresh: Arc<Notify>,
}

/// Owner of the running periodic tasks.
#[derive(Debug)]
pub struct Ticker {
    handles: Vec<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the clock, telemetry and connectivity tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(source: Box<dyn TelemetrySource>, settings: &Settings) -> (Self, Feeds) {
        let intervals = settings.intervals;
        let refresh = Arc::new(Notify::new());

        let (clock_tx, clock_rx) = watch::channel(Local::now());
        let (telemetry_tx, telemetry) = ChannelSource::create(source.description());
        let (connectivity_tx, connectivity_rx) = watch::channel(Connectivity::default());

        let connectivity_rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };

        let handles = vec![
            spawn_periodic("clock", intervals.clock, true, clock_tx, Local::now),
            spawn_telemetry(source, intervals.telemetry, telemetry_tx, refresh.clone()),
            // The link reads as up until the first full period has elapsed
            spawn_periodic("connectivity", intervals.connectivity, false, connectivity_tx, {
                let mut rng = connectivity_rng;
                let uptime = settings.uptime;
                move || Connectivity::sample(&mut rng, uptime)
            }),
        ];

        let feeds = Feeds {
            clock: clock_rx,
            telemetry,
            connectivity: connectivity_rx,
            refresh,
        };

        (Self { handles }, feeds)
    }

    /// Whether any task is still running.
    pub fn is_running(&self) -> bool {
        self.handles.iter().any(|h| !h.is_finished())
    }

    /// Stop every periodic task.
    pub fn shutdown(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        for handle in &self.handles {
            handle.abort();
        }
        info!(tasks = self.handles.len(), "periodic tasks stopped");
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

fn interval(period: Duration, immediate: bool) -> time::Interval {
    let start = if immediate { Instant::now() } else { Instant::now() + period };
    let mut interval = time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Publish `produce()` every `period`. The first tick fires immediately
/// when `immediate` is set, after one full period otherwise.
/// Exits once every receiver is gone.
fn spawn_periodic<T, F>(
    name: &'static str,
    period: Duration,
    immediate: bool,
    tx: watch::Sender<T>,
    mut produce: F,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    F: FnMut() -> T + Send + 'static,
{
    tokio::spawn(async move {
        debug!(task = name, ?period, immediate, "periodic task started");
        let mut interval = interval(period, immediate);
        loop {
            interval.tick().await;
            if tx.send(produce()).is_err() {
                debug!(task = name, "no receivers left; stopping");
                break;
            }
        }
    })
}

/// Read the source every `period`, or early when `refresh` is notified.
fn spawn_telemetry(
    mut source: Box<dyn TelemetrySource>,
    period: Duration,
    tx: watch::Sender<TelemetryEvent>,
    refresh: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(source = source.description(), ?period, "telemetry task started");
        let mut interval = interval(period, true);
        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = refresh.notified() => {
                    interval.reset();
                }
            }

            match source.read() {
                Some(reading) => {
                    debug!(?reading, "telemetry tick");
                    if tx.send(TelemetryEvent::Reading(reading)).is_err() {
                        debug!("no telemetry receivers left; stopping");
                        break;
                    }
                }
                None => {
                    if let Some(e) = source.error() {
                        let event = TelemetryEvent::SourceError(e.to_string());
                        let changed = tx.send_if_modified(|current| {
                            if *current == event {
                                false
                            } else {
                                *current = event.clone();
                                true
                            }
                        });
                        if changed {
                            warn!(error = e, "telemetry source error");
                        }
                    }
                    if tx.is_closed() {
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Intervals;
    use crate::source::SimulatedSource;
    use twinwatch_types::ReadingSet;

    fn settings(uptime: f64) -> Settings {
        Settings {
            intervals: Intervals::default(),
            uptime,
            seed: Some(7),
            ..Settings::default()
        }
    }

    fn spawn_simulated(seed: u64, uptime: f64) -> (Ticker, Feeds) {
        Ticker::spawn(Box::new(SimulatedSource::seeded(seed)), &settings(uptime))
    }

    #[derive(Debug)]
    struct FailingSource;

    impl TelemetrySource for FailingSource {
        fn read(&mut self) -> Option<ReadingSet> {
            None
        }
        fn description(&self) -> &str {
            "failing"
        }
        fn error(&self) -> Option<&str> {
            Some("Read error: sensor offline")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_telemetry_publishes_every_period() {
        let (_ticker, mut feeds) = spawn_simulated(1, 0.9);

        // First tick fires immediately
        time::sleep(Duration::from_millis(10)).await;
        assert!(feeds.telemetry.read().is_some());
        assert!(feeds.telemetry.read().is_none());

        // Nothing new before the period elapses
        time::sleep(Duration::from_secs(2)).await;
        assert!(feeds.telemetry.read().is_none());

        time::sleep(Duration::from_secs(1)).await;
        assert!(feeds.telemetry.read().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_ticker_matches_seeded_source() {
        let (_ticker, mut feeds) = spawn_simulated(5, 0.9);
        let mut expected = SimulatedSource::seeded(5);

        for _ in 0..3 {
            assert!(feeds.telemetry.changed().await);
            assert_eq!(feeds.telemetry.read(), expected.read());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_reads_early() {
        let (_ticker, mut feeds) = spawn_simulated(1, 0.9);
        time::sleep(Duration::from_millis(10)).await;
        assert!(feeds.telemetry.read().is_some());

        feeds.refresh.notify_one();
        time::sleep(Duration::from_millis(10)).await;
        assert!(feeds.telemetry.read().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_ticks_every_second() {
        let (_ticker, mut feeds) = spawn_simulated(1, 0.9);
        time::sleep(Duration::from_millis(10)).await;
        let _ = feeds.clock.borrow_and_update();

        time::sleep(Duration::from_secs(1)).await;
        assert!(feeds.clock.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_connectivity_follows_uptime() {
        let (_ticker, mut feeds) = spawn_simulated(1, 0.0);
        time::sleep(Duration::from_millis(5_010)).await;
        assert_eq!(*feeds.connectivity.borrow_and_update(), Connectivity::Offline);

        let (_ticker, mut feeds) = spawn_simulated(1, 1.0);
        for _ in 0..5 {
            time::sleep(Duration::from_secs(5)).await;
            assert_eq!(*feeds.connectivity.borrow_and_update(), Connectivity::Connected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_connectivity_waits_one_period_before_sampling() {
        let (_ticker, mut feeds) = spawn_simulated(1, 0.0);
        time::sleep(Duration::from_millis(10)).await;
        assert!(!feeds.connectivity.has_changed().unwrap());
        assert_eq!(*feeds.connectivity.borrow(), Connectivity::Connected);

        time::sleep(Duration::from_millis(4_980)).await;
        assert!(!feeds.connectivity.has_changed().unwrap());

        time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*feeds.connectivity.borrow_and_update(), Connectivity::Offline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_error_is_forwarded_once() {
        let (_ticker, mut feeds) = Ticker::spawn(Box::new(FailingSource), &settings(0.9));
        time::sleep(Duration::from_millis(10)).await;

        assert!(feeds.telemetry.read().is_none());
        assert_eq!(feeds.telemetry.error(), Some("Read error: sensor offline"));

        // The same error is not republished on later ticks
        time::sleep(Duration::from_secs(6)).await;
        assert!(!feeds.telemetry.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_tasks() {
        let (mut ticker, mut feeds) = spawn_simulated(1, 0.9);
        time::sleep(Duration::from_millis(10)).await;
        assert!(ticker.is_running());
        let _ = feeds.telemetry.read();

        ticker.shutdown();
        time::sleep(Duration::from_secs(10)).await;

        assert!(!ticker.is_running());
        assert!(feeds.telemetry.read().is_none());
        assert!(!feeds.telemetry.changed().await);
    }
}
