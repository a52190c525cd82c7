//! Application state and navigation logic.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use tokio::sync::{watch, Notify};
use twinwatch_types::{Metric, Policies};

use crate::data::{recent_alerts, Alert, Connectivity, Dashboard, Export, History};
use crate::settings::Settings;
use crate::source::TelemetrySource;
use crate::ticker::Feeds;
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// KPI cards, recent alerts and the data flow indicator.
    Overview,
    /// Per-metric history with sparklines and window statistics.
    Trends,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Trends,
            View::Trends => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        // Two views: previous and next coincide
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Trends => "Trends",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Feeds from the periodic tasks
    source: Box<dyn TelemetrySource>,
    clock: watch::Receiver<DateTime<Local>>,
    connectivity_feed: watch::Receiver<Connectivity>,
    refresh: Arc<Notify>,

    // Latest state, one slice per feed
    pub dashboard: Option<Dashboard>,
    pub history: History,
    pub load_error: Option<String>,
    pub now: DateTime<Local>,
    pub connectivity: Connectivity,
    pub alerts: Vec<Alert>,

    pub policies: Policies,
    pub telemetry_interval: Duration,

    // Trends view selection
    pub selected_metric_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given feeds.
    pub fn new(feeds: Feeds, settings: &Settings) -> Self {
        Self::with_theme(feeds, settings, Theme::auto_detect())
    }

    pub fn with_theme(feeds: Feeds, settings: &Settings, theme: Theme) -> Self {
        let now = *feeds.clock.borrow();
        let connectivity = *feeds.connectivity.borrow();
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            source: Box::new(feeds.telemetry),
            clock: feeds.clock,
            connectivity_feed: feeds.connectivity,
            refresh: feeds.refresh,
            dashboard: None,
            history: History::new(),
            load_error: None,
            now,
            connectivity,
            alerts: recent_alerts(),
            policies: settings.policies,
            telemetry_interval: settings.intervals.telemetry,
            selected_metric_index: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current telemetry source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Pick up whatever the periodic tasks have published since the last
    /// call. Never blocks.
    ///
    /// Returns true if a new reading set arrived.
    pub fn reload_data(&mut self) -> bool {
        if self.clock.has_changed().unwrap_or(false) {
            self.now = *self.clock.borrow_and_update();
        }
        if self.connectivity_feed.has_changed().unwrap_or(false) {
            self.connectivity = *self.connectivity_feed.borrow_and_update();
        }

        match self.source.read() {
            Some(reading) => {
                self.history.record(reading);
                let dashboard = Dashboard::from_reading(reading, &self.policies, &self.history);
                self.dashboard = Some(dashboard);
                self.load_error = None;
                true
            }
            None => {
                if let Some(err) = self.source.error() {
                    self.load_error = Some(err.to_string());
                }
                false
            }
        }
    }

    /// Ask the telemetry task for an immediate reading.
    pub fn refresh_now(&mut self) {
        self.refresh.notify_one();
        self.set_status_message("Refreshing telemetry".to_string());
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// The metric highlighted in the Trends view.
    pub fn selected_metric(&self) -> Metric {
        Metric::ALL[self.selected_metric_index.min(Metric::ALL.len() - 1)]
    }

    /// Move selection down by one row (Trends view only).
    pub fn select_next(&mut self) {
        if self.current_view == View::Trends {
            let last = Metric::ALL.len() - 1;
            self.selected_metric_index = (self.selected_metric_index + 1).min(last);
        }
    }

    /// Move selection up by one row (Trends view only).
    pub fn select_prev(&mut self) {
        if self.current_view == View::Trends {
            self.selected_metric_index = self.selected_metric_index.saturating_sub(1);
        }
    }

    pub fn select_first(&mut self) {
        self.selected_metric_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_metric_index = Metric::ALL.len() - 1;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current classified reading set to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref dashboard) = self.dashboard else {
            anyhow::bail!("No data to export");
        };

        Export::new(dashboard.reading, &self.policies, Some(self.connectivity)).write(path)?;
        Ok(())
    }
}
