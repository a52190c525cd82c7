//! Historical readings for sparklines and trend arrows.

use std::collections::VecDeque;
use std::time::Instant;

use twinwatch_types::{Metric, ReadingSet, Trend};

/// Maximum number of historical reading sets to keep.
pub const MAX_HISTORY_SIZE: usize = 60;

/// Rolling window of recent reading sets.
///
/// Each reading set is kept whole; per-metric series are derived on demand.
#[derive(Debug, Clone, Default)]
pub struct History {
    readings: VecDeque<(Instant, ReadingSet)>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new reading set
    pub fn record(&mut self, reading: ReadingSet) {
        self.record_at(Instant::now(), reading);
    }

    /// Record a reading set received at `at`.
    pub fn record_at(&mut self, at: Instant, reading: ReadingSet) {
        self.readings.push_back((at, reading));
        if self.readings.len() > MAX_HISTORY_SIZE {
            self.readings.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Values of one metric, oldest first.
    pub fn series(&self, metric: Metric) -> Vec<i64> {
        self.readings.iter().map(|(_, r)| r.value(metric)).collect()
    }

    /// Direction of the most recent change, `None` with fewer than two readings.
    pub fn trend(&self, metric: Metric) -> Option<Trend> {
        let len = self.readings.len();
        if len < 2 {
            return None;
        }
        let current = self.readings[len - 1].1.value(metric);
        let previous = self.readings[len - 2].1.value(metric);
        Some(Trend::from_delta(current - previous))
    }

    /// Minimum, maximum and mean of one metric over the window.
    pub fn stats(&self, metric: Metric) -> Option<(i64, i64, f64)> {
        let series = self.series(metric);
        let min = *series.iter().min()?;
        let max = *series.iter().max()?;
        let mean = series.iter().sum::<i64>() as f64 / series.len() as f64;
        Some((min, max, mean))
    }

    /// Sparkline data for a metric (normalized to 0-7 for 8 bar levels).
    ///
    /// Values are scaled against the metric's simulated range so that bars
    /// are comparable across ticks. Returns an empty Vec without history.
    pub fn sparkline(&self, metric: Metric) -> Vec<u8> {
        let range = metric.range();
        let span = (range.end - 1 - range.start).max(1) as f64;

        self.readings
            .iter()
            .map(|(_, r)| {
                let v = r.value(metric).clamp(range.start, range.end - 1);
                let normalized = ((v - range.start) as f64 / span * 7.0).round() as u8;
                normalized.min(7)
            })
            .collect()
    }

    /// Seconds between the last two readings.
    pub fn last_interval_secs(&self) -> Option<f64> {
        let len = self.readings.len();
        if len < 2 {
            return None;
        }
        let current = self.readings[len - 1].0;
        let previous = self.readings[len - 2].0;
        Some(current.duration_since(previous).as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reading(power_usage: u32) -> ReadingSet {
        ReadingSet {
            power_usage,
            ..ReadingSet::default()
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY_SIZE as u32 + 15) {
            history.record(reading(70 + i % 30));
        }
        assert_eq!(history.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_oldest_entries_are_dropped() {
        let mut history = History::new();
        for _ in 0..MAX_HISTORY_SIZE {
            history.record(reading(70));
        }
        history.record(reading(99));
        let series = history.series(Metric::PowerUsage);
        assert_eq!(series.len(), MAX_HISTORY_SIZE);
        assert_eq!(series.last(), Some(&99));
    }

    #[test]
    fn test_trend_follows_last_delta() {
        let mut history = History::new();
        assert_eq!(history.trend(Metric::PowerUsage), None);

        history.record(reading(80));
        assert_eq!(history.trend(Metric::PowerUsage), None);

        history.record(reading(85));
        assert_eq!(history.trend(Metric::PowerUsage), Some(Trend::Up));

        history.record(reading(72));
        assert_eq!(history.trend(Metric::PowerUsage), Some(Trend::Down));

        history.record(reading(72));
        assert_eq!(history.trend(Metric::PowerUsage), Some(Trend::Stable));
    }

    #[test]
    fn test_sparkline_spans_range() {
        let mut history = History::new();
        history.record(reading(70));
        history.record(reading(99));
        assert_eq!(history.sparkline(Metric::PowerUsage), vec![0, 7]);
    }

    #[test]
    fn test_stats() {
        let mut history = History::new();
        assert!(history.stats(Metric::PowerUsage).is_none());
        history.record(reading(70));
        history.record(reading(80));
        history.record(reading(90));
        assert_eq!(history.stats(Metric::PowerUsage), Some((70, 90, 80.0)));
    }

    #[test]
    fn test_last_interval() {
        let mut history = History::new();
        let start = Instant::now();
        history.record_at(start, reading(70));
        history.record_at(start + Duration::from_secs(3), reading(71));
        assert_eq!(history.last_interval_secs(), Some(3.0));
    }
}
