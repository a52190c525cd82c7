//! Classified dashboard model built from one reading set.

use std::time::Instant;

use twinwatch_types::{Metric, Policies, ReadingSet, Status, Trend};

use super::History;

/// One KPI card.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub metric: Metric,
    pub value: i64,
    /// `None` for metrics that are not classified (data flow).
    pub status: Option<Status>,
    pub trend: Trend,
    /// Progress bar fill in percent, for metrics that show one.
    pub progress: Option<u16>,
}

/// Everything the overview renders for the current tick.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub reading: ReadingSet,
    pub cards: Vec<MetricCard>,
    /// Worst status across all classified cards.
    pub overall: Status,
    pub last_updated: Instant,
}

impl Dashboard {
    /// Classify a reading set. Trends come from `history` when it holds at
    /// least two readings, otherwise from each metric's default hint.
    pub fn from_reading(reading: ReadingSet, policies: &Policies, history: &History) -> Self {
        let cards: Vec<MetricCard> = Metric::ALL
            .into_iter()
            .map(|metric| {
                let value = reading.value(metric);
                MetricCard {
                    metric,
                    value,
                    status: reading.status(metric, policies),
                    trend: history.trend(metric).unwrap_or_else(|| metric.default_trend()),
                    progress: metric.has_progress().then(|| value.clamp(0, 100) as u16),
                }
            })
            .collect();

        let overall = cards.iter().filter_map(|c| c.status).max().unwrap_or_default();

        Self {
            reading,
            cards,
            overall,
            last_updated: Instant::now(),
        }
    }

    pub fn card(&self, metric: Metric) -> Option<&MetricCard> {
        self.cards.iter().find(|c| c.metric == metric)
    }

    /// Number of classified cards with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.cards.iter().filter(|c| c.status == Some(status)).count()
    }
}
