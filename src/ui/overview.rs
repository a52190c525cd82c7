//! Overview view rendering.
//!
//! KPI cards grouped into System Overview and System Health panels, the
//! recent alerts feed and the data flow indicator.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, Paragraph},
    Frame,
};
use twinwatch_types::Metric;

use crate::app::App;
use crate::data::MetricCard;

const OVERVIEW_METRICS: [Metric; 4] = [
    Metric::PowerUsage,
    Metric::Temperature,
    Metric::Humidity,
    Metric::AirQuality,
];

const HEALTH_METRICS: [Metric; 2] = [Metric::SystemHealth, Metric::ActiveDevices];

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        let paragraph = Paragraph::new("Waiting for the first reading...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(panel(app, " System Overview "));
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(6), // System Overview
        Constraint::Min(6),    // System Health + Recent Alerts
        Constraint::Length(4), // Data Flow
    ])
    .split(area);

    // System Overview: four cards side by side
    let overview = panel(app, " System Overview ");
    let inner = overview.inner(chunks[0]);
    frame.render_widget(overview, chunks[0]);
    let cells = Layout::horizontal([Constraint::Fill(1); 4]).split(inner);
    for (metric, cell) in OVERVIEW_METRICS.iter().zip(cells.iter()) {
        if let Some(card) = dashboard.card(*metric) {
            render_card(frame, app, card, *cell);
        }
    }

    let middle = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(chunks[1]);

    // System Health: two cards stacked
    let health = panel(app, " System Health ");
    let inner = health.inner(middle[0]);
    frame.render_widget(health, middle[0]);
    let cells = Layout::vertical([Constraint::Length(4), Constraint::Length(4)]).split(inner);
    for (metric, cell) in HEALTH_METRICS.iter().zip(cells.iter()) {
        if let Some(card) = dashboard.card(*metric) {
            render_card(frame, app, card, *cell);
        }
    }

    render_alerts(frame, app, middle[1]);

    if let Some(card) = dashboard.card(Metric::DataFlow) {
        render_data_flow(frame, app, card, dashboard.reading.active_devices, chunks[2]);
    }
}

fn panel<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Value line for a card, e.g. "92% ↑".
fn value_line<'a>(app: &App, card: &MetricCard) -> Line<'a> {
    let mut spans = vec![
        Span::styled(
            format!("{}{} ", card.value, card.metric.unit()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(card.trend.arrow()),
    ];
    if let Some(status) = card.status {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", status.symbol()), app.theme.badge_style(status)));
    }
    Line::from(spans)
}

fn render_card(frame: &mut Frame, app: &App, card: &MetricCard, area: Rect) {
    let border = card.status.map(|s| app.theme.status_style(s)).unwrap_or_default();
    let block = Block::default()
        .title(format!(" {} ", card.metric.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);
    frame.render_widget(Paragraph::new(value_line(app, card)), rows[0]);

    if let Some(progress) = card.progress {
        let gauge = LineGauge::default()
            .filled_style(Style::default().fg(app.theme.gauge))
            .ratio(f64::from(progress.min(100)) / 100.0)
            .label(format!("{}%", progress));
        frame.render_widget(gauge, rows[1]);
    }
}

fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .alerts
        .iter()
        .map(|alert| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", app.theme.alert_style(alert.level)),
                    Span::raw(alert.message.clone()),
                ]),
                Line::from(Span::styled(
                    format!("  {}", alert.age_label()),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(panel(app, " Recent Alerts "));
    frame.render_widget(list, area);
}

fn render_data_flow(
    frame: &mut Frame,
    app: &App,
    card: &MetricCard,
    connected_devices: u32,
    area: Rect,
) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {} ", card.value, card.metric.unit()),
                Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
            ),
            Span::raw(card.trend.arrow()),
            Span::raw("  "),
            Span::styled(" STREAMING ", app.theme.tab_active.add_modifier(Modifier::REVERSED)),
        ]),
        Line::from(Span::styled(
            format!(
                "Data streams from {} connected devices across the digital twin environment.",
                connected_devices
            ),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel(app, " Data Flow ")), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::History;
    use crate::ui::Theme;
    use twinwatch_types::{Policies, ReadingSet, Status, Trend};

    fn test_app() -> App {
        let (_tx, source) = crate::source::ChannelSource::create("test");
        let (_clock_tx, clock) = tokio::sync::watch::channel(chrono::Local::now());
        let (_conn_tx, connectivity) = tokio::sync::watch::channel(Default::default());
        let feeds = crate::ticker::Feeds {
            clock,
            telemetry: source,
            connectivity,
            refresh: Default::default(),
        };
        App::with_theme(feeds, &crate::settings::Settings::default(), Theme::dark())
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_value_line_has_unit_trend_and_badge() {
        let reading = ReadingSet {
            power_usage: 92,
            ..ReadingSet::default()
        };
        let dashboard =
            crate::data::Dashboard::from_reading(reading, &Policies::default(), &History::new());
        let card = dashboard.card(Metric::PowerUsage).unwrap();
        assert_eq!(card.status, Some(Status::Critical));

        let text = line_text(&value_line(&test_app(), card));
        assert_eq!(text, "92% ↑  CRITICAL ");
    }

    #[test]
    fn test_data_flow_has_no_badge() {
        let card = MetricCard {
            metric: Metric::DataFlow,
            value: 175,
            status: None,
            trend: Trend::Stable,
            progress: None,
        };
        assert_eq!(line_text(&value_line(&test_app(), &card)), "175MB/s →");
    }
}
