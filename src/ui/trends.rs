//! Trends view rendering.
//!
//! One row per metric with the current value, window statistics and a
//! sparkline of recent readings.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use twinwatch_types::Metric;

use crate::app::App;
use crate::data::MAX_HISTORY_SIZE;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of readings shown in the sparkline column.
const SPARKLINE_WIDTH: usize = 20;

/// Column headers. The sparkline column shows the recorded window.
const HEADERS: [&str; 7] = ["Metric", "Current", "Min", "Max", "Avg", "History", "Status"];

/// Render the Trends view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(HEADERS.map(Cell::from))
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = Metric::ALL
        .iter()
        .map(|&metric| {
            let card = app.dashboard.as_ref().and_then(|d| d.card(metric));
            let unit = metric.unit();

            let current = card
                .map(|c| format!("{}{} {}", c.value, unit, c.trend.arrow()))
                .unwrap_or_else(|| "-".to_string());

            let (min, max, avg) = match app.history.stats(metric) {
                Some((min, max, avg)) => (
                    format!("{}{}", min, unit),
                    format!("{}{}", max, unit),
                    format!("{:.1}{}", avg, unit),
                ),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };

            let status = match card.and_then(|c| c.status) {
                Some(s) => Cell::from(s.symbol()).style(app.theme.status_style(s)),
                None if card.is_some() => {
                    Cell::from("STREAMING").style(Style::default().fg(app.theme.highlight))
                }
                None => Cell::from("-"),
            };

            Row::new(vec![
                Cell::from(metric.label()),
                Cell::from(current),
                Cell::from(min),
                Cell::from(max),
                Cell::from(avg),
                Cell::from(render_sparkline(&app.history.sparkline(metric))),
                status,
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),                     // Metric
        Constraint::Fill(1),                     // Current
        Constraint::Fill(1),                     // Min
        Constraint::Fill(1),                     // Max
        Constraint::Fill(1),                     // Avg
        Constraint::Min(SPARKLINE_WIDTH as u16), // Sparkline
        Constraint::Min(9),                      // Status
    ];

    let title = format!(
        " Trends ({}/{} readings) [{}/{}] ",
        app.history.len(),
        MAX_HISTORY_SIZE,
        app.selected_metric_index + 1,
        Metric::ALL.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_metric_index));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render sparkline levels as characters, keeping the most recent readings.
fn render_sparkline(levels: &[u8]) -> String {
    if levels.is_empty() {
        return "-".to_string();
    }
    let start = levels.len().saturating_sub(SPARKLINE_WIDTH);
    levels[start..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[(v as usize).min(7)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::source::ChannelSource;
    use crate::ticker::Feeds;
    use crate::ui::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::watch;

    fn test_app() -> App {
        let (_tx, telemetry) = ChannelSource::create("test");
        let (_clock_tx, clock) = watch::channel(chrono::Local::now());
        let (_conn_tx, connectivity) = watch::channel(Default::default());
        let feeds = Feeds {
            clock,
            telemetry,
            connectivity,
            refresh: Default::default(),
        };
        App::with_theme(feeds, &Settings::default(), Theme::dark())
    }

    #[test]
    fn test_header_labels_sparkline_as_history() {
        let app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal.draw(|frame| render(frame, &app, frame.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let header: String = (0..buffer.area.width).map(|x| buffer[(x, 1)].symbol()).collect();
        assert!(header.contains("History"), "{header}");
        assert!(!header.contains("Trend"), "{header}");
    }

    #[test]
    fn test_render_sparkline() {
        assert_eq!(render_sparkline(&[]), "-");
        assert_eq!(render_sparkline(&[0, 3, 7, 9]), "▁▄██");
    }

    #[test]
    fn test_sparkline_keeps_most_recent() {
        let mut levels = vec![0u8; SPARKLINE_WIDTH];
        levels.push(7);
        let line = render_sparkline(&levels);
        assert_eq!(line.chars().count(), SPARKLINE_WIDTH);
        assert_eq!(line.chars().last(), Some('█'));
    }
}
