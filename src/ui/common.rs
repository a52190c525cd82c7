//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use twinwatch_types::Status;

use crate::app::{App, View};
use crate::data::duration::format_duration;

/// Tab titles, in the order of [`View`].
pub const TAB_TITLES: [&str; 2] = [" 1:Overview ", " 2:Trends "];

/// Render the header bar with the facility overview.
///
/// Displays: title, connectivity badge, status counts, alert count, clock.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" DIGITAL TWIN ", Style::default().add_modifier(Modifier::BOLD));
    let connectivity = Span::styled(
        format!(" {} ", app.connectivity.label()),
        app.theme.connectivity_style(app.connectivity),
    );
    let clock = Span::raw(format!(
        " {} · {} ",
        format_time(&app.now),
        format_date(&app.now)
    ));

    let Some(ref dashboard) = app.dashboard else {
        let line = Line::from(vec![
            title,
            Span::raw("│"),
            connectivity,
            Span::raw("│ Loading... │"),
            clock,
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let good = dashboard.count(Status::Good);
    let warning = dashboard.count(Status::Warning);
    let critical = dashboard.count(Status::Critical);

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.status_style(dashboard.overall)),
        title,
        Span::raw("│"),
        connectivity,
        Span::raw("│ "),
        Span::styled(format!("{}", good), Style::default().fg(app.theme.good)),
        Span::raw(" ok "),
        if warning > 0 {
            Span::styled(format!("{}", warning), Style::default().fg(app.theme.warning))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if critical > 0 {
            Span::styled(
                format!("{}", critical),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" crit │ "),
        Span::styled(
            format!("{}", app.alerts.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" alerts │"),
        clock,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Clock display, e.g. "14:03:22".
pub fn format_time(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Date display, e.g. "October 14, 2026".
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%B %-d, %Y").to_string()
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();

    let selected = match app.current_view {
        View::Overview => 0,
        View::Trends => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, refresh cadence, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Overview => "Tab:switch r:refresh e:export ?:help q:quit",
        View::Trends => "↑↓:select Tab:switch r:refresh e:export ?:help q:quit",
    };

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else if let Some(ref dashboard) = app.dashboard {
        format!(
            " {} | Updated {:.1}s ago | {} | {}",
            app.source_description(),
            dashboard.last_updated.elapsed().as_secs_f64(),
            cadence_label(app.telemetry_interval, app.history.last_interval_secs()),
            controls,
        )
    } else {
        format!(" {} | Waiting for telemetry... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Configured telemetry interval, plus the gap between the last two
/// readings once there are two.
fn cadence_label(configured: Duration, measured: Option<f64>) -> String {
    match measured {
        Some(secs) => format!("every {} (last {:.1}s)", format_duration(configured), secs),
        None => format!("every {}", format_duration(configured)),
    }
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab ←/→ h/l  Switch views"),
        Line::from("  1 / 2        Overview / Trends"),
        Line::from("  ↑/↓ j/k      Select metric (Trends)"),
        Line::from("  Home/End     Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r            Refresh telemetry now"),
        Line::from("  e            Export to JSON"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
