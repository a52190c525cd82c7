//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use twinwatch_types::Status;

use crate::data::{AlertLevel, Connectivity};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for good status.
    pub good: Color,
    /// Color for warning status.
    pub warning: Color,
    /// Color for critical status.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles and header rows.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Gauge fill color.
    pub gauge: Color,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            good: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            gauge: Color::Cyan,
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            good: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            gauge: Color::Blue,
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a status
    pub fn status_style(&self, status: Status) -> Style {
        match status {
            Status::Good => Style::default().fg(self.good),
            Status::Warning => Style::default().fg(self.warning),
            Status::Critical => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Badge style: status color as background.
    pub fn badge_style(&self, status: Status) -> Style {
        let bg = match status {
            Status::Good => self.good,
            Status::Warning => self.warning,
            Status::Critical => self.critical,
        };
        Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD)
    }

    pub fn alert_style(&self, level: AlertLevel) -> Style {
        match level {
            AlertLevel::Info => Style::default().fg(self.good),
            AlertLevel::Warning => Style::default().fg(self.warning),
            AlertLevel::Error => Style::default().fg(self.critical),
        }
    }

    pub fn connectivity_style(&self, connectivity: Connectivity) -> Style {
        if connectivity.is_online() {
            Style::default().fg(self.good).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }
}
