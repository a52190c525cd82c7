//! Terminal rendering using ratatui.
//!
//! - [`common`]: Header, tabs, status bar and help overlay
//! - [`overview`]: KPI cards, recent alerts and data flow
//! - [`trends`]: Per-metric history table with sparklines
//! - [`theme`]: Light and dark color themes

pub mod common;
pub mod overview;
pub mod theme;
pub mod trends;

pub use theme::Theme;
