use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::TAB_TITLES;

/// File written by the export key.
pub const EXPORT_FILE: &str = "twin_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Trends),

        // Navigation (up/down for metrics, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Esc => app.set_view(View::Overview),

        KeyCode::Char('r') => app.refresh_now(),

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, tabs_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) if mouse.row == tabs_row => {
            if let Some(view) = tab_at(mouse.column) {
                app.set_view(view);
            }
        }

        _ => {}
    }
}

/// The tab under a column of the tab bar. Each title is padded by one
/// column on both sides and followed by a one-column divider.
fn tab_at(column: u16) -> Option<View> {
    let mut end = 0u16;
    for (i, title) in TAB_TITLES.iter().enumerate() {
        end += title.chars().count() as u16 + 3;
        if column < end {
            return Some(if i == 0 { View::Overview } else { View::Trends });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::source::ChannelSource;
    use crate::ticker::Feeds;
    use crate::ui::Theme;
    use crossterm::event::KeyEventState;
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_view_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Trends);
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.current_view, View::Overview);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Trends);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.current_view, View::Overview);
        handle_key_event(&mut app, key(KeyCode::Right));
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_trends_navigation() {
        let mut app = test_app();
        app.set_view(View::Trends);
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_metric_index, 2);
        handle_key_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_metric_index, 1);
        handle_key_event(&mut app, key(KeyCode::End));
        assert_eq!(app.selected_metric_index, 6);
    }

    #[test]
    fn test_export_without_data_reports_failure() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('e')));
        let msg = app.get_status_message().unwrap();
        assert!(msg.starts_with("Export failed"), "{msg}");
    }

    #[test]
    fn test_tab_click() {
        let mut app = test_app();
        // " 1:Overview " plus padding spans columns 0..14, divider at 14
        handle_mouse_event(&mut app, click(18, 1), 1);
        assert_eq!(app.current_view, View::Trends);
        handle_mouse_event(&mut app, click(3, 1), 1);
        assert_eq!(app.current_view, View::Overview);

        // Clicks outside the tab row are ignored
        handle_mouse_event(&mut app, click(18, 5), 1);
        assert_eq!(app.current_view, View::Overview);
        assert_eq!(tab_at(200), None);
    }
}
