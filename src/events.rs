use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// File written by the export key.
pub const EXPORT_FILE: &str = "fleetwatch_export.json";

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
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Alerts),
        KeyCode::Char('3') => app.set_view(View::Fleet),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Simulation controls
        KeyCode::Char('n') => {
            app.raise_synthetic_alert(Instant::now());
            app.set_status_message("Alert raised".to_string());
        }
        KeyCode::Char('c') => {
            if app.alert_count() > 0 {
                app.request_clear(Instant::now());
                app.set_status_message("Clearing alerts".to_string());
            }
        }
        KeyCode::Char('r') => app.telemetry_tick(Instant::now()),
        KeyCode::Char('p') => {
            app.toggle_pause(Instant::now());
            let message = if app.paused { "Paused" } else { "Resumed" };
            app.set_status_message(message.to_string());
        }
        KeyCode::Char('t') => app.toggle_theme(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path, Instant::now()) {
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
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab clicks (row 1, below the header)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            // Approximate tab positions: Overview (0-14), Alerts (15-30), Fleet (31-42)
            let col = mouse.column;
            if col < 15 {
                app.set_view(View::Overview);
            } else if col < 31 {
                app.set_view(View::Alerts);
            } else if col < 43 {
                app.set_view(View::Fleet);
            }
        }

        _ => {}
    }
}
