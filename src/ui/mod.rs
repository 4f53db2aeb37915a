//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Tracked bus card, occupancy trend, stop load and daily profile
//! - [`alerts`]: The alert feed with severity and age labels
//! - [`fleet`]: Fleet table and a map of bus markers
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/alerts/fleet::render)      │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod alerts;
pub mod common;
pub mod fleet;
pub mod overview;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Draw one full frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.warning));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Overview => overview::render(frame, app, chunks[2]),
        View::Alerts => alerts::render(frame, app, chunks[2]),
        View::Fleet => fleet::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

/// Format a count for display (e.g., 1234 -> "1.2K", 1234567 -> "1.2M").
pub(crate) fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
