//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::format_count;
use crate::app::{App, View};
use crate::data::duration::format_interval;

/// Render the header bar with the network overview.
///
/// Displays: tracked bus status, fleet counts by band, passenger totals and alert count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.reading.status();
    let (normal, nearly_full, overcrowded) = app.fleet.status_counts();

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.status_style(status)),
        Span::styled("FLEETWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", app.stats.active_buses),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" buses ("),
        Span::styled(format!("{}", normal), Style::default().fg(app.theme.normal)),
        Span::raw("/"),
        Span::styled(format!("{}", nearly_full), Style::default().fg(app.theme.warning)),
        Span::raw("/"),
        Span::styled(format!("{}", overcrowded), Style::default().fg(app.theme.danger)),
        Span::raw(") │ "),
        Span::raw(format!(
            "{} riders today",
            format_count(app.stats.total_passengers as u64)
        )),
        Span::raw(" │ "),
        if app.alert_count() > 0 {
            Span::styled(
                format!("{} alerts", app.alert_count()),
                Style::default().fg(app.theme.danger).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0 alerts", Style::default().add_modifier(Modifier::DIM))
        },
        if app.paused {
            Span::styled(" │ PAUSED", Style::default().fg(app.theme.warning))
        } else {
            Span::raw("")
        },
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(format!(" 2:Alerts ({}) ", app.alert_count())),
        Line::from(" 3:Fleet "),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Alerts => 1,
        View::Fleet => 2,
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
/// Shows: current view, time since the last telemetry tick and available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match app.last_tick {
        Some(at) => format!("Updated {:.1}s ago", at.elapsed().as_secs_f64()),
        None => format!("Waiting for first tick ({})", format_interval(app.intervals().telemetry)),
    };

    let controls = match app.current_view {
        View::Overview => "n:alert p:pause t:theme Tab:switch ?:help q:quit",
        View::Alerts => "↑↓:select n:alert c:clear Tab:switch ?:help q:quit",
        View::Fleet => "↑↓:select Tab:switch ?:help q:quit",
    };

    let status = format!(" {} | {} | {}", app.current_view.label(), updated, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
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
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Overview/Alerts/Fleet"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Alerts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  n         Raise an alert now"),
        Line::from("  c         Clear all alerts"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Force a telemetry tick"),
        Line::from("  p         Pause/resume"),
        Line::from("  t         Toggle theme"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
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

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
