//! Alert feed rendering.
//!
//! Newest alert first. While a clear is in progress each cleared entry fades
//! out in turn, top to bottom.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;

/// Delay between consecutive entries starting to fade.
const FADE_STAGGER: Duration = Duration::from_millis(50);

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " Alerts ({}/{}){} ",
        app.alert_count(),
        app.feed.max_visible(),
        if app.is_clearing() { " clearing…" } else { "" }
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.feed.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No active alerts",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let fading_elapsed = app.clearing_since.map(|since| since.elapsed());
    // Alerts raised after the clear started sit above the fading ones and stay.
    let first_fading = app.alert_count().saturating_sub(app.clearing_count);

    let items: Vec<ListItem> = app
        .feed
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let severity_style = app.theme.severity_style(entry.record.severity);
            let fading = index >= first_fading
                && fading_elapsed
                    .is_some_and(|e| e >= FADE_STAGGER * (index - first_fading) as u32);

            let mut item = ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:<7}", entry.record.severity.label()), severity_style),
                    Span::styled(
                        entry.record.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![Span::raw("       "), Span::raw(entry.record.description.clone())]),
                Line::from(vec![
                    Span::raw("       "),
                    Span::styled(entry.age.to_string(), Style::default().add_modifier(Modifier::DIM)),
                ]),
            ]);
            if fading {
                item = item.style(Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT));
            }
            item
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_alert_index.min(app.alert_count().saturating_sub(1))));

    frame.render_stateful_widget(list, area, &mut state);
}
