//! Overview rendering.
//!
//! The tracked bus card with its occupancy gauge and trend, the average load
//! per stop, and the daily occupancy profile.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Sparkline},
    Frame,
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);

    let left = Layout::vertical([
        Constraint::Length(8), // Bus card
        Constraint::Length(3), // Occupancy gauge
        Constraint::Min(4),    // Trend sparkline
    ])
    .split(columns[0]);

    let right = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    render_bus_card(frame, app, left[0]);
    render_gauge(frame, app, left[1]);
    render_trend(frame, app, left[2]);
    render_stop_load(frame, app, right[0]);
    render_daily_profile(frame, app, right[1]);
}

fn block<'a>(app: &App, title: String) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_bus_card(frame: &mut Frame, app: &App, area: Rect) {
    let reading = &app.reading;
    let status = reading.status();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let trend = match app.history.last_change() {
        Some(d) if d > 0 => Span::styled(format!("▲ +{}", d), Style::default().fg(app.theme.warning)),
        Some(d) if d < 0 => Span::styled(format!("▼ {}", d), Style::default().fg(app.theme.normal)),
        Some(_) => Span::raw("─ 0"),
        None => Span::styled("-", Style::default().add_modifier(Modifier::DIM)),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(" Passengers: "),
            Span::styled(
                format!("{}/{}", reading.passengers, reading.capacity),
                app.theme.status_style(status),
            ),
            Span::raw("   "),
            Span::styled(format!(" {} ", status.label()), app.theme.status_style(status)),
        ]),
        Line::from(vec![
            Span::raw(" Location:   "),
            Span::styled(format!("Near {}", reading.current_stop), bold),
        ]),
        Line::from(vec![
            Span::raw(" Next stop:  "),
            Span::styled(reading.next_stop.clone(), bold),
            Span::raw(format!(" ({} min)", app.stats.next_stop_eta)),
        ]),
        Line::from(vec![Span::raw(" Last tick:  "), trend]),
        Line::from(vec![
            Span::raw(" Boardings:  "),
            Span::styled(format!("{}", app.stats.boardings), bold),
            Span::raw("   Alightings: "),
            Span::styled(format!("{}", app.stats.alightings), bold),
        ]),
    ];

    let title = format!(" {} ", app.vehicle_id);
    let card = Paragraph::new(lines).block(
        block(app, title).border_style(Style::default().fg(app.theme.status_color(status))),
    );
    frame.render_widget(card, area);
}

fn render_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.reading.status();
    let percent = app.reading.occupancy_percent.min(100) as u16;
    let gauge = Gauge::default()
        .block(block(app, " Occupancy ".to_string()))
        .gauge_style(Style::default().fg(app.theme.status_color(status)))
        .percent(percent)
        .label(format!("{}%", percent));
    frame.render_widget(gauge, area);
}

fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.history.occupancy_series();
    let title = match app.history.average_occupancy() {
        Some(avg) => format!(" Occupancy trend (avg {:.0}%) ", avg),
        None => " Occupancy trend ".to_string(),
    };

    // Show the most recent readings that fit in the block.
    let width = area.width.saturating_sub(2) as usize;
    let visible = &series[series.len().saturating_sub(width)..];

    let sparkline = Sparkline::default()
        .block(block(app, title))
        .data(visible)
        .max(100)
        .style(Style::default().fg(app.theme.highlight));
    frame.render_widget(sparkline, area);
}

fn render_stop_load(frame: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = app
        .stop_loads
        .iter()
        .map(|load| {
            let color = app.theme.status_color(load.status());
            Bar::default()
                .value(load.average_passengers as u64)
                .label(Line::from(abbreviate(&load.stop, 7)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let count = bars.len().max(1);
    let bar_width = ((inner_width / count).saturating_sub(1)).clamp(3, 9) as u16;

    let chart = BarChart::default()
        .block(block(app, " Avg passengers per stop ".to_string()))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(app.reading.capacity as u64);
    frame.render_widget(chart, area);
}

fn render_daily_profile(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<u64> = app.hourly.iter().map(|v| v.round() as u64).collect();
    let peak = data
        .iter()
        .enumerate()
        .max_by_key(|(_, v)| **v)
        .map(|(hour, v)| format!(" Daily occupancy (peak {}% at {}:00) ", v, hour))
        .unwrap_or_else(|| " Daily occupancy ".to_string());

    let sparkline = Sparkline::default()
        .block(block(app, peak))
        .data(&data)
        .max(100)
        .style(Style::default().fg(app.theme.highlight));
    frame.render_widget(sparkline, area);
}

/// Shorten a stop name to fit under a bar.
fn abbreviate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        name.chars().take(max.saturating_sub(1)).chain(std::iter::once('.')).collect()
    }
}
