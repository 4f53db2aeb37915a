//! Fleet rendering: a table of buses beside a map of their markers.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Cell, Row, Table, TableState,
    },
    Frame,
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(area);
    render_table(frame, app, chunks[0]);
    render_map(frame, app, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Bus"),
        Cell::from("Location"),
        Cell::from("Load"),
        Cell::from("Occ."),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .fleet
        .buses()
        .iter()
        .map(|bus| {
            let style = app.theme.status_style(bus.status);
            Row::new(vec![
                Cell::from(bus.id.clone()),
                Cell::from(bus.location.clone()),
                Cell::from(format!("{}/{}", bus.passengers, bus.capacity)),
                Cell::from(format!("{}%", bus.occupancy_percent())),
                Cell::from(bus.status.label()).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2), // Bus
        Constraint::Fill(2), // Location
        Constraint::Length(6), // Load
        Constraint::Length(5), // Occupancy
        Constraint::Min(11), // Status
    ];

    let title = format!(" Fleet ({}) ", app.fleet.buses().len());
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
    state.select(Some(app.selected_bus_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let buses = app.fleet.buses();
    let selected = app.selected_bus_index;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" Map ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .marker(Marker::Dot)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(move |ctx| {
            for (index, bus) in buses.iter().enumerate() {
                let (x, y) = bus.position;
                // Canvas y grows upward; map percent grows downward.
                let y = 100.0 - y;
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color: app.theme.status_color(bus.status),
                });
                let label = bus.id.split('-').nth(1).unwrap_or(&bus.id).to_string();
                let style = if index == selected {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(app.theme.status_color(bus.status))
                };
                ctx.print(x + 2.0, y, Line::styled(label, style));
            }
        });

    frame.render_widget(canvas, area);
}
