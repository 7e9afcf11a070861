use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use fuego_core::models::Reservation;
use fuego_core::utils::truncate_string;

use crate::app::App;
use crate::ui::styles;

/// Render the Reservations tab - filterable table of every booking
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered_reservations();
    let title = format!(
        " Reservations - {} ({} of {}) ",
        app.status_filter.title(),
        filtered.len(),
        app.reservations.len()
    );
    render_reservation_table(frame, &filtered, app.reservation_selection, &title, area);
}

/// Table shared by the Overview and Reservations tabs.
pub fn render_reservation_table(
    frame: &mut Frame,
    reservations: &[&Reservation],
    selection: usize,
    title: &str,
    area: Rect,
) {
    let header = Row::new([
        Cell::from("Client"),
        Cell::from("Phone"),
        Cell::from("Guests"),
        Cell::from("Date"),
        Cell::from("Time"),
        Cell::from("Table"),
        Cell::from("Status"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = reservations
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = if i == selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            let name = if r.is_local() {
                format!("{} *", truncate_string(&r.client_name, 22))
            } else {
                truncate_string(&r.client_name, 24)
            };
            Row::new(vec![
                Cell::from(name),
                Cell::from(r.phone.clone()),
                Cell::from(r.pax.clone()),
                Cell::from(r.date.clone()),
                Cell::from(r.time.clone()),
                Cell::from(truncate_string(&r.table_type, 18)),
                Cell::from(Span::styled(r.status.to_string(), styles::status_style(r.status))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title.to_string())
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !reservations.is_empty() {
        state.select(Some(selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
