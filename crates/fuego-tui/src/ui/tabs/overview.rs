use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::reservations::render_reservation_table;

/// Render the Overview tab - KPI cards above the most recent requests
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(area);

    render_cards(frame, app, chunks[0]);

    let recent = app.recent_reservations();
    let title = if recent.is_empty() {
        " Recent requests - none yet ".to_string()
    } else {
        " Recent requests ".to_string()
    };
    render_reservation_table(frame, &recent, app.overview_selection, &title, chunks[1]);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let cards = [
        ("Today", stats.today, styles::title_style()),
        ("Pending", stats.pending, styles::highlight_style()),
        ("Confirmed", stats.confirmed, styles::success_style()),
        ("Total", stats.total, styles::list_item_style()),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value, style), column) in cards.into_iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(format!(" {}", value), style)),
            Line::from(Span::styled(format!(" {}", label), styles::muted_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(false));
        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}
