use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use fuego_core::utils::{format_price, truncate_string};

use crate::app::App;
use crate::ui::styles;

/// Render the Menu tab - item table with the selected item's details
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_menu_table(frame, app, chunks[0]);
    render_item_detail(frame, app, chunks[1]);
}

fn render_menu_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([
        Cell::from(""),
        Cell::from("Item"),
        Cell::from("Category"),
        Cell::from("Price"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .menu
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.menu_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            let marker = if item.highlight { "★" } else { "" };
            Row::new(vec![
                Cell::from(Span::styled(marker, styles::highlight_style())),
                Cell::from(truncate_string(&item.name, 32)),
                Cell::from(Span::styled(item.category.clone(), styles::muted_style())),
                Cell::from(format!("{:>12}", format_price(item.price))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Fill(3),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let title = format!(" Menu ({}) - [e]dit price [r]eset ", app.menu.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !app.menu.is_empty() {
        state.select(Some(app.menu_selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_menu_item() {
        Some(item) => vec![
            Line::from(Span::styled(item.name.clone(), styles::title_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Price:     ", styles::muted_style()),
                Span::styled(format_price(item.price), styles::highlight_style()),
            ]),
            Line::from(vec![
                Span::styled("Category:  ", styles::muted_style()),
                Span::raw(item.category.clone()),
            ]),
            Line::from(vec![
                Span::styled("Featured:  ", styles::muted_style()),
                Span::raw(if item.highlight { "yes" } else { "no" }),
            ]),
            Line::from(""),
            Line::from(item.description.clone()),
            Line::from(""),
            Line::from(Span::styled(item.image.clone(), styles::muted_style())),
        ],
        None => vec![Line::from(Span::styled("No menu items", styles::muted_style()))],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}
