use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use fuego_core::utils::{format_date, truncate_string};

use crate::app::App;
use crate::ui::styles;

/// Lines of the setup SQL shown in the preview pane.
const SQL_PREVIEW_LINES: usize = 12;

/// Render the Settings tab - announcements on the left, system tools on the right
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_announcements(frame, app, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(chunks[1]);

    render_status_card(frame, app, right[0]);
    render_sql_preview(frame, app, right[1]);
}

fn render_announcements(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(22) as usize;
    let items: Vec<ListItem> = app
        .announcements
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let (badge, badge_style) = if a.is_active {
                ("[on] ", styles::success_style())
            } else {
                ("[off]", styles::muted_style())
            };
            let style = if i == app.announcement_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(badge, badge_style),
                Span::raw(" "),
                Span::raw(truncate_string(&a.message, width.max(10))),
                Span::styled(format!("  {}", format_date(a.created_at)), styles::muted_style()),
            ]))
            .style(style)
        })
        .collect();

    let title = if app.posting_announcement {
        " Announcements - posting... ".to_string()
    } else {
        format!(" Announcements ({}) - [a]dd [space] toggle ", app.announcements.len())
    };
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No announcements. Press [a] to post one.",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.announcement_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_card(frame: &mut Frame, app: &App, area: Rect) {
    let (state, detail) = if app.db_connected {
        ("System online", "Reads and writes go to the database.")
    } else if app.has_remote() {
        ("Database unreachable", "Working from the local cache until it answers.")
    } else {
        ("Local mode", "No database configured; data stays on this machine.")
    };

    let lines = vec![
        Line::from(Span::styled(format!("● {}", state), styles::connection_style(app.db_connected))),
        Line::from(Span::styled(detail, styles::muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Cache:  ", styles::muted_style()),
            Span::raw(format!("updated {}", app.cache_ages.last_updated())),
        ]),
        Line::from(vec![
            Span::styled("Menu:   ", styles::muted_style()),
            Span::raw(if app.resetting_menu {
                "resetting...".to_string()
            } else {
                format!("{} items - [r] reset to defaults", app.menu.len())
            }),
        ]),
    ];

    let block = Block::default()
        .title(" System ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn render_sql_preview(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = app
        .setup_sql
        .lines()
        .take(SQL_PREVIEW_LINES)
        .map(|l| Line::from(Span::styled(l.to_string(), styles::muted_style())))
        .collect();
    lines.push(Line::from(Span::styled("...", styles::muted_style())));

    let block = Block::default()
        .title(" Database setup SQL - [s] export ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
