use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use fuego_core::utils::format_price;

use crate::app::{App, AppState, Tab};
use crate::form::FormField;

use super::styles;
use super::tabs::{menu, overview, reservations, settings};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_confirm_overlay(frame, "Are you sure you want to quit?", "quit"),
        AppState::ConfirmingReset => render_confirm_overlay(
            frame,
            "Replace the menu with the default items?",
            "reset",
        ),
        AppState::EditingPrice => render_price_overlay(frame, app),
        AppState::ComposingAnnouncement => render_announcement_overlay(frame, app),
        AppState::NewReservationForm => render_reservation_form(frame, app),
        AppState::ShowingMessage => render_message_overlay(frame, app),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  FUEGO.OS";
    let subtitle = format!("  Manager Dashboard | {}", app.config.unit_label());
    let connection = if app.db_connected {
        "● System online"
    } else if app.has_remote() {
        "● Database unreachable"
    } else {
        "● Local mode"
    };
    let help_hint = "  [?] Help";
    let used = title.chars().count() + subtitle.chars().count() + connection.chars().count() + help_hint.len();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(subtitle, styles::muted_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used + 2))),
        Span::styled(connection, styles::connection_style(app.db_connected)),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let pending = app.stats().pending;
    let reservations_label = if pending > 0 {
        format!("[2] Reservations ({})", pending)
    } else {
        "[2] Reservations".to_string()
    };
    let tabs = [
        ("[1] Overview".to_string(), Tab::Overview),
        (reservations_label, Tab::Reservations),
        ("[3] Menu".to_string(), Tab::Menu),
        ("[4] Settings".to_string(), Tab::Settings),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, tab)) in tabs.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if app.current_tab == tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    if app.current_tab == Tab::Reservations {
        let filter = format!("[f]ilter: {}", app.status_filter.title());
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let padding = (area.width as usize).saturating_sub(used + filter.len() + 2);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(filter, styles::highlight_style()));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Overview => overview::render(frame, app, area),
        Tab::Reservations => reservations::render(frame, app, area),
        Tab::Menu => menu::render(frame, app, area),
        Tab::Settings => settings::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.current_tab {
        Tab::Overview => "[c]onfirm | [x] cancel | [u]pdate | [q]uit",
        Tab::Reservations => "[n]ew | [c]onfirm | [x] cancel | [f]ilter | [q]uit",
        Tab::Menu => "[e]dit price | [r]eset | [q]uit",
        Tab::Settings => "[a]nnounce | [space] toggle | [s]ql export | [r]eset menu | [q]uit",
    };

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        format!(" Updated {} ", app.cache_ages.last_updated())
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc.to_string(), styles::help_desc_style()),
    ])
}

fn logo() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("      ╔═╗╦ ╦╔═╗╔═╗╔═╗", styles::title_style())),
        Line::from(Span::styled("      ╠╣ ║ ║║╣ ║ ╦║ ║  .OS", styles::title_style())),
        Line::from(Span::styled("      ╚  ╚═╝╚═╝╚═╝╚═╝", styles::title_style())),
    ]
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 27, frame.area());
    frame.render_widget(Clear, area);

    let mut help_text = logo();
    help_text.push(Line::from(Span::styled(
        format!("      version {}", env!("CARGO_PKG_VERSION")),
        styles::muted_style(),
    )));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Navigation", styles::highlight_style())));
    help_text.push(help_line("1-4", "Switch tabs"));
    help_text.push(help_line("←/→", "Prev/next tab"));
    help_text.push(help_line("↑/↓ j/k", "Navigate list"));
    help_text.push(help_line("Esc", "Close dialog"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Reservations", styles::highlight_style())));
    help_text.push(help_line("c / x", "Confirm / cancel pending request"));
    help_text.push(help_line("f", "Cycle status filter"));
    help_text.push(help_line("n", "New reservation"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Menu & Settings", styles::highlight_style())));
    help_text.push(help_line("e / Enter", "Edit price"));
    help_text.push(help_line("a", "Post announcement"));
    help_text.push(help_line("Space", "Show / hide announcement"));
    help_text.push(help_line("s", "Export database setup SQL"));
    help_text.push(help_line("r", "Reset menu to defaults"));
    help_text.push(help_line("u", "Reload everything"));
    help_text.push(help_line("q", "Quit"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("       Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    frame.render_widget(Paragraph::new(help_text).block(dialog_block(None)), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn dialog_block(title: Option<&str>) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());
    match title {
        Some(title) => block
            .title(format!(" {} ", title))
            .title_style(styles::title_style()),
        None => block,
    }
}

fn render_confirm_overlay(frame: &mut Frame, question: &str, action: &str) {
    let area = centered_rect_fixed(50, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("   {}", question), styles::highlight_style())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[Y]", styles::help_key_style()),
        Span::styled(format!(" to {}, ", action), styles::muted_style()),
        Span::styled("[N]", styles::help_key_style()),
        Span::styled(" to cancel", styles::muted_style()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(dialog_block(None)), area);
}

fn render_price_overlay(frame: &mut Frame, app: &App) {
    let Some(draft) = app.price_draft.as_ref() else {
        return;
    };
    let area = centered_rect_fixed(46, 8, frame.area());
    frame.render_widget(Clear, area);

    let item = app.menu.iter().find(|m| m.id == draft.item_id);
    let name = item.map(|m| m.name.as_str()).unwrap_or("?");
    let current = item.map(|m| format_price(m.price)).unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(format!(" {}", name), styles::list_item_style())),
        Line::from(Span::styled(format!(" Current: {}", current), styles::muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" New price: R$ [", styles::muted_style()),
            Span::styled(format!("{:<10}▌", draft.text), styles::input_style()),
            Span::styled("]", styles::muted_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" [Enter] save  [Esc] cancel", styles::muted_style())),
    ];

    frame.render_widget(Paragraph::new(lines).block(dialog_block(Some("Edit price"))), area);
}

fn render_announcement_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(" Message shown on the public site:", styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(format!(" {}▌", app.announcement_draft), styles::input_style())),
        Line::from(""),
        Line::from(Span::styled(" [Enter] post  [Esc] cancel", styles::muted_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(dialog_block(Some("New announcement")));
    frame.render_widget(paragraph, area);
}

fn render_reservation_form(frame: &mut Frame, app: &App) {
    let form = &app.reservation_form;
    let height = if form.error.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(52, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        let focused = form.focus == field;
        let style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let cursor = if focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>7}: [", field.label()), styles::muted_style()),
            Span::styled(format!("{:<28}{}", form.value(field), cursor), style),
            Span::styled("]", styles::muted_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [Tab] next field  [Enter] save  [Esc] cancel",
        styles::muted_style(),
    )));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", error), styles::error_style())));
    }

    frame.render_widget(Paragraph::new(lines).block(dialog_block(Some("New reservation"))), area);
}

fn render_message_overlay(frame: &mut Frame, app: &App) {
    let message = app.dialog_message.as_deref().unwrap_or_default();
    let area = centered_rect_fixed(64, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(format!(" {}", l), styles::list_item_style())))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Press any key to continue", styles::muted_style())));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(dialog_block(None));
    frame.render_widget(paragraph, area);
}
