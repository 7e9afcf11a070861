use ratatui::style::{Color, Modifier, Style};

use fuego_core::models::ReservationStatus;

// Color palette
pub const PRIMARY: Color = Color::Rgb(234, 88, 12);
pub const SECONDARY: Color = Color::Rgb(52, 211, 153);
pub const ACCENT: Color = Color::Rgb(251, 191, 36);
pub const ERROR: Color = Color::Rgb(248, 113, 113);
pub const MUTED: Color = Color::Rgb(120, 113, 108);
pub const HIGHLIGHT: Color = Color::Rgb(41, 37, 36);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn input_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(28, 25, 23)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn status_style(status: ReservationStatus) -> Style {
    match status {
        ReservationStatus::Pending => highlight_style(),
        ReservationStatus::Confirmed => success_style(),
        ReservationStatus::Cancelled => error_style(),
    }
}

pub fn connection_style(online: bool) -> Style {
    if online {
        success_style()
    } else {
        error_style()
    }
}
