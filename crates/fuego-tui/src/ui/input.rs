//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use fuego_core::models::ReservationStatus;

use crate::app::{App, AppState, Tab};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => Ok(handle_quit_confirmation(app, key)),
        AppState::ConfirmingReset => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.reset_menu(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.state = AppState::Normal,
                _ => {}
            }
            Ok(false)
        }
        AppState::EditingPrice => {
            handle_price_input(app, key);
            Ok(false)
        }
        AppState::ComposingAnnouncement => {
            handle_announcement_input(app, key);
            Ok(false)
        }
        AppState::NewReservationForm => {
            handle_form_input(app, key);
            Ok(false)
        }
        AppState::ShowingMessage => {
            app.dismiss_message();
            Ok(false)
        }
        AppState::Quitting => Ok(true),
        AppState::Normal => Ok(handle_normal_input(app, key)),
    }
}

fn handle_quit_confirmation(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.state = AppState::Quitting;
            true
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state = AppState::Normal;
            false
        }
        _ => false,
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) -> bool {
    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return false;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return false;
        }
        KeyCode::Char('1') => app.set_tab(Tab::Overview),
        KeyCode::Char('2') => app.set_tab(Tab::Reservations),
        KeyCode::Char('3') => app.set_tab(Tab::Menu),
        KeyCode::Char('4') => app.set_tab(Tab::Settings),
        KeyCode::Left => app.set_tab(app.current_tab.prev()),
        KeyCode::Right => app.set_tab(app.current_tab.next()),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-10),
        KeyCode::PageDown => app.move_selection(10),
        KeyCode::Home => app.move_selection(isize::MIN / 2),
        KeyCode::End => app.move_selection(isize::MAX / 2),
        KeyCode::Char('u') => app.load_all(),
        _ => handle_tab_input(app, key),
    }
    false
}

fn handle_tab_input(app: &mut App, key: KeyEvent) {
    match (app.current_tab, key.code) {
        (Tab::Overview | Tab::Reservations, KeyCode::Char('c')) => {
            app.decide_selected(ReservationStatus::Confirmed)
        }
        (Tab::Overview | Tab::Reservations, KeyCode::Char('x')) => {
            app.decide_selected(ReservationStatus::Cancelled)
        }
        (Tab::Reservations, KeyCode::Char('f')) => app.cycle_status_filter(),
        (Tab::Reservations, KeyCode::Char('n')) => app.open_reservation_form(),
        (Tab::Menu, KeyCode::Char('e') | KeyCode::Enter) => app.start_price_edit(),
        (Tab::Menu | Tab::Settings, KeyCode::Char('r')) => {
            if !app.resetting_menu {
                app.state = AppState::ConfirmingReset;
            }
        }
        (Tab::Settings, KeyCode::Char('a')) => app.start_announcement(),
        (Tab::Settings, KeyCode::Char(' ') | KeyCode::Enter) => app.toggle_selected_announcement(),
        (Tab::Settings, KeyCode::Char('s')) => app.export_setup_sql(),
        _ => {}
    }
}

fn handle_price_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_price_edit(),
        KeyCode::Esc => app.cancel_price_edit(),
        KeyCode::Backspace => {
            if let Some(draft) = app.price_draft.as_mut() {
                draft.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(draft) = app.price_draft.as_mut() {
                draft.push(c);
            }
        }
        _ => {}
    }
}

fn handle_announcement_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_announcement(),
        KeyCode::Esc => {
            app.announcement_draft.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.announcement_draft.pop();
        }
        KeyCode::Char(c) => app.push_announcement_char(c),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_reservation_form();
            return;
        }
        KeyCode::Esc => {
            app.state = AppState::Normal;
            return;
        }
        _ => {}
    }
    let form = &mut app.reservation_form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use fuego_core::{BackOffice, Config, LocalCache};
    use tempfile::TempDir;

    use crate::form::FormField;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &TempDir) -> App {
        let cache = LocalCache::new(dir.path().to_path_buf()).expect("cache dir");
        App::with_office(Config::default(), BackOffice::new(None, cache))
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).expect("handled"));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!handle_input(&mut app, key(KeyCode::Esc)).expect("handled"));
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('q'))).expect("handled");
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).expect("handled"));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        handle_input(&mut app, key(KeyCode::Char('3'))).expect("handled");
        assert_eq!(app.current_tab, Tab::Menu);
        handle_input(&mut app, key(KeyCode::Left)).expect("handled");
        assert_eq!(app.current_tab, Tab::Reservations);
    }

    #[test]
    fn test_price_editing_keys() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.current_tab = Tab::Menu;
        handle_input(&mut app, key(KeyCode::Char('e'))).expect("handled");
        assert_eq!(app.state, AppState::EditingPrice);

        for _ in 0..10 {
            handle_input(&mut app, key(KeyCode::Backspace)).expect("handled");
        }
        for c in "7,5x".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).expect("handled");
        }
        assert_eq!(app.price_draft.as_ref().map(|d| d.text.as_str()), Some("7,5"));

        handle_input(&mut app, key(KeyCode::Esc)).expect("handled");
        assert_eq!(app.state, AppState::Normal);
        assert!(app.price_draft.is_none());
    }

    #[test]
    fn test_reset_asks_first() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.current_tab = Tab::Menu;
        handle_input(&mut app, key(KeyCode::Char('r'))).expect("handled");
        assert_eq!(app.state, AppState::ConfirmingReset);
        handle_input(&mut app, key(KeyCode::Char('n'))).expect("handled");
        assert_eq!(app.state, AppState::Normal);
        assert!(!app.resetting_menu);
    }

    #[test]
    fn test_form_navigation() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.current_tab = Tab::Reservations;
        handle_input(&mut app, key(KeyCode::Char('n'))).expect("handled");
        assert_eq!(app.state, AppState::NewReservationForm);

        handle_input(&mut app, key(KeyCode::Char('q'))).expect("handled");
        assert_eq!(app.state, AppState::NewReservationForm);
        assert_eq!(app.reservation_form.client_name, "q");

        handle_input(&mut app, key(KeyCode::Tab)).expect("handled");
        assert_eq!(app.reservation_form.focus, FormField::Phone);
        handle_input(&mut app, key(KeyCode::BackTab)).expect("handled");
        assert_eq!(app.reservation_form.focus, FormField::ClientName);

        handle_input(&mut app, key(KeyCode::Esc)).expect("handled");
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_message_dismissed_by_any_key() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = app(&dir);
        app.current_tab = Tab::Settings;
        handle_input(&mut app, key(KeyCode::Char('s'))).expect("handled");
        assert_eq!(app.state, AppState::ShowingMessage);
        handle_input(&mut app, key(KeyCode::Char('z'))).expect("handled");
        assert_eq!(app.state, AppState::Normal);
    }
}
