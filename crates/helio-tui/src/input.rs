use crossterm::event::{KeyCode, KeyEvent};

use helio_core::accessibility::SpeechEngine;
use helio_core::input::KeyInput;
use helio_core::models::{NotificationKind, Priority};
use helio_core::store::KeyValueStore;

use crate::ui::App;

const PAGE_SCROLL: i32 = 10;

pub(crate) fn handle_key<S: KeyValueStore, E: SpeechEngine>(app: &mut App<S, E>, key: KeyEvent) {
    let code = key.code;

    // Escape goes to every widget observer, not just the focused one
    if code == KeyCode::Esc {
        if !app.observe_key(KeyInput::Escape) {
            app.dismiss_toast();
        }
        return;
    }

    // Panel keys win while the panel is on screen
    if app.panel_state().is_visible() && handle_panel_key(app, code) {
        return;
    }

    if app.access.is_menu_open() && handle_menu_key(app, code) {
        return;
    }

    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.toggle_panel(),
        KeyCode::Char('a') => app.toggle_menu(),
        KeyCode::Char('t') => app.add_notification(
            "Test notification",
            "This is a test notification created from the keyboard.",
            NotificationKind::Info,
            Priority::Medium,
        ),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_page(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_page(-1),
        KeyCode::PageDown => app.scroll_page(PAGE_SCROLL),
        KeyCode::PageUp => app.scroll_page(-PAGE_SCROLL),
        _ => {}
    }
}

/// Returns true when the key was consumed by the panel
fn handle_panel_key<S: KeyValueStore, E: SpeechEngine>(app: &mut App<S, E>, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter | KeyCode::Char('m') => app.activate_selected(),
        KeyCode::Char('M') => app.mark_all_read(),
        KeyCode::Char('x') => app.close_panel(),
        _ => return false,
    }
    true
}

/// Returns true when the key was consumed by the accessibility menu
fn handle_menu_key<S: KeyValueStore, E: SpeechEngine>(app: &mut App<S, E>, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('r') => app.read_aloud(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.increase_font(),
        KeyCode::Char('-') => app.decrease_font(),
        KeyCode::Char('c') => app.toggle_contrast(),
        _ => return false,
    }
    true
}
