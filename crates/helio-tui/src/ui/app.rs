use chrono::Utc;
use ratatui::layout::Rect;
use std::time::Instant;
use tracing::{error, info, warn};

use helio_core::accessibility::{
    AccessibilityController, Element, ProcessSpeechEngine, SpeechEngine, SpeechError,
};
use helio_core::input::{ClickTarget, KeyInput};
use helio_core::models::{NotificationKind, Priority};
use helio_core::panel::{
    BadgeView, ListView, NotificationPanelController, PanelEvent, PanelState, RowAction,
};
use helio_core::store::{KeyValueStore, StoreError};

use crate::ui::toasts::{Toast, ToastQueue};

/// Progress of the background page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Loading(String),
    Ready,
    Failed(String),
}

/// Clickable regions recorded during the last render
#[derive(Debug, Default, Clone)]
pub struct HitAreas {
    pub toggle: Option<Rect>,
    pub panel: Option<Rect>,
    pub menu_button: Option<Rect>,
    pub menu: Option<Rect>,
    pub row_actions: Vec<(Rect, RowAction)>,
}

pub struct App<S: KeyValueStore, E: SpeechEngine = ProcessSpeechEngine> {
    pub running: bool,
    pub pending_quit: bool,
    pub panel: NotificationPanelController<S>,
    pub access: AccessibilityController<S, E>,
    pub page: Element,
    pub page_status: PageStatus,
    pub page_scroll: u16,
    pub selected: usize,
    pub hit: HitAreas,
    toasts: ToastQueue,
    /// When the in-flight panel transition should be finished
    transition_due: Option<Instant>,
}

impl<S: KeyValueStore, E: SpeechEngine> App<S, E> {
    pub fn new(
        panel: NotificationPanelController<S>,
        access: AccessibilityController<S, E>,
        page_status: PageStatus,
    ) -> Self {
        let mut app = Self {
            running: true,
            pending_quit: false,
            panel,
            access,
            page: Element::new("body"),
            page_status,
            page_scroll: 0,
            selected: 0,
            hit: HitAreas::default(),
            toasts: ToastQueue::new(),
            transition_due: None,
        };
        app.process_panel_events(Instant::now());
        app
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn current_toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    pub fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast, Instant::now());
    }

    pub fn dismiss_toast(&mut self) {
        self.toasts.dismiss(Instant::now());
    }

    // ===== Page =====

    pub fn page_loaded(&mut self, result: Result<String, String>) {
        match result {
            Ok(html) => {
                self.page = Element::from_html(&html);
                self.page_status = PageStatus::Ready;
                self.page_scroll = 0;
            }
            Err(e) => {
                error!("Failed to load page: {}", e);
                self.page_status = PageStatus::Failed(e);
            }
        }
    }

    pub fn scroll_page(&mut self, delta: i32) {
        self.page_scroll = (i32::from(self.page_scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }

    // ===== Timers =====

    /// Advance timers: panel transitions, speech callbacks, toast expiry
    pub fn tick(&mut self, now: Instant) {
        if self.transition_due.is_some_and(|due| now >= due) {
            self.transition_due = None;
            self.panel.finish_transition();
        }
        self.process_panel_events(now);
        self.access.tick();
        self.toasts.tick(now);
    }

    fn process_panel_events(&mut self, now: Instant) {
        for event in self.panel.take_events() {
            match event {
                PanelEvent::StateChanged { settle_after, .. } => {
                    self.transition_due = settle_after.map(|d| now + d);
                }
                PanelEvent::ListChanged => self.clamp_selection(),
                PanelEvent::BadgeChanged(_) => {}
                PanelEvent::Toast(record) => {
                    self.toasts
                        .push(Toast::info(format!("New notification: {}", record.title)), now);
                }
            }
        }
    }

    // ===== Notification panel =====

    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn list_view(&self) -> ListView {
        self.panel.render_list(Utc::now())
    }

    pub fn badge(&self) -> BadgeView {
        self.panel.refresh_badge()
    }

    pub fn toggle_panel(&mut self) {
        self.panel.toggle_panel();
        self.process_panel_events(Instant::now());
    }

    pub fn close_panel(&mut self) {
        self.panel.close_panel();
        self.process_panel_events(Instant::now());
    }

    fn clamp_selection(&mut self) {
        let len = self.panel.store().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.panel.store().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Run the selected row's action, if it has one
    pub fn activate_selected(&mut self) {
        let action = self
            .list_view()
            .rows()
            .get(self.selected)
            .and_then(|row| row.action);
        if let Some(action) = action {
            self.run_action(action);
        }
    }

    pub fn run_action(&mut self, action: RowAction) {
        let result = self.panel.handle_action(action);
        self.after_mutation(result);
    }

    pub fn mark_all_read(&mut self) {
        let result = self.panel.mark_all_read();
        if result.is_ok() {
            self.notify(Toast::success("All notifications marked as read"));
        }
        self.after_mutation(result);
    }

    pub fn add_notification(
        &mut self,
        title: &str,
        message: &str,
        kind: NotificationKind,
        priority: Priority,
    ) {
        let result = self.panel.add(title, message, kind, priority).map(|_| ());
        self.after_mutation(result);
    }

    fn after_mutation(&mut self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            warn!("Notification update failed: {}", e);
            self.notify(Toast::error(format!("Could not save notifications: {}", e)));
        }
        self.process_panel_events(Instant::now());
    }

    // ===== Accessibility menu =====

    pub fn toggle_menu(&mut self) {
        self.access.toggle_menu();
    }

    pub fn read_aloud(&mut self) {
        match self.access.press_read(&self.page) {
            Ok(state) => info!(?state, "Read button pressed"),
            Err(SpeechError::NothingToRead) if matches!(self.page_status, PageStatus::Loading(_)) => {
                self.notify(Toast::warning("Page is still loading"));
            }
            Err(e) => self.notify(Toast::error(e.to_string())),
        }
    }

    pub fn increase_font(&mut self) {
        self.access.increase_font();
    }

    pub fn decrease_font(&mut self) {
        self.access.decrease_font();
    }

    pub fn toggle_contrast(&mut self) {
        self.access.toggle_contrast();
    }

    // ===== Shared observers =====

    /// Forward a key to each widget's own observer
    pub fn observe_key(&mut self, key: KeyInput) -> bool {
        let menu = self.access.handle_key(key);
        let panel = self.panel.handle_key(key);
        self.process_panel_events(Instant::now());
        menu || panel
    }

    /// Route a left click through the recorded hit areas
    pub fn click(&mut self, column: u16, row: u16) {
        use crate::ui::layout::contains;

        let hit = self.hit.clone();
        let in_rect = |r: Option<Rect>| r.is_some_and(|r| contains(r, column, row));

        // Panel observer
        let target = if in_rect(hit.toggle) {
            ClickTarget::ToggleButton
        } else if in_rect(hit.panel) {
            ClickTarget::Panel
        } else {
            ClickTarget::Outside
        };
        match target {
            ClickTarget::ToggleButton => self.toggle_panel(),
            ClickTarget::Panel => {
                let action = hit
                    .row_actions
                    .iter()
                    .find(|(r, _)| contains(*r, column, row))
                    .map(|(_, a)| *a);
                if let Some(action) = action {
                    self.run_action(action);
                }
            }
            ClickTarget::Outside => {
                self.panel.close_on_outside_click(target);
                self.process_panel_events(Instant::now());
            }
        }

        // Accessibility observer
        if in_rect(hit.menu_button) {
            self.toggle_menu();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_core::accessibility::{SpeechEvent, Utterance};
    use helio_core::store::{MemoryStore, NotificationStore};
    use std::time::Duration;

    /// Engine that is never available
    struct NoSpeech;

    impl SpeechEngine for NoSpeech {
        fn is_supported(&self) -> bool {
            false
        }
        fn is_speaking(&self) -> bool {
            false
        }
        fn is_paused(&self) -> bool {
            false
        }
        fn speak(&mut self, _utterance: Utterance) -> Result<(), SpeechError> {
            Err(SpeechError::Unsupported)
        }
        fn pause(&mut self) {}
        fn resume(&mut self) {}
        fn cancel(&mut self) {}
        fn poll(&mut self) -> Option<SpeechEvent> {
            None
        }
    }

    fn app() -> App<MemoryStore, NoSpeech> {
        let kv = MemoryStore::new();
        let panel = NotificationPanelController::new(NotificationStore::open(kv.clone()));
        let access = AccessibilityController::new(kv, NoSpeech);
        App::new(panel, access, PageStatus::Ready)
    }

    fn settle(app: &mut App<MemoryStore, NoSpeech>) {
        app.tick(Instant::now() + Duration::from_secs(1));
    }

    #[test]
    fn test_panel_settles_on_tick() {
        let mut app = app();
        app.toggle_panel();
        assert_eq!(app.panel_state(), PanelState::Opening);
        app.tick(Instant::now());
        assert_eq!(app.panel_state(), PanelState::Opening);
        settle(&mut app);
        assert_eq!(app.panel_state(), PanelState::Open);

        app.close_panel();
        settle(&mut app);
        assert_eq!(app.panel_state(), PanelState::Closed);
    }

    #[test]
    fn test_activate_selected_marks_read() {
        let mut app = app();
        assert_eq!(app.badge(), BadgeView::Shown("2".to_string()));
        app.selected = 0;
        app.activate_selected();
        assert_eq!(app.badge(), BadgeView::Shown("1".to_string()));

        // Row 3 is already read; nothing happens
        app.selected = 2;
        app.activate_selected();
        assert_eq!(app.badge(), BadgeView::Shown("1".to_string()));

        app.mark_all_read();
        assert_eq!(app.badge(), BadgeView::Hidden);
    }

    #[test]
    fn test_add_while_closed_raises_toast() {
        let mut app = app();
        app.add_notification("Lab", "Ready", NotificationKind::Result, Priority::Low);
        assert_eq!(
            app.current_toast().map(|t| t.message.as_str()),
            Some("New notification: Lab")
        );
        assert_eq!(app.list_view().rows()[0].title, "Lab");
    }

    #[test]
    fn test_unsupported_speech_surfaces_error() {
        let mut app = app();
        app.page = Element::new("body").text("something");
        app.read_aloud();
        let toast = app.current_toast().unwrap();
        assert!(toast.message.contains("not available"));
    }

    #[test]
    fn test_click_routing() {
        let mut app = app();
        app.hit.toggle = Some(Rect::new(70, 0, 6, 1));
        app.click(71, 0);
        assert_eq!(app.panel_state(), PanelState::Opening);
        settle(&mut app);

        app.hit.panel = Some(Rect::new(30, 1, 46, 20));
        app.click(40, 5);
        assert_eq!(app.panel_state(), PanelState::Open);

        app.click(2, 2);
        assert_eq!(app.panel_state(), PanelState::Closing);
    }

    #[test]
    fn test_escape_reaches_both_observers() {
        let mut app = app();
        app.toggle_menu();
        app.toggle_panel();
        settle(&mut app);

        assert!(app.observe_key(KeyInput::Escape));
        assert!(!app.access.is_menu_open());
        assert_eq!(app.panel_state(), PanelState::Closing);
    }

    #[test]
    fn test_selection_clamped() {
        let mut app = app();
        for _ in 0..10 {
            app.select_next();
        }
        assert_eq!(app.selected, 2);
        app.select_prev();
        assert_eq!(app.selected, 1);
    }
}
