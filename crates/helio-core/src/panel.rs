//! Notification panel controller.
//!
//! Turns the store into list rows and a badge, and runs the panel's
//! open/close transition. The controller never sleeps: each transition is
//! announced with the delay it needs and the host calls
//! [`NotificationPanelController::finish_transition`] once that delay passes.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

use crate::constants::{BADGE_MAX, PANEL_CLOSE_DELAY, PANEL_OPEN_DELAY};
use crate::input::{ClickTarget, KeyInput};
use crate::models::{NotificationId, NotificationKind, NotificationRecord, Priority, PriorityTone};
use crate::store::{KeyValueStore, NotificationStore, StoreError};
use crate::time_format::format_relative_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    /// Visible, not yet expanded
    Opening,
    Open,
    /// Collapsed, not yet hidden
    Closing,
}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, PanelState::Closed)
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, PanelState::Open)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, PanelState::Opening | PanelState::Closing)
    }
}

/// Row-level action. Rows carry their record id so the host can route a
/// click straight back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    MarkRead(NotificationId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRow {
    pub id: NotificationId,
    pub icon: &'static str,
    pub title: String,
    /// Unread rows render their title bold
    pub bold: bool,
    pub time: String,
    pub message: String,
    pub priority_label: &'static str,
    pub priority_tone: PriorityTone,
    /// Only unread rows offer "mark as read"
    pub action: Option<RowAction>,
}

impl NotificationRow {
    fn from_record(record: &NotificationRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            icon: record.kind.icon(),
            title: record.title.clone(),
            bold: record.is_unread(),
            time: format_relative_time(record.created_at, now),
            message: record.message.clone(),
            priority_label: record.priority.label(),
            priority_tone: record.priority.tone(),
            action: record.is_unread().then_some(RowAction::MarkRead(record.id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// Placeholder shown when there are no notifications
    Empty,
    Rows(Vec<NotificationRow>),
}

impl ListView {
    pub fn rows(&self) -> &[NotificationRow] {
        match self {
            ListView::Empty => &[],
            ListView::Rows(rows) => rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeView {
    Hidden,
    Shown(String),
}

/// Badge text for an unread count
pub fn badge_for(unread: usize) -> BadgeView {
    match unread {
        0 => BadgeView::Hidden,
        n if n > BADGE_MAX => BadgeView::Shown(format!("{}+", BADGE_MAX)),
        n => BadgeView::Shown(n.to_string()),
    }
}

/// State-change notifications for the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    StateChanged {
        state: PanelState,
        visible: bool,
        expanded: bool,
        /// Call `finish_transition` after this long
        settle_after: Option<Duration>,
    },
    /// The collection changed; rebuild the list
    ListChanged,
    BadgeChanged(BadgeView),
    /// A notification arrived while the panel was not open
    Toast(NotificationRecord),
}

pub struct NotificationPanelController<S: KeyValueStore> {
    store: NotificationStore<S>,
    state: PanelState,
    events: Vec<PanelEvent>,
}

impl<S: KeyValueStore> NotificationPanelController<S> {
    pub fn new(store: NotificationStore<S>) -> Self {
        let mut controller = Self {
            store,
            state: PanelState::Closed,
            events: Vec::new(),
        };
        controller.notify_collection_changed();
        controller
    }

    pub fn store(&self) -> &NotificationStore<S> {
        &self.store
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== Panel transitions =====

    /// Open when closed, close when open. Ignored mid-transition.
    pub fn toggle_panel(&mut self) {
        match self.state {
            PanelState::Closed => self.transition(PanelState::Opening),
            PanelState::Open => self.transition(PanelState::Closing),
            PanelState::Opening | PanelState::Closing => {
                debug!(state = ?self.state, "Toggle ignored while animating");
            }
        }
    }

    /// Close from any visible state. Closing mid-open reverses the animation.
    pub fn close_panel(&mut self) {
        if matches!(self.state, PanelState::Open | PanelState::Opening) {
            self.transition(PanelState::Closing);
        }
    }

    /// Complete the pending transition once its delay has elapsed
    pub fn finish_transition(&mut self) {
        match self.state {
            PanelState::Opening => self.transition(PanelState::Open),
            PanelState::Closing => self.transition(PanelState::Closed),
            PanelState::Open | PanelState::Closed => {}
        }
    }

    fn transition(&mut self, next: PanelState) {
        debug!(from = ?self.state, to = ?next, "Panel transition");
        self.state = next;
        let settle_after = match next {
            PanelState::Opening => Some(PANEL_OPEN_DELAY),
            PanelState::Closing => Some(PANEL_CLOSE_DELAY),
            PanelState::Open | PanelState::Closed => None,
        };
        self.events.push(PanelEvent::StateChanged {
            state: next,
            visible: next.is_visible(),
            expanded: next.is_expanded(),
            settle_after,
        });
    }

    /// Close when a click lands outside both the panel and its toggle
    pub fn close_on_outside_click(&mut self, target: ClickTarget) -> bool {
        if target == ClickTarget::Outside
            && matches!(self.state, PanelState::Open | PanelState::Opening)
        {
            self.close_panel();
            return true;
        }
        false
    }

    /// Keyboard observer for the panel: Escape closes it
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        if key == KeyInput::Escape && self.state.is_visible() {
            self.close_panel();
            return true;
        }
        false
    }

    // ===== Views =====

    /// Rebuild the list from the store, in store order
    pub fn render_list(&self, now: DateTime<Utc>) -> ListView {
        let records = self.store.records();
        if records.is_empty() {
            return ListView::Empty;
        }
        ListView::Rows(
            records
                .iter()
                .map(|r| NotificationRow::from_record(r, now))
                .collect(),
        )
    }

    pub fn refresh_badge(&self) -> BadgeView {
        badge_for(self.store.unread_count())
    }

    // ===== Actions =====

    pub fn handle_action(&mut self, action: RowAction) -> Result<(), StoreError> {
        match action {
            RowAction::MarkRead(id) => self.mark_read(id),
        }
    }

    pub fn mark_read(&mut self, id: NotificationId) -> Result<(), StoreError> {
        self.store.mark_read(id)?;
        self.notify_collection_changed();
        Ok(())
    }

    pub fn mark_all_read(&mut self) -> Result<(), StoreError> {
        self.store.mark_all_read()?;
        self.notify_collection_changed();
        Ok(())
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        priority: Priority,
    ) -> Result<NotificationRecord, StoreError> {
        let record = self.store.add_with(title, message, kind, priority)?;
        self.notify_collection_changed();
        if self.state != PanelState::Open {
            self.events.push(PanelEvent::Toast(record.clone()));
        }
        Ok(record)
    }

    fn notify_collection_changed(&mut self) {
        self.events.push(PanelEvent::ListChanged);
        self.events.push(PanelEvent::BadgeChanged(self.refresh_badge()));
    }
}
