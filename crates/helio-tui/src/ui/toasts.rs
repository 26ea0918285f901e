// Transient status feedback shown in the status bar: new notifications,
// speech errors, storage failures. Higher levels preempt lower ones.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Info => "ℹ",
            ToastLevel::Success => "✓",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub duration: Duration,
    pub shown_at: Option<Instant>,
}

impl Toast {
    fn with_level(message: impl Into<String>, level: ToastLevel, secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration: Duration::from_secs(secs),
            shown_at: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Warning, 4)
    }

    /// Errors stay up longer; they stand in for blocking alerts
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, ToastLevel::Error, 6)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.shown_at
            .map(|shown| now.duration_since(shown) >= self.duration)
            .unwrap_or(false)
    }

    fn mark_shown(&mut self, now: Instant) {
        if self.shown_at.is_none() {
            self.shown_at = Some(now);
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    queue: VecDeque<Toast>,
    current: Option<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show now, preempt a lower-level toast, or wait in level order.
    /// A toast identical to the one on screen is dropped.
    pub fn push(&mut self, toast: Toast, now: Instant) {
        if let Some(current) = &self.current {
            if current.message == toast.message && current.level == toast.level {
                return;
            }
            if toast.level > current.level {
                let mut toast = toast;
                toast.mark_shown(now);
                self.current = Some(toast);
                return;
            }
            let pos = self
                .queue
                .iter()
                .position(|t| t.level < toast.level)
                .unwrap_or(self.queue.len());
            self.queue.insert(pos, toast);
            return;
        }

        let mut toast = toast;
        toast.mark_shown(now);
        self.current = Some(toast);
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self, now: Instant) {
        self.current = None;
        self.advance(now);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.current = None;
            self.advance(now);
        }
    }

    fn advance(&mut self, now: Instant) {
        if self.current.is_none() {
            if let Some(mut next) = self.queue.pop_front() {
                next.mark_shown(now);
                self.current = Some(next);
            }
        }
    }
}
