//! Accessibility menu: read-aloud, font scaling and high contrast.

pub mod document;
pub mod font_scale;
pub mod process_engine;
pub mod speech;

pub use document::{collect_visible_text, Element, Node};
pub use font_scale::FontScale;
pub use process_engine::ProcessSpeechEngine;
pub use speech::{ReadAloud, ReadState, SpeechEngine, SpeechError, SpeechEvent, Utterance};

use tracing::debug;

use crate::input::KeyInput;
use crate::store::KeyValueStore;

pub struct AccessibilityController<S: KeyValueStore, E: SpeechEngine> {
    menu_open: bool,
    font: FontScale<S>,
    high_contrast: bool,
    reader: ReadAloud<E>,
}

impl<S: KeyValueStore, E: SpeechEngine> AccessibilityController<S, E> {
    pub fn new(kv: S, engine: E) -> Self {
        Self {
            menu_open: false,
            font: FontScale::load(kv),
            high_contrast: false,
            reader: ReadAloud::new(engine),
        }
    }

    // ===== Menu =====

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    /// Hide the menu; any reading in progress is cancelled
    pub fn close_menu(&mut self) {
        if !self.menu_open {
            return;
        }
        self.menu_open = false;
        if self.reader.state() != ReadState::Idle {
            debug!("Menu closed, cancelling read-aloud");
        }
        self.reader.stop();
    }

    /// Keyboard observer for the menu: Escape closes it
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        if key == KeyInput::Escape && self.menu_open {
            self.close_menu();
            return true;
        }
        false
    }

    // ===== Read aloud =====

    pub fn press_read(&mut self, page: &Element) -> Result<ReadState, SpeechError> {
        self.reader.press(page)
    }

    pub fn read_state(&self) -> ReadState {
        self.reader.state()
    }

    /// Deliver pending speech engine callbacks
    pub fn tick(&mut self) {
        self.reader.pump();
    }

    // ===== Font & contrast =====

    pub fn font_scale(&self) -> f64 {
        self.font.scale()
    }

    pub fn font_percent(&self) -> u32 {
        self.font.percent()
    }

    pub fn increase_font(&mut self) -> f64 {
        self.font.increase()
    }

    pub fn decrease_font(&mut self) -> f64 {
        self.font.decrease()
    }

    pub fn high_contrast(&self) -> bool {
        self.high_contrast
    }

    pub fn toggle_contrast(&mut self) -> bool {
        self.high_contrast = !self.high_contrast;
        self.high_contrast
    }
}

#[cfg(test)]
mod tests {
    use super::speech::tests::{page, FakeEngine};
    use super::*;
    use crate::store::MemoryStore;

    fn controller() -> AccessibilityController<MemoryStore, FakeEngine> {
        AccessibilityController::new(MemoryStore::new(), FakeEngine::default())
    }

    #[test]
    fn test_menu_toggle_and_escape() {
        let mut a = controller();
        assert!(!a.handle_key(KeyInput::Escape));
        a.toggle_menu();
        assert!(a.is_menu_open());
        assert!(a.handle_key(KeyInput::Escape));
        assert!(!a.is_menu_open());
    }

    #[test]
    fn test_closing_menu_cancels_reading() {
        let mut a = controller();
        a.open_menu();
        a.press_read(&page()).unwrap();
        a.tick();
        assert_eq!(a.read_state(), ReadState::Reading);

        a.close_menu();
        assert_eq!(a.read_state(), ReadState::Idle);
        assert_eq!(a.reader.engine().cancelled, 1);
    }

    #[test]
    fn test_contrast_toggle() {
        let mut a = controller();
        assert!(!a.high_contrast());
        assert!(a.toggle_contrast());
        assert!(!a.toggle_contrast());
    }

    #[test]
    fn test_font_controls_share_store() {
        let kv = MemoryStore::new();
        let mut a = AccessibilityController::new(kv.clone(), FakeEngine::default());
        a.increase_font();
        assert_eq!(a.font_percent(), 110);

        let b = AccessibilityController::new(kv, FakeEngine::default());
        assert_eq!(b.font_scale(), 1.1);
    }
}
