use tracing::{debug, error};

use super::document::{collect_visible_text, Element};
use crate::constants::{READ_ALOUD_MAX_CHARS, SPEECH_LANG};

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech synthesis is not available on this system")]
    Unsupported,

    #[error("There is no visible text to read on this page")]
    NothingToRead,

    #[error("Speech engine failed: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: SPEECH_LANG.to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// Engine lifecycle callbacks, delivered through [`SpeechEngine::poll`]
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Failed(String),
}

/// An external speech synthesizer
pub trait SpeechEngine {
    fn is_supported(&self) -> bool;
    fn is_speaking(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
    /// Next pending lifecycle event, if any
    fn poll(&mut self) -> Option<SpeechEvent>;
}

/// Read button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Idle,
    Reading,
    Paused,
}

impl ReadState {
    pub fn button_label(&self) -> &'static str {
        match self {
            ReadState::Idle => "Read Page",
            ReadState::Reading => "Pause Reading",
            ReadState::Paused => "Resume Reading",
        }
    }
}

/// Read-aloud controller: one button cycling start → pause → resume
pub struct ReadAloud<E: SpeechEngine> {
    engine: E,
    state: ReadState,
}

impl<E: SpeechEngine> ReadAloud<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: ReadState::Idle,
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Handle a press of the read button
    pub fn press(&mut self, page: &Element) -> Result<ReadState, SpeechError> {
        if !self.engine.is_supported() {
            return Err(SpeechError::Unsupported);
        }

        if self.engine.is_speaking() && !self.engine.is_paused() {
            self.engine.pause();
            self.state = ReadState::Paused;
            return Ok(self.state);
        }

        if self.engine.is_paused() {
            self.engine.resume();
            self.state = ReadState::Reading;
            return Ok(self.state);
        }

        let text = collect_visible_text(page, READ_ALOUD_MAX_CHARS);
        if text.is_empty() {
            return Err(SpeechError::NothingToRead);
        }

        debug!(chars = text.chars().count(), "Starting read-aloud");
        self.engine.speak(Utterance::new(text))?;
        Ok(self.state)
    }

    /// Drain engine callbacks into the button state
    pub fn pump(&mut self) {
        while let Some(event) = self.engine.poll() {
            match event {
                SpeechEvent::Started => self.state = ReadState::Reading,
                SpeechEvent::Ended => self.state = ReadState::Idle,
                SpeechEvent::Failed(reason) => {
                    error!("Speech synthesis error: {}", reason);
                    self.state = ReadState::Idle;
                }
            }
        }
    }

    /// Stop any playback and return to idle
    pub fn stop(&mut self) {
        if self.engine.is_speaking() {
            self.engine.cancel();
        }
        self.state = ReadState::Idle;
    }
}
