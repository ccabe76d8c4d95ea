//! Voice dictation.
//!
//! The speech-to-text engine itself lives outside this crate. Hosts wrap it
//! in a [`Dictation`] implementation and forward its callbacks to the
//! [`VoiceController`], which owns every piece of voice state.

pub mod controller;
#[cfg(test)]
pub(crate) mod fake;

pub use controller::{MicVisual, Placeholder, ToggleOutcome, VoiceController, VoiceState, VoiceTimings};

use crate::config;

/// Options handed to the dictation engine when a session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictationConfig {
    /// BCP 47 language tag
    pub lang: String,
    /// Report partial transcripts while the user speaks
    pub interim_results: bool,
    /// Keep listening after the first final result
    pub continuous: bool,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            lang: config::DICTATION_LANG.to_string(),
            interim_results: false,
            continuous: false,
        }
    }
}

/// Error type for dictation engine calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationError {
    /// A session is already running; engines refuse concurrent starts
    AlreadyStarted,
    /// Stop was requested with no running session
    NotStarted,
    /// Anything else the engine reports (permission denied, no device...)
    Backend(String),
}

impl std::fmt::Display for DictationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictationError::AlreadyStarted => write!(f, "dictation session already started"),
            DictationError::NotStarted => write!(f, "no dictation session running"),
            DictationError::Backend(reason) => write!(f, "dictation failed: {}", reason),
        }
    }
}

impl std::error::Error for DictationError {}

/// A speech-to-text engine producing one final result per session
pub trait Dictation {
    fn start(&mut self, config: &DictationConfig) -> Result<(), DictationError>;
    fn stop(&mut self) -> Result<(), DictationError>;
}

/// Stand-in for platforms without speech recognition; cannot be constructed
#[derive(Debug, Clone, Copy)]
pub enum NoDictation {}

impl Dictation for NoDictation {
    fn start(&mut self, _config: &DictationConfig) -> Result<(), DictationError> {
        match *self {}
    }

    fn stop(&mut self) -> Result<(), DictationError> {
        match *self {}
    }
}
