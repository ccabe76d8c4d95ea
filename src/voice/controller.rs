use super::{Dictation, DictationConfig};
use crate::config;
use std::time::{Duration, Instant};

/// Where the voice session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
    /// An error message is showing until `until`
    ErrorCooldown { until: Instant },
}

/// Placeholder text the input should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Default,
    Listening,
    VoiceError,
    StartFailed,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Placeholder::Default => config::DEFAULT_PLACEHOLDER,
            Placeholder::Listening => config::LISTENING_PLACEHOLDER,
            Placeholder::VoiceError => config::VOICE_ERROR_PLACEHOLDER,
            Placeholder::StartFailed => config::VOICE_START_FAILED_PLACEHOLDER,
        }
    }
}

/// How the mic button should look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicVisual {
    Normal,
    Listening,
    Error,
}

/// Result of pressing the mic button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A session started; the dropdown should be hidden
    Started,
    /// A previous session was still winding down; it was stopped and a new
    /// start is queued for the next `poll` past the restart delay
    RestartScheduled,
    /// The user cancelled a listening session
    Stopped,
    /// The engine refused to start
    StartFailed,
    /// No dictation engine exists. `first_notice` is true only once, so the
    /// host shows its "not supported" message a single time.
    Unsupported { first_notice: bool },
}

/// Delays used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceTimings {
    pub error_reset: Duration,
    pub restart_delay: Duration,
}

impl Default for VoiceTimings {
    fn default() -> Self {
        Self {
            error_reset: Duration::from_millis(config::VOICE_ERROR_RESET_MS),
            restart_delay: Duration::from_millis(config::VOICE_RESTART_DELAY_MS),
        }
    }
}

/// State machine around a dictation engine.
///
/// Typing always wins over dictation: any input change calls [`cancel`].
/// Recognized text fills the input for review and is never submitted
/// automatically.
///
/// [`cancel`]: VoiceController::cancel
pub struct VoiceController<D> {
    dictation: Option<D>,
    config: DictationConfig,
    timings: VoiceTimings,
    state: VoiceState,
    placeholder: Placeholder,
    /// The current session is running and has not been stopped
    session_running: bool,
    /// Stopped sessions whose `end` has not arrived yet. Their results,
    /// errors and ends are dropped.
    stale_ends: usize,
    restart_at: Option<Instant>,
    unsupported_notified: bool,
}

impl<D> std::fmt::Debug for VoiceController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceController")
            .field("supported", &self.dictation.is_some())
            .field("state", &self.state)
            .field("placeholder", &self.placeholder)
            .field("session_running", &self.session_running)
            .field("stale_ends", &self.stale_ends)
            .finish_non_exhaustive()
    }
}

impl<D: Dictation> VoiceController<D> {
    /// `dictation` is `None` when the platform has no speech recognition
    pub fn new(dictation: Option<D>, config: DictationConfig, timings: VoiceTimings) -> Self {
        if dictation.is_none() {
            log::info!("Voice dictation unavailable; mic disabled");
        }

        Self {
            dictation,
            config,
            timings,
            state: VoiceState::Idle,
            placeholder: Placeholder::Default,
            session_running: false,
            stale_ends: 0,
            restart_at: None,
            unsupported_notified: false,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.dictation.is_some()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == VoiceState::Listening
    }

    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    pub fn mic_visual(&self) -> MicVisual {
        match self.state {
            VoiceState::Idle => MicVisual::Normal,
            VoiceState::Listening => MicVisual::Listening,
            VoiceState::ErrorCooldown { .. } => MicVisual::Error,
        }
    }

    pub fn config(&self) -> &DictationConfig {
        &self.config
    }

    pub fn dictation(&self) -> Option<&D> {
        self.dictation.as_ref()
    }

    /// Mic button pressed
    pub fn toggle(&mut self, now: Instant) -> ToggleOutcome {
        if self.dictation.is_none() {
            let first_notice = !self.unsupported_notified;
            self.unsupported_notified = true;
            if first_notice {
                log::warn!("{}", config::VOICE_UNSUPPORTED_NOTICE);
            }
            return ToggleOutcome::Unsupported { first_notice };
        }

        if self.state == VoiceState::Listening {
            self.stop_session();
            self.restart_at = None;
            self.state = VoiceState::Idle;
            self.placeholder = Placeholder::Default;
            log::debug!("Voice session cancelled by user");
            return ToggleOutcome::Stopped;
        }

        self.state = VoiceState::Listening;
        self.placeholder = Placeholder::Listening;

        if self.session_running || self.stale_ends > 0 {
            // Engines reject a second start until the first one ends
            self.stop_session();
            self.restart_at = Some(now + self.timings.restart_delay);
            log::debug!("Voice session still running; restart scheduled");
            return ToggleOutcome::RestartScheduled;
        }

        self.start_session(now)
    }

    /// Engine reported that audio capture began
    pub fn on_start(&mut self) {
        self.session_running = true;
        log::debug!("Voice session started ({})", self.config.lang);
    }

    /// Engine produced a final transcript. Returns the text to place in the
    /// input, or `None` when the session was already cancelled.
    pub fn on_result(&mut self, transcript: &str) -> Option<String> {
        if self.is_stale_callback() {
            log::debug!("Ignoring voice result from a stopped session");
            return None;
        }
        if self.state != VoiceState::Listening {
            log::debug!("Ignoring late voice result");
            return None;
        }

        self.state = VoiceState::Idle;
        self.placeholder = Placeholder::Default;

        let transcript = transcript.trim();
        if transcript.is_empty() {
            return None;
        }

        log::info!("Voice result: '{}'", transcript);
        Some(transcript.to_string())
    }

    /// Engine reported an error. Returns `true` when the error was applied
    /// (the host should clear its suggestions).
    pub fn on_error(&mut self, code: &str, now: Instant) -> bool {
        if self.is_stale_callback() {
            log::debug!("Ignoring voice error '{}' from a stopped session", code);
            return false;
        }
        if self.state != VoiceState::Listening {
            log::debug!("Ignoring voice error '{}' outside a session", code);
            return false;
        }

        log::error!("Voice error: {}", code);
        self.restart_at = None;
        self.state = VoiceState::ErrorCooldown {
            until: now + self.timings.error_reset,
        };
        self.placeholder = Placeholder::VoiceError;
        true
    }

    /// Engine session finished, with or without a result
    pub fn on_end(&mut self) {
        if self.stale_ends > 0 {
            self.stale_ends -= 1;
            log::debug!("Stopped voice session ended");
            return;
        }

        self.session_running = false;

        if self.state == VoiceState::Listening && self.restart_at.is_none() {
            self.state = VoiceState::Idle;
            self.placeholder = Placeholder::Default;
        }
    }

    /// Force the controller back to idle (typing, clear button, Escape).
    /// Returns `true` if a session was listening.
    pub fn cancel(&mut self) -> bool {
        let was_listening = self.state == VoiceState::Listening;

        self.stop_session();
        self.restart_at = None;
        self.state = VoiceState::Idle;
        self.placeholder = Placeholder::Default;

        was_listening
    }

    /// Run deferred work that is due. `input_is_empty` decides whether an
    /// expired error message falls back to the default placeholder.
    /// Returns the outcome of a deferred restart if one ran.
    pub fn poll(&mut self, now: Instant, input_is_empty: bool) -> Option<ToggleOutcome> {
        let mut outcome = None;

        if let Some(at) = self.restart_at {
            if now >= at {
                self.restart_at = None;
                if self.state == VoiceState::Listening {
                    outcome = Some(self.start_session(now));
                }
            }
        }

        if let VoiceState::ErrorCooldown { until } = self.state {
            if now >= until {
                self.state = VoiceState::Idle;
                if input_is_empty {
                    self.placeholder = Placeholder::Default;
                }
            }
        }

        outcome
    }

    /// Earliest pending deadline, for hosts that schedule a wakeup
    pub fn next_deadline(&self) -> Option<Instant> {
        let cooldown = match self.state {
            VoiceState::ErrorCooldown { until } => Some(until),
            _ => None,
        };
        match (self.restart_at, cooldown) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn start_session(&mut self, now: Instant) -> ToggleOutcome {
        let Some(dictation) = self.dictation.as_mut() else {
            return ToggleOutcome::Unsupported { first_notice: false };
        };

        match dictation.start(&self.config) {
            Ok(()) => {
                self.session_running = true;
                ToggleOutcome::Started
            }
            Err(e) => {
                log::error!("Voice start failed: {}", e);
                self.session_running = false;
                self.state = VoiceState::ErrorCooldown {
                    until: now + self.timings.error_reset,
                };
                self.placeholder = Placeholder::StartFailed;
                ToggleOutcome::StartFailed
            }
        }
    }

    /// Results and errors arriving before a scheduled restart has run
    /// belong to the session that was stopped to make room for it.
    fn is_stale_callback(&self) -> bool {
        self.restart_at.is_some()
    }

    /// Stop the current session. Unless the engine reports it was not
    /// running, its `end` is still expected and counted as stale.
    fn stop_session(&mut self) {
        if !self.session_running {
            return;
        }
        self.session_running = false;

        if let Some(dictation) = self.dictation.as_mut() {
            match dictation.stop() {
                Ok(()) => self.stale_ends += 1,
                Err(e) => log::warn!("Voice stop failed: {}", e),
            }
        }
    }
}
