use super::{Dictation, DictationConfig, DictationError};

/// Scripted dictation engine that counts calls
#[derive(Debug, Default)]
pub(crate) struct FakeDictation {
    pub starts: usize,
    pub stops: usize,
    pub running: bool,
    pub fail_start: bool,
    pub last_lang: Option<String>,
}

impl FakeDictation {
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }
}

impl Dictation for FakeDictation {
    fn start(&mut self, config: &DictationConfig) -> Result<(), DictationError> {
        if self.fail_start {
            return Err(DictationError::Backend("microphone busy".into()));
        }
        if self.running {
            return Err(DictationError::AlreadyStarted);
        }
        self.starts += 1;
        self.running = true;
        self.last_lang = Some(config.lang.clone());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DictationError> {
        self.stops += 1;
        self.running = false;
        Ok(())
    }
}
