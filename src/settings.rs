//! User settings loaded from `settings.toml` in the data directory.

use crate::config;
use crate::voice::{DictationConfig, VoiceTimings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables a user may override. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language tag for voice dictation
    pub dictation_lang: String,
    /// How long a voice error stays in the placeholder
    pub voice_error_reset_ms: u64,
    /// Delay before restarting a session that was still running
    pub voice_restart_delay_ms: u64,
    /// Grace period before blur hides the history dropdown
    pub blur_hide_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictation_lang: config::DICTATION_LANG.to_string(),
            voice_error_reset_ms: config::VOICE_ERROR_RESET_MS,
            voice_restart_delay_ms: config::VOICE_RESTART_DELAY_MS,
            blur_hide_delay_ms: config::BLUR_HIDE_DELAY_MS,
        }
    }
}

impl Settings {
    /// Load settings from a data directory. A missing file yields defaults;
    /// an unreadable or invalid one is logged and also yields defaults.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(config::SETTINGS_FILE);

        if !path.exists() {
            return Self::default();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Failed to read {:?}: {}", path, e);
                return Self::default();
            }
        };

        match Self::from_toml(&contents) {
            Ok(settings) => {
                log::info!("Settings loaded from {:?}", path);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {:?}, using defaults: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let settings: Settings = toml::from_str(contents)?;
        Ok(settings.sanitized())
    }

    pub fn dictation_config(&self) -> DictationConfig {
        DictationConfig {
            lang: self.dictation_lang.clone(),
            ..DictationConfig::default()
        }
    }

    pub fn voice_timings(&self) -> VoiceTimings {
        VoiceTimings {
            error_reset: Duration::from_millis(self.voice_error_reset_ms),
            restart_delay: Duration::from_millis(self.voice_restart_delay_ms),
        }
    }

    pub fn blur_hide_delay(&self) -> Duration {
        Duration::from_millis(self.blur_hide_delay_ms)
    }

    fn sanitized(mut self) -> Self {
        if self.dictation_lang.trim().is_empty() {
            self.dictation_lang = config::DICTATION_LANG.to_string();
        }
        self
    }
}

/// Per-user data directory (XDG data dir on Linux)
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "myyc", config::APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            // No home directory: keep data next to the working directory
            PathBuf::from(format!(".{}", config::APP_NAME))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(config::SETTINGS_FILE),
            "dictation_lang = \"de-DE\"\nvoice_error_reset_ms = 5000\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path());
        assert_eq!(settings.dictation_lang, "de-DE");
        assert_eq!(settings.voice_timings().error_reset, Duration::from_secs(5));
        assert_eq!(settings.blur_hide_delay_ms, config::BLUR_HIDE_DELAY_MS);
        assert_eq!(settings.dictation_config().lang, "de-DE");
        assert!(!settings.dictation_config().continuous);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(config::SETTINGS_FILE), "voice_error_reset_ms = \"soon\"").unwrap();

        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn test_blank_language_falls_back() {
        let settings = Settings::from_toml("dictation_lang = \"  \"").unwrap();
        assert_eq!(settings.dictation_lang, config::DICTATION_LANG);
    }
}
