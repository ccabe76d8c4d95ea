/// Application ID (reverse domain notation)
pub const APP_ID: &str = "dev.myyc.searchbar";

/// Application name
pub const APP_NAME: &str = "searchbar";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key-value store database filename
pub const STORE_DB: &str = "local_storage.db";

/// Optional user settings file, looked up in the data directory
pub const SETTINGS_FILE: &str = "settings.toml";

// ============================================================================
// Store keys
// ============================================================================

/// JSON-serialized list of past queries, most recent first
pub const KEY_SEARCH_HISTORY: &str = "searchHistory";

/// Selected search engine id
pub const KEY_SEARCH_ENGINE: &str = "searchEngine";

/// Theme preference ("dark" or absent)
pub const KEY_THEME: &str = "theme";

// ============================================================================
// Search Engines
// ============================================================================

/// Available search engines: (id, display_name, url_template)
/// Use {} as placeholder for the search query
pub const SEARCH_ENGINES: &[(&str, &str, &str)] = &[
    ("google", "Google", "https://www.google.com/search?q={}"),
    ("duckduckgo", "DuckDuckGo", "https://duckduckgo.com/?q={}"),
    ("bing", "Bing", "https://www.bing.com/search?q={}"),
    ("brave", "Brave", "https://search.brave.com/search?q={}"),
    ("yahoo", "Yahoo", "https://search.yahoo.com/search?p={}"),
    ("startpage", "Startpage", "https://www.startpage.com/do/search?q={}"),
    ("ecosia", "Ecosia", "https://www.ecosia.org/search?q={}"),
];

/// Engine used when the preference is unset or unknown
pub const DEFAULT_SEARCH_ENGINE: &str = "google";

// ============================================================================
// History dropdown
// ============================================================================

/// Maximum history rows shown in the dropdown
pub const HISTORY_DISPLAY_LIMIT: usize = 5;

/// Grace period before a blur hides the dropdown (milliseconds)
pub const BLUR_HIDE_DELAY_MS: u64 = 150;

// ============================================================================
// Placeholders
// ============================================================================

pub const DEFAULT_PLACEHOLDER: &str = "Search anything or type a URL";
pub const LISTENING_PLACEHOLDER: &str = "Listening...";
pub const VOICE_ERROR_PLACEHOLDER: &str = "Voice access unavailable.";
pub const VOICE_START_FAILED_PLACEHOLDER: &str = "Voice start failed.";
pub const VOICE_UNSUPPORTED_NOTICE: &str = "Voice search is not supported.";

// ============================================================================
// Voice dictation
// ============================================================================

/// Language tag handed to the dictation backend
pub const DICTATION_LANG: &str = "en-IN";

/// How long an error placeholder stays before reverting (milliseconds)
pub const VOICE_ERROR_RESET_MS: u64 = 3000;

/// Delay between stopping a running session and starting it again (milliseconds)
pub const VOICE_RESTART_DELAY_MS: u64 = 120;

// ============================================================================
// Theme
// ============================================================================

/// Body class applied when the dark theme is stored
pub const DARK_MODE_CLASS: &str = "dark-mode";
