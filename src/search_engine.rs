//! Search engine preference and search URL templates.

use crate::config;
use crate::storage::LocalStore;

/// A supported search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
    Bing,
    Brave,
    Yahoo,
    Startpage,
    Ecosia,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 7] = [
        SearchEngine::Google,
        SearchEngine::DuckDuckGo,
        SearchEngine::Bing,
        SearchEngine::Brave,
        SearchEngine::Yahoo,
        SearchEngine::Startpage,
        SearchEngine::Ecosia,
    ];

    /// Identifier used in storage
    pub fn id(self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::DuckDuckGo => "duckduckgo",
            SearchEngine::Bing => "bing",
            SearchEngine::Brave => "brave",
            SearchEngine::Yahoo => "yahoo",
            SearchEngine::Startpage => "startpage",
            SearchEngine::Ecosia => "ecosia",
        }
    }

    /// Look up an engine by its storage id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|engine| engine.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        self.entry().1
    }

    /// URL template with `{}` where the encoded query goes
    pub fn url_template(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (&'static str, &'static str, &'static str) {
        config::SEARCH_ENGINES
            .iter()
            .find(|(id, _, _)| *id == self.id())
            .unwrap_or(&config::SEARCH_ENGINES[0])
    }

    /// Read the stored preference, falling back to the default engine
    pub fn load(store: &LocalStore) -> Self {
        match store.get(config::KEY_SEARCH_ENGINE) {
            Some(id) => Self::from_id(&id).unwrap_or_else(|| {
                log::debug!("Unknown search engine '{}', using default", id);
                Self::default_engine()
            }),
            None => Self::default_engine(),
        }
    }

    /// Persist this engine as the preference
    pub fn save(self, store: &mut LocalStore) {
        if store.set(config::KEY_SEARCH_ENGINE, self.id()) {
            log::info!("Search engine set to {}", self.display_name());
        }
    }

    fn default_engine() -> Self {
        Self::from_id(config::DEFAULT_SEARCH_ENGINE).unwrap_or_default()
    }
}

/// Build a search URL for the given query with the given engine
pub fn build_search_url(engine: SearchEngine, query: &str) -> String {
    let encoded = urlencoding::encode(query);
    engine.url_template().replace("{}", &encoded)
}
