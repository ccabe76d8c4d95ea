pub mod config;
pub mod history;
pub mod search_bar;
pub mod search_engine;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod url_bar;
pub mod voice;

pub use search_bar::{Key, KeyEvent, KeyOutcome, Navigation, SearchBar, Target};
pub use search_engine::SearchEngine;
pub use settings::Settings;
pub use storage::LocalStore;
