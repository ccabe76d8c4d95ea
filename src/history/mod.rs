//! Search history: storage, matching and dropdown rendering.

pub mod matcher;
pub mod render;
pub mod store;

pub use matcher::match_history;
pub use render::{escape_html, render_history, Dropdown, HistoryRow};
pub use store::SearchHistory;
