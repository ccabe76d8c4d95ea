//! Dropdown render instructions for the history list.
//!
//! Rendering is a pure function of the stored history and the current input,
//! so the host surface only has to apply what it gets back.

use crate::history::matcher::match_history;

/// What the history dropdown should look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropdown {
    /// Hidden, with its contents cleared
    Hidden,
    /// Shown with these rows, top to bottom
    Visible(Vec<HistoryRow>),
}

impl Dropdown {
    pub fn is_visible(&self) -> bool {
        matches!(self, Dropdown::Visible(_))
    }

    /// Queries of the visible rows
    pub fn queries(&self) -> Vec<&str> {
        match self {
            Dropdown::Hidden => Vec::new(),
            Dropdown::Visible(rows) => rows.iter().map(|row| row.query.as_str()).collect(),
        }
    }
}

/// A single history row with a select action and a delete action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// The stored query, unescaped
    pub query: String,
    /// Markup for the row, with all user text escaped
    pub markup: String,
}

impl HistoryRow {
    pub fn new(query: String) -> Self {
        let escaped = escape_html(&query);
        let markup = format!(
            "<div class=\"history-item\" data-query=\"{q}\">\
             <span class=\"history-text\">{q}</span>\
             <button class=\"history-delete\" data-query=\"{q}\" aria-label=\"Remove {q} from history\">&times;</button>\
             </div>",
            q = escaped
        );
        Self { query, markup }
    }
}

/// Build the dropdown for `input` from `entries` (most recent first)
pub fn render_history(entries: &[String], input: &str) -> Dropdown {
    if entries.is_empty() {
        return Dropdown::Hidden;
    }

    let matches = match_history(entries, input);
    if matches.is_empty() {
        return Dropdown::Hidden;
    }

    Dropdown::Visible(matches.into_iter().map(HistoryRow::new).collect())
}

/// Escape text for safe insertion into HTML markup
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
