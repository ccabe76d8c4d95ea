use crate::search_engine::{build_search_url, SearchEngine};
use std::borrow::Cow;
use url::Url;

/// Result of classifying search bar input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlBarInput {
    /// An address to navigate to, scheme included
    Url(String),
    /// A search query to send to the search engine
    Search(String),
}

/// Decide whether `text` names a navigable address.
///
/// Rules:
/// 1. Empty input or input with whitespace anywhere is never a URL
/// 2. A single word without `.` or `:` is a search term
/// 3. Otherwise prepend `https://` when no `scheme://` is present and let
///    the URL parser decide; the result must carry a non-empty host
///
/// There is no TLD allowlist: `localhost:3000`, IP literals and unusual
/// TLDs are all accepted as long as they parse.
pub fn is_likely_url(text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return false;
    }

    if !trimmed.contains('.') && !trimmed.contains(':') {
        return false;
    }

    let candidate: Cow<'_, str> = if has_explicit_scheme(trimmed) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("https://{}", trimmed))
    };

    match Url::parse(&candidate) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(e) => {
            log::trace!("'{}' is not an address: {}", trimmed, e);
            false
        }
    }
}

/// Classify input without building anything
pub fn parse_input(input: &str) -> UrlBarInput {
    let trimmed = input.trim();

    if is_likely_url(trimmed) {
        UrlBarInput::Url(with_scheme(trimmed))
    } else {
        UrlBarInput::Search(trimmed.to_string())
    }
}

/// Turn input into the address to open: the URL itself, or a search on
/// `engine`. Returns `None` for empty input.
pub fn build_url(text: &str, engine: SearchEngine) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match parse_input(trimmed) {
        UrlBarInput::Url(url) => Some(url),
        UrlBarInput::Search(query) => Some(build_search_url(engine, &query)),
    }
}

/// Keep an explicit scheme, otherwise default to https
fn with_scheme(text: &str) -> String {
    if has_explicit_scheme(text) {
        text.to_string()
    } else {
        format!("https://{}", text)
    }
}

/// `true` for text starting with `scheme://`
fn has_explicit_scheme(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
