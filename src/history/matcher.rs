//! Autocomplete matching over stored queries.

use crate::config;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Pick the history entries to show for the current input.
///
/// With empty input the most recent entries are returned in stored order.
/// Otherwise only entries starting with the input are kept, compared on
/// base letters (case and accents ignored), and sorted alphabetically.
pub fn match_history(entries: &[String], input: &str) -> Vec<String> {
    let input = input.trim();

    if input.is_empty() {
        return entries
            .iter()
            .take(config::HISTORY_DISPLAY_LIMIT)
            .cloned()
            .collect();
    }

    let prefix = fold(input);

    let mut matches: Vec<(String, &String)> = entries
        .iter()
        .map(|entry| (fold(entry), entry))
        .filter(|(folded, _)| folded.starts_with(&prefix))
        .collect();

    // Ties on the folded key fall back to the raw text
    matches.sort_by(|(a_key, a), (b_key, b)| a_key.cmp(b_key).then_with(|| a.cmp(b)));
    matches.truncate(config::HISTORY_DISPLAY_LIMIT);

    matches.into_iter().map(|(_, entry)| entry.clone()).collect()
}

/// Reduce text to lowercase base letters
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
