//! The search bar: routes keyboard, pointer, focus and dictation events to
//! the classifier, the history and the voice controller.
//!
//! The host surface forwards raw events and reads back what to display. All
//! timers are deadlines fired by [`SearchBar::poll`].

use crate::history::{self, render_history, Dropdown, SearchHistory};
use crate::search_engine::SearchEngine;
use crate::settings::Settings;
use crate::storage::LocalStore;
use crate::theme::Theme;
use crate::url_bar::{build_url, is_likely_url};
use crate::voice::{Dictation, MicVisual, ToggleOutcome, VoiceController};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
    Other,
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            meta: false,
        }
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl on Windows/Linux, Cmd on macOS
    fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    fn is_command_char(&self, wanted: char) -> bool {
        matches!(self.key, Key::Char(c) if self.command() && c.eq_ignore_ascii_case(&wanted))
    }
}

/// Where a navigation should open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    CurrentTab,
    NewTab,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: String,
    pub target: Target,
}

/// What the host should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Navigate(Navigation),
    /// Input, dropdown and status were cleared; focus the input
    Cleared,
    Focus,
    FocusAndSelectAll,
    Ignored,
}

pub struct SearchBar<D> {
    store: LocalStore,
    voice: VoiceController<D>,
    theme: Theme,
    input: String,
    dropdown: Dropdown,
    /// "Opening: ..." / "Searching for: ..." markup, escaped
    status: Option<String>,
    focused: bool,
    blur_hide_at: Option<Instant>,
    blur_hide_delay: Duration,
    menu_open: bool,
}

impl<D> std::fmt::Debug for SearchBar<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBar")
            .field("input", &self.input)
            .field("dropdown", &self.dropdown)
            .field("focused", &self.focused)
            .field("voice", &self.voice)
            .finish_non_exhaustive()
    }
}

impl<D: Dictation> SearchBar<D> {
    pub fn new(store: LocalStore, dictation: Option<D>, settings: &Settings) -> Self {
        let theme = Theme::load(&store);
        let voice = VoiceController::new(
            dictation,
            settings.dictation_config(),
            settings.voice_timings(),
        );

        Self {
            store,
            voice,
            theme,
            input: String::new(),
            dropdown: Dropdown::Hidden,
            status: None,
            focused: false,
            blur_hide_at: None,
            blur_hide_delay: settings.blur_hide_delay(),
            menu_open: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn placeholder(&self) -> &'static str {
        self.voice.placeholder().text()
    }

    pub fn mic_visual(&self) -> MicVisual {
        self.voice.mic_visual()
    }

    pub fn clear_button_visible(&self) -> bool {
        !self.input.trim().is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Theme as read when the bar was created
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn voice(&self) -> &VoiceController<D> {
        &self.voice
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn search_engine(&self) -> SearchEngine {
        SearchEngine::load(&self.store)
    }

    pub fn set_search_engine(&mut self, engine: SearchEngine) {
        engine.save(&mut self.store);
    }

    pub fn history(&self) -> Vec<String> {
        history::store::load(&self.store)
    }

    /// Global key handler. Enter and Shift+Enter are expected only while the
    /// input has focus; the other shortcuts work anywhere.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyOutcome {
        if event.key == Key::Escape {
            self.reset();
            return KeyOutcome::Cleared;
        }

        if event.is_command_char('k') {
            self.focus();
            return KeyOutcome::Focus;
        }

        if event.is_command_char('l') {
            self.focus();
            return KeyOutcome::FocusAndSelectAll;
        }

        if event.key == Key::Enter {
            let target = if event.shift {
                Target::NewTab
            } else {
                Target::CurrentTab
            };
            return match self.execute(target) {
                Some(navigation) => KeyOutcome::Navigate(navigation),
                None => KeyOutcome::Ignored,
            };
        }

        KeyOutcome::Ignored
    }

    /// Run the current input as a navigation or a search. Searches are
    /// recorded in history; addresses are not.
    pub fn execute(&mut self, target: Target) -> Option<Navigation> {
        let text = self.input.trim().to_string();
        let url = build_url(&text, self.search_engine())?;

        if is_likely_url(&text) {
            self.status = Some(format!(
                "Opening: <span class=\"query\">{}</span>",
                history::escape_html(&url)
            ));
        } else {
            SearchHistory::new(&mut self.store).save(&text);
            self.status = Some(format!(
                "Searching for: <span class=\"query\">{}</span>",
                history::escape_html(&text)
            ));
        }

        self.dropdown = Dropdown::Hidden;
        log::info!("Navigating to {} ({:?})", url, target);

        Some(Navigation { url, target })
    }

    /// Input text changed by the user
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.status = None;

        if self.voice.cancel() {
            log::debug!("Typing cancelled voice session");
        }

        self.refresh_dropdown();
    }

    /// Clear button clicked
    pub fn click_clear(&mut self) {
        self.reset();
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.blur_hide_at = None;
        self.refresh_dropdown();
    }

    /// Input lost focus. When focus moved into the dropdown itself the
    /// dropdown stays, so clicks on its rows still land. The host then
    /// reports focus leaving the dropdown through [`dropdown_blur`], or
    /// returning to the input through [`focus`].
    ///
    /// [`dropdown_blur`]: SearchBar::dropdown_blur
    /// [`focus`]: SearchBar::focus
    pub fn blur(&mut self, now: Instant, focus_in_dropdown: bool) {
        self.focused = false;
        if focus_in_dropdown {
            return;
        }
        self.blur_hide_at = Some(now + self.blur_hide_delay);
    }

    /// Focus left the dropdown for somewhere other than the input. Starts
    /// the same grace period as [`blur`](SearchBar::blur).
    pub fn dropdown_blur(&mut self, now: Instant) {
        self.focused = false;
        self.blur_hide_at = Some(now + self.blur_hide_delay);
    }

    /// A history row was picked
    pub fn select_history(&mut self, query: &str) -> Option<Navigation> {
        self.input = query.to_string();
        self.execute(Target::CurrentTab)
    }

    /// A history row's delete button was clicked
    pub fn delete_history(&mut self, query: &str) {
        let now_empty = SearchHistory::new(&mut self.store).delete(query);
        if now_empty {
            self.dropdown = Dropdown::Hidden;
        } else {
            self.refresh_dropdown();
        }
    }

    pub fn clear_history(&mut self) {
        SearchHistory::new(&mut self.store).clear();
        self.dropdown = Dropdown::Hidden;
    }

    /// Mic button clicked
    pub fn toggle_mic(&mut self, now: Instant) -> ToggleOutcome {
        let outcome = self.voice.toggle(now);
        if matches!(
            outcome,
            ToggleOutcome::Started | ToggleOutcome::RestartScheduled
        ) {
            self.dropdown = Dropdown::Hidden;
            self.status = None;
        }
        outcome
    }

    pub fn on_voice_start(&mut self) {
        self.voice.on_start();
    }

    /// Recognized text goes into the input for review. Returns `true` if the
    /// input changed.
    pub fn on_voice_result(&mut self, transcript: &str) -> bool {
        match self.voice.on_result(transcript) {
            Some(text) => {
                self.input = text;
                self.status = None;
                true
            }
            None => false,
        }
    }

    pub fn on_voice_error(&mut self, code: &str, now: Instant) {
        if self.voice.on_error(code, now) {
            self.status = None;
            self.dropdown = Dropdown::Hidden;
        }
    }

    pub fn on_voice_end(&mut self) {
        self.voice.on_end();
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// A click anywhere outside the menu panel and its button
    pub fn click_outside_menu(&mut self) {
        self.menu_open = false;
    }

    /// Fire due timers: blur hide, voice restart, voice error reset
    pub fn poll(&mut self, now: Instant) -> Option<ToggleOutcome> {
        if let Some(at) = self.blur_hide_at {
            if now >= at {
                self.blur_hide_at = None;
                if !self.focused {
                    self.dropdown = Dropdown::Hidden;
                }
            }
        }

        let input_is_empty = self.input.trim().is_empty();
        self.voice.poll(now, input_is_empty)
    }

    /// Earliest time `poll` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.blur_hide_at, self.voice.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Escape and the clear button: empty everything and keep focus
    fn reset(&mut self) {
        self.input.clear();
        self.dropdown = Dropdown::Hidden;
        self.status = None;
        self.menu_open = false;
        self.blur_hide_at = None;
        self.voice.cancel();
        self.focused = true;
    }

    fn refresh_dropdown(&mut self) {
        let entries = history::store::load(&self.store);
        self.dropdown = render_history(&entries, self.input.trim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::voice::fake::FakeDictation;
    use crate::voice::{Placeholder, VoiceState};

    fn bar() -> SearchBar<FakeDictation> {
        SearchBar::new(
            LocalStore::in_memory(),
            Some(FakeDictation::default()),
            &Settings::default(),
        )
    }

    fn type_and_enter(bar: &mut SearchBar<FakeDictation>, text: &str) -> KeyOutcome {
        bar.set_input(text);
        bar.handle_key(KeyEvent::new(Key::Enter))
    }

    #[test]
    fn test_enter_searches_and_records_history() {
        let mut bar = bar();

        let outcome = type_and_enter(&mut bar, "hello world");
        assert_eq!(
            outcome,
            KeyOutcome::Navigate(Navigation {
                url: "https://www.google.com/search?q=hello%20world".to_string(),
                target: Target::CurrentTab,
            })
        );
        assert_eq!(bar.history(), vec!["hello world"]);
        assert_eq!(
            bar.status(),
            Some("Searching for: <span class=\"query\">hello world</span>")
        );
    }

    #[test]
    fn test_urls_are_not_recorded() {
        let mut bar = bar();

        let outcome = type_and_enter(&mut bar, "example.com");
        assert_eq!(
            outcome,
            KeyOutcome::Navigate(Navigation {
                url: "https://example.com".to_string(),
                target: Target::CurrentTab,
            })
        );
        assert!(bar.history().is_empty());
        assert!(bar.status().unwrap().starts_with("Opening:"));
    }

    #[test]
    fn test_shift_enter_opens_new_tab() {
        let mut bar = bar();
        bar.set_input("rust");

        let outcome = bar.handle_key(KeyEvent::new(Key::Enter).shift());
        let KeyOutcome::Navigate(navigation) = outcome else {
            panic!("Expected navigation");
        };
        assert_eq!(navigation.target, Target::NewTab);
    }

    #[test]
    fn test_enter_on_empty_input_is_ignored() {
        let mut bar = bar();
        assert_eq!(type_and_enter(&mut bar, "   "), KeyOutcome::Ignored);
        assert!(bar.history().is_empty());
    }

    #[test]
    fn test_engine_preference_read_on_each_build() {
        let mut bar = bar();
        bar.set_search_engine(SearchEngine::Yahoo);

        let KeyOutcome::Navigate(navigation) = type_and_enter(&mut bar, "news") else {
            panic!("Expected navigation");
        };
        assert_eq!(navigation.url, "https://search.yahoo.com/search?p=news");
    }

    #[test]
    fn test_typing_filters_dropdown() {
        let mut bar = bar();
        for query in ["banana", "Avocado", "Apple"] {
            type_and_enter(&mut bar, query);
        }

        bar.set_input("a");
        assert_eq!(bar.dropdown().queries(), vec!["Apple", "Avocado"]);
        assert!(bar.clear_button_visible());

        bar.set_input("");
        assert_eq!(bar.dropdown().queries(), vec!["Apple", "Avocado", "banana"]);
        assert!(!bar.clear_button_visible());

        bar.set_input("kiwi");
        assert!(!bar.dropdown().is_visible());
    }

    #[test]
    fn test_escape_clears_everything() {
        let now = Instant::now();
        let mut bar = bar();
        type_and_enter(&mut bar, "cats");
        bar.set_input("c");
        bar.toggle_menu();
        bar.toggle_mic(now);
        assert!(bar.voice().is_listening());

        assert_eq!(bar.handle_key(KeyEvent::new(Key::Escape)), KeyOutcome::Cleared);
        assert_eq!(bar.input(), "");
        assert!(!bar.dropdown().is_visible());
        assert_eq!(bar.status(), None);
        assert!(!bar.is_menu_open());
        assert!(!bar.voice().is_listening());
        assert_eq!(bar.placeholder(), config::DEFAULT_PLACEHOLDER);
        assert!(bar.is_focused());
    }

    #[test]
    fn test_focus_shortcuts() {
        let mut bar = bar();

        assert_eq!(
            bar.handle_key(KeyEvent::new(Key::Char('k')).ctrl()),
            KeyOutcome::Focus
        );
        assert_eq!(
            bar.handle_key(KeyEvent::new(Key::Char('L')).meta()),
            KeyOutcome::FocusAndSelectAll
        );
        assert_eq!(
            bar.handle_key(KeyEvent::new(Key::Char('k'))),
            KeyOutcome::Ignored
        );
        assert!(bar.is_focused());
    }

    #[test]
    fn test_blur_hides_after_grace_delay() {
        let now = Instant::now();
        let mut bar = bar();
        type_and_enter(&mut bar, "cats");
        bar.focus();
        assert!(bar.dropdown().is_visible());

        bar.blur(now, false);
        bar.poll(now + Duration::from_millis(10));
        assert!(bar.dropdown().is_visible());

        bar.poll(now + Settings::default().blur_hide_delay());
        assert!(!bar.dropdown().is_visible());
    }

    #[test]
    fn test_blur_into_dropdown_keeps_it() {
        let now = Instant::now();
        let mut bar = bar();
        type_and_enter(&mut bar, "cats");
        bar.focus();

        bar.blur(now, true);
        bar.poll(now + Duration::from_secs(1));
        assert!(bar.dropdown().is_visible());

        let navigation = bar.select_history("cats").unwrap();
        assert_eq!(navigation.url, "https://www.google.com/search?q=cats");
        assert_eq!(bar.input(), "cats");
    }

    #[test]
    fn test_leaving_dropdown_hides_it_after_grace() {
        let now = Instant::now();
        let mut bar = bar();
        type_and_enter(&mut bar, "cats");
        bar.focus();

        bar.blur(now, true);
        let left = now + Duration::from_secs(1);
        bar.dropdown_blur(left);

        bar.poll(left + Duration::from_millis(100));
        assert!(bar.dropdown().is_visible());

        bar.poll(left + Duration::from_millis(150));
        assert!(!bar.dropdown().is_visible());
    }

    #[test]
    fn test_refocus_cancels_pending_blur_hide() {
        let now = Instant::now();
        let mut bar = bar();
        type_and_enter(&mut bar, "cats");
        bar.focus();

        bar.blur(now, false);
        bar.focus();
        bar.poll(now + Duration::from_secs(1));
        assert!(bar.dropdown().is_visible());
    }

    #[test]
    fn test_deleting_last_entry_hides_dropdown() {
        let mut bar = bar();
        type_and_enter(&mut bar, "cats");
        type_and_enter(&mut bar, "dogs");
        bar.set_input("");

        bar.delete_history("dogs");
        assert_eq!(bar.dropdown().queries(), vec!["cats"]);

        bar.delete_history("cats");
        assert!(!bar.dropdown().is_visible());

        bar.focus();
        assert!(!bar.dropdown().is_visible());
    }

    #[test]
    fn test_typing_cancels_dictation() {
        let now = Instant::now();
        let mut bar = bar();

        bar.toggle_mic(now);
        assert_eq!(bar.placeholder(), config::LISTENING_PLACEHOLDER);
        assert_eq!(bar.mic_visual(), MicVisual::Listening);

        bar.set_input("t");
        assert_eq!(bar.voice().state(), VoiceState::Idle);
        assert_eq!(bar.placeholder(), config::DEFAULT_PLACEHOLDER);
        assert!(!bar.on_voice_result("too late"));
        assert_eq!(bar.input(), "t");
    }

    #[test]
    fn test_voice_result_fills_input_only() {
        let now = Instant::now();
        let mut bar = bar();

        bar.toggle_mic(now);
        bar.on_voice_start();
        assert!(bar.on_voice_result("rust borrow checker"));
        bar.on_voice_end();

        assert_eq!(bar.input(), "rust borrow checker");
        assert!(bar.history().is_empty());
        assert_eq!(bar.voice().placeholder(), Placeholder::Default);
    }

    #[test]
    fn test_voice_error_reverts_placeholder() {
        let now = Instant::now();
        let mut bar = bar();

        bar.toggle_mic(now);
        bar.on_voice_error("not-allowed", now);
        bar.on_voice_end();
        assert_eq!(bar.placeholder(), config::VOICE_ERROR_PLACEHOLDER);
        assert_eq!(bar.next_deadline(), Some(now + Duration::from_secs(3)));

        bar.poll(now + Duration::from_secs(3));
        assert_eq!(bar.placeholder(), config::DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_menu_toggle() {
        let mut bar = bar();

        bar.toggle_menu();
        assert!(bar.is_menu_open());
        bar.toggle_menu();
        assert!(!bar.is_menu_open());

        bar.toggle_menu();
        bar.click_outside_menu();
        assert!(!bar.is_menu_open());
    }

    #[test]
    fn test_theme_read_at_creation() {
        let mut store = LocalStore::in_memory();
        Theme::Dark.save(&mut store);

        let bar: SearchBar<FakeDictation> = SearchBar::new(store, None, &Settings::default());
        assert_eq!(bar.theme(), Theme::Dark);
        assert_eq!(bar.theme().body_class(), Some("dark-mode"));
    }

    #[test]
    fn test_escaped_status_for_hostile_input() {
        let mut bar = bar();
        type_and_enter(&mut bar, "<b>bold</b> & co");

        let status = bar.status().unwrap();
        assert!(status.contains("&lt;b&gt;bold&lt;/b&gt; &amp; co"));
    }
}
