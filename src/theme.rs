//! Theme preference.

use crate::config;
use crate::storage::LocalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Unset,
}

impl Theme {
    /// Anything other than "dark" reads as unset
    pub fn load(store: &LocalStore) -> Self {
        match store.get(config::KEY_THEME).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Unset,
        }
    }

    pub fn save(self, store: &mut LocalStore) {
        match self {
            Theme::Dark => store.set(config::KEY_THEME, "dark"),
            Theme::Unset => store.remove(config::KEY_THEME),
        };
    }

    /// Class to put on the page body, if any
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some(config::DARK_MODE_CLASS),
            Theme::Unset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_round_trip() {
        let mut store = LocalStore::in_memory();
        assert_eq!(Theme::load(&store), Theme::Unset);

        Theme::Dark.save(&mut store);
        assert_eq!(Theme::load(&store), Theme::Dark);
        assert_eq!(Theme::Dark.body_class(), Some("dark-mode"));

        Theme::Unset.save(&mut store);
        assert_eq!(store.get(config::KEY_THEME), None);
        assert_eq!(Theme::Unset.body_class(), None);
    }

    #[test]
    fn test_unknown_value_is_unset() {
        let mut store = LocalStore::in_memory();
        store.set(config::KEY_THEME, "solarized");
        assert_eq!(Theme::load(&store), Theme::Unset);
    }
}
