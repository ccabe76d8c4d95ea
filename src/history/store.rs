use crate::config;
use crate::storage::{LocalStore, StorageError};

/// Past search queries, most recent first, kept in the local store
pub struct SearchHistory<'a> {
    store: &'a mut LocalStore,
}

impl<'a> SearchHistory<'a> {
    pub fn new(store: &'a mut LocalStore) -> Self {
        Self { store }
    }

    /// Stored queries, most recent first. Missing or corrupt data reads as empty.
    pub fn get(&self) -> Vec<String> {
        load(&*self.store)
    }

    /// Record a query at the front, dropping any earlier copy of it
    pub fn save(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let mut entries = self.get();
        entries.retain(|entry| entry != query);
        entries.insert(0, query.to_string());
        self.persist(&entries);

        log::debug!("Saved '{}' to search history ({} entries)", query, entries.len());
    }

    /// Remove a query. Returns `true` when the history is now empty and the
    /// dropdown should be hidden.
    pub fn delete(&mut self, query: &str) -> bool {
        let mut entries = self.get();
        let before = entries.len();
        entries.retain(|entry| entry != query);

        if entries.len() != before {
            self.persist(&entries);
            log::debug!("Deleted '{}' from search history", query);
        }

        entries.is_empty()
    }

    /// Forget every stored query
    pub fn clear(&mut self) {
        if self.store.remove(config::KEY_SEARCH_HISTORY) {
            log::info!("Cleared search history");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_empty()
    }

    fn persist(&mut self, entries: &[String]) {
        match encode(entries) {
            Ok(json) => {
                self.store.set(config::KEY_SEARCH_HISTORY, &json);
            }
            Err(e) => log::warn!("Failed to save search history: {}", e),
        }
    }
}

/// Read history from a store without borrowing it mutably
pub fn load(store: &LocalStore) -> Vec<String> {
    let Some(json) = store.get(config::KEY_SEARCH_HISTORY) else {
        return Vec::new();
    };

    match decode(&json) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Ignoring corrupt search history: {}", e);
            Vec::new()
        }
    }
}

fn encode(entries: &[String]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(entries)?)
}

fn decode(json: &str) -> Result<Vec<String>, StorageError> {
    Ok(serde_json::from_str(json)?)
}
