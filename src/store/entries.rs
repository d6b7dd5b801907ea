use serde_json::Value;

use super::{Expiry, KeyValueStore};
use crate::error::StoreError;
use crate::models::{Entry, EntryList};

/// Key the list is stored under.
pub const COOKIE_NAME: &str = "todos";
/// How long a saved list stays valid after its last write.
pub const COOKIE_LIFETIME_DAYS: i64 = 365;

/// Saves and loads an [`EntryList`] as a JSON array in a [`KeyValueStore`].
///
/// Every write lasts [`COOKIE_LIFETIME_DAYS`] and is scoped to `/`.
pub struct EntryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Store under `todos`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, COOKIE_NAME)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Replace the stored list with `entries`.
    pub fn save(&mut self, entries: &EntryList) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        let expiry = Expiry::days_from_now(COOKIE_LIFETIME_DAYS)?;
        self.store.set(&self.key, &json, &expiry)?;
        tracing::debug!(key = %self.key, count = entries.len(), "saved entries");
        Ok(())
    }

    /// Read the stored list. Never fails: absent or unusable data yields an
    /// empty list, and malformed elements are dropped.
    pub fn load(&self) -> EntryList {
        match self.store.get(&self.key) {
            Some(raw) => parse_entries(&raw),
            None => {
                tracing::debug!(key = %self.key, "no stored entries");
                EntryList::new()
            }
        }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

/// Decode a stored JSON array, keeping only `{id: string, text: string}`
/// elements in their original order.
pub fn parse_entries(raw: &str) -> EntryList {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("stored entries are not valid JSON, starting empty: {e}");
            return EntryList::new();
        }
    };

    let Some(items) = value.as_array() else {
        tracing::warn!("stored entries are not a JSON array, starting empty");
        return EntryList::new();
    };

    let entries: Vec<Entry> = items.iter().filter_map(entry_from_value).collect();
    let dropped = items.len() - entries.len();
    if dropped > 0 {
        tracing::warn!(dropped, "ignoring malformed stored entries");
    }

    EntryList::from_entries(entries)
}

fn entry_from_value(value: &Value) -> Option<Entry> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_str()?;
    let text = obj.get("text")?.as_str()?;
    Some(Entry::new(id, text))
}
