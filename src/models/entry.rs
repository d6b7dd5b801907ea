use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// `id` is opaque and unique within its list. `text` is the trimmed,
/// non-empty string the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub text: String,
}

impl Entry {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Ordered collection of entries, newest first.
///
/// The only mutations are [`EntryList::push_front`] and
/// [`EntryList::remove`]; both keep ids unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from entries in head-to-tail order, dropping any entry
    /// whose id was already seen.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            if list.contains(&entry.id) {
                tracing::debug!(id = %entry.id, "dropping duplicate entry id");
                continue;
            }
            list.entries.push(entry);
        }
        list
    }

    /// Insert at the head. Returns `false` and leaves the list untouched if
    /// the id is already present.
    pub fn push_front(&mut self, entry: Entry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.insert(0, entry);
        true
    }

    /// Remove the entry with exactly this id.
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
