//! User-driven create and delete flows.
//!
//! The controller owns the list state and keeps the surface and the store in
//! step with it. All flows are synchronous: dialogs block until answered.

use crate::ids::{EntropySource, IdGenerator, OsEntropy};
use crate::models::{Entry, EntryList};
use crate::render::{self, ListSurface};
use crate::store::{EntryStore, KeyValueStore};

pub const CREATE_PROMPT: &str = "Enter a new TO DO:";

/// Blocking user dialogs.
pub trait Dialogs {
    /// Ask for free text. `None` means the user cancelled, which is distinct
    /// from submitting an empty string.
    fn request_text(&mut self, prompt: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Which branch a user action took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(Entry),
    /// The prompt was dismissed.
    Cancelled,
    /// The input was empty after trimming.
    Empty,
    Deleted(Entry),
    /// The confirmation was declined.
    Declined,
    /// No entry has the requested id.
    NotFound,
}

pub fn confirm_message(entry: &Entry) -> String {
    format!("Remove this TO DO?\n\n- {}", entry.text)
}

pub struct Controller<S, D, V, E = OsEntropy> {
    entries: EntryList,
    store: EntryStore<S>,
    ids: IdGenerator<E>,
    dialogs: D,
    view: V,
}

impl<S, D, V> Controller<S, D, V, OsEntropy>
where
    S: KeyValueStore,
    D: Dialogs,
    V: ListSurface,
{
    pub fn new(store: EntryStore<S>, dialogs: D, view: V) -> Self {
        Self::with_ids(store, dialogs, view, IdGenerator::new())
    }
}

impl<S, D, V, E> Controller<S, D, V, E>
where
    S: KeyValueStore,
    D: Dialogs,
    V: ListSurface,
    E: EntropySource,
{
    pub fn with_ids(store: EntryStore<S>, dialogs: D, view: V, ids: IdGenerator<E>) -> Self {
        Self {
            entries: EntryList::new(),
            store,
            ids,
            dialogs,
            view,
        }
    }

    /// Load persisted entries and draw them.
    pub fn start(&mut self) {
        self.entries = self.store.load();
        render::render_all(&mut self.view, &self.entries);
        tracing::info!(count = self.entries.len(), "loaded entries");
    }

    /// Prompt for text and, if any was given, add it as the newest entry.
    pub fn create(&mut self) -> Outcome {
        let Some(input) = self.dialogs.request_text(CREATE_PROMPT) else {
            tracing::debug!("create cancelled");
            return Outcome::Cancelled;
        };
        self.add(&input)
    }

    /// Add `input` as the newest entry without prompting. Whitespace-only
    /// input is ignored.
    pub fn add(&mut self, input: &str) -> Outcome {
        let text = input.trim();
        if text.is_empty() {
            tracing::debug!("ignoring empty entry");
            return Outcome::Empty;
        }

        let mut entry = Entry::new(self.ids.next_id(), text);
        while self.entries.contains(&entry.id) {
            entry.id = self.ids.next_id();
        }

        self.entries.push_front(entry.clone());
        render::render_one(&mut self.view, &entry);
        self.persist();
        tracing::info!(id = %entry.id, "created entry");
        Outcome::Created(entry)
    }

    /// Ask for confirmation, then remove the entry with `id`.
    pub fn delete(&mut self, id: &str) -> Outcome {
        let Some(entry) = self.entries.get(id) else {
            tracing::debug!(id, "delete target not found");
            return Outcome::NotFound;
        };

        if !self.dialogs.confirm(&confirm_message(entry)) {
            tracing::debug!(id, "delete declined");
            return Outcome::Declined;
        }

        let Some(removed) = self.entries.remove(id) else {
            return Outcome::NotFound;
        };
        render::remove_one(&mut self.view, id);
        self.persist();
        tracing::info!(id, "deleted entry");
        Outcome::Deleted(removed)
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.entries) {
            tracing::warn!("failed to persist entries: {e}");
        }
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }
}
