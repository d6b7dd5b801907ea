//! Domain models for the to-do list.
//!
//! - [`Entry`]: one user-created item with an opaque id and display text.
//! - [`EntryList`]: the single source of truth for list state, ordered
//!   newest first. It is owned by the controller and handed by reference to
//!   the renderer and the store adapter.

mod entry;

pub use entry::*;
