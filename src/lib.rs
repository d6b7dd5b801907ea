//! A newest-first to-do list persisted in a cookie jar.
//!
//! [`controller::Controller`] owns the [`models::EntryList`], draws it onto a
//! [`render::ListSurface`] and saves it through a [`store::EntryStore`] after
//! every change. Dialogs, surfaces and stores are traits so each piece can be
//! driven without a real UI.

pub mod config;
pub mod controller;
pub mod error;
pub mod ids;
pub mod models;
pub mod render;
pub mod store;
pub mod terminal;
