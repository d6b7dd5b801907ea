//! Persistence for the entry list.
//!
//! The list is kept in a cookie-style key-value store: one string value per
//! key, each with an expiry and a path scope. [`KeyValueStore`] is the seam;
//! [`CookieJar`] and [`FileCookieJar`] implement it, and [`EntryStore`]
//! encodes the list on top of any implementation.

mod cookie;
mod entries;
mod jar;

pub use cookie::*;
pub use entries::*;
pub use jar::*;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::StoreError;

/// When a stored value stops being visible, and which paths can see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl Expiry {
    /// Expire at `expires`, scoped to the whole application (`/`).
    pub fn at(expires: DateTime<Utc>) -> Self {
        Self {
            expires,
            path: "/".to_string(),
        }
    }

    /// "now + `days`" scoped to `/`. Fails if `days` is not positive or the
    /// date does not fit.
    pub fn days_from_now(days: i64) -> Result<Self, StoreError> {
        if days <= 0 {
            return Err(StoreError::ExpiryOutOfRange(days));
        }
        TimeDelta::try_days(days)
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .map(Self::at)
            .ok_or(StoreError::ExpiryOutOfRange(days))
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// A string key-value store with per-key expiry.
pub trait KeyValueStore {
    /// Current value for `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, unconditionally replacing any prior value.
    fn set(&mut self, key: &str, value: &str, expiry: &Expiry) -> Result<(), StoreError>;
}
