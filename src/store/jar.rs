use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::{Cookie, Expiry, KeyValueStore, find_cookie};
use crate::error::StoreError;

/// Largest `name=value` (encoded) a single cookie may hold.
pub const MAX_COOKIE_BYTES: usize = 4096;

/// In-memory cookie store with browser semantics: path-scoped, expiring,
/// size-bounded, and only reachable through cookie strings.
#[derive(Debug, Clone)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
    document_path: String,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// An empty jar viewed from the application root.
    pub fn new() -> Self {
        Self::for_path("/")
    }

    /// An empty jar viewed from a document at `document_path`.
    pub fn for_path(document_path: impl Into<String>) -> Self {
        Self {
            cookies: Vec::new(),
            document_path: document_path.into(),
        }
    }

    /// Apply an assignment string such as `k=v;expires=...;path=/`.
    pub fn set_cookie_string(&mut self, s: &str) -> Result<(), StoreError> {
        let cookie = Cookie::parse(s)?;
        self.store(cookie, Utc::now())
    }

    /// Insert or replace `cookie` as of `now`.
    ///
    /// A cookie already expired at `now` deletes any stored cookie with the
    /// same name and path.
    pub fn store(&mut self, cookie: Cookie, now: DateTime<Utc>) -> Result<(), StoreError> {
        let size = cookie.encoded_pair().len();
        if size > MAX_COOKIE_BYTES {
            tracing::warn!(name = %cookie.name, size, "rejecting oversized cookie");
            return Err(StoreError::TooLarge {
                size,
                limit: MAX_COOKIE_BYTES,
            });
        }

        self.cookies.retain(|c| !c.is_expired_at(now));

        let existing = self
            .cookies
            .iter()
            .position(|c| c.name == cookie.name && c.path == cookie.path);

        match (existing, cookie.is_expired_at(now)) {
            (Some(idx), true) => {
                self.cookies.remove(idx);
            }
            (Some(idx), false) => self.cookies[idx] = cookie,
            (None, true) => {}
            (None, false) => self.cookies.push(cookie),
        }
        Ok(())
    }

    /// Visible cookies as a `a=1; b=2` header, the shape a document reads.
    pub fn cookie_header(&self) -> String {
        self.cookie_header_at(Utc::now())
    }

    pub fn cookie_header_at(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|c| !c.is_expired_at(now) && c.path_matches(&self.document_path))
            .map(Cookie::encoded_pair)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Every stored cookie, including ones not visible from this path.
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl KeyValueStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        find_cookie(&self.cookie_header(), key)
    }

    fn set(&mut self, key: &str, value: &str, expiry: &Expiry) -> Result<(), StoreError> {
        let assignment = Cookie::new(key, value, expiry).to_set_cookie_string();
        self.set_cookie_string(&assignment)
    }
}

/// A [`CookieJar`] mirrored to a text file, one assignment string per line.
///
/// The file is rewritten after every successful `set`.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    jar: CookieJar,
}

impl FileCookieJar {
    /// Open the jar at `path`. A missing file is an empty jar; lines that do
    /// not parse are skipped.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut jar = CookieJar::new();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no cookie file yet");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            if let Err(e) = jar.set_cookie_string(line) {
                tracing::warn!(path = %path.display(), "skipping cookie line: {e}");
            }
        }

        Ok(Self { path, jar })
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = String::new();
        for cookie in self.jar.cookies() {
            content.push_str(&cookie.to_set_cookie_string());
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileCookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key)
    }

    fn set(&mut self, key: &str, value: &str, expiry: &Expiry) -> Result<(), StoreError> {
        self.jar.set(key, value, expiry)?;
        self.flush()
    }
}
