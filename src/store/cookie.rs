//! Cookie string encoding.
//!
//! Names and values are percent-encoded on write and decoded on read, so
//! arbitrary text (including `;`, `=` and spaces) survives the
//! `name=value; attr=...` framing.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use super::Expiry;
use crate::error::StoreError;

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// One stored cookie. `name` and `value` are held decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// `None` means a session cookie.
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, expiry: &Expiry) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: Some(expiry.expires),
            path: expiry.path.clone(),
        }
    }

    /// `enc(name)=enc(value)`, the form that appears in a cookie header.
    pub fn encoded_pair(&self) -> String {
        format!(
            "{}={}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.value)
        )
    }

    /// The assignment string, e.g.
    /// `todos=%5B%5D;expires=Wed, 20 Oct 2027 08:00:00 GMT;path=/`.
    pub fn to_set_cookie_string(&self) -> String {
        let mut out = self.encoded_pair();
        if let Some(expires) = self.expires {
            out.push_str(";expires=");
            out.push_str(&expires.format(EXPIRES_FORMAT).to_string());
        }
        out.push_str(";path=");
        out.push_str(&self.path);
        out
    }

    /// Parse an assignment string produced by [`Cookie::to_set_cookie_string`]
    /// (or a browser). Unknown attributes are ignored, as is an unparsable
    /// `expires`.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        let mut parts = s.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (raw_name, raw_value) = pair
            .split_once('=')
            .ok_or_else(|| StoreError::Malformed(format!("missing '=' in {pair:?}")))?;
        if raw_name.trim().is_empty() {
            return Err(StoreError::Malformed("empty cookie name".to_string()));
        }

        let name = decode(raw_name.trim())?;
        let value = decode(raw_value.trim())?;

        let mut expires = None;
        let mut max_age = None;
        let mut path = "/".to_string();

        for attr in parts {
            let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
            match key.trim().to_ascii_lowercase().as_str() {
                "expires" => expires = parse_expires(val.trim()),
                "max-age" => max_age = val.trim().parse::<i64>().ok(),
                "path" if !val.trim().is_empty() => path = val.trim().to_string(),
                _ => {}
            }
        }

        if let Some(secs) = max_age {
            let expiry = TimeDelta::try_seconds(secs)
                .and_then(|delta| Utc::now().checked_add_signed(delta))
                .ok_or_else(|| StoreError::Malformed(format!("max-age {secs} out of range")))?;
            expires = Some(expiry);
        }

        Ok(Self {
            name,
            value,
            expires,
            path,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    /// Whether a document at `request_path` can see this cookie.
    pub fn path_matches(&self, request_path: &str) -> bool {
        if request_path == self.path {
            return true;
        }
        request_path.starts_with(&self.path)
            && (self.path.ends_with('/') || request_path[self.path.len()..].starts_with('/'))
    }
}

/// Find `name` in a `a=1; b=2` cookie header and return its decoded value.
///
/// Matches the encoded name exactly; a value that fails to decode is treated
/// as absent.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    let target = format!("{}=", urlencoding::encode(name));
    header
        .split("; ")
        .find_map(|part| part.strip_prefix(target.as_str()))
        .and_then(|raw| decode(raw).ok())
}

fn decode(raw: &str) -> Result<String, StoreError> {
    urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .map_err(|e| StoreError::Malformed(e.to_string()))
}

fn parse_expires(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, EXPIRES_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
