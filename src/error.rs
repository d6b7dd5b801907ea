use thiserror::Error;

/// Errors raised while writing to or reading from a key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cookie is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("expiry {0} days from now is out of range")]
    ExpiryOutOfRange(i64),
    #[error("malformed cookie: {0}")]
    Malformed(String),
    #[error("failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
}
