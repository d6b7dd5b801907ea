//! Entry identifiers.
//!
//! Ids are 128 bits from the OS random source, hex encoded. If the OS source
//! fails, ids fall back to a timestamp plus a weakly random suffix.

use chrono::Utc;
use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng, TryRngCore};
use thiserror::Error;

const ID_BYTES: usize = 16;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Error, Debug)]
#[error("secure random source unavailable")]
pub struct EntropyUnavailable;

/// Source of strong random bytes.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyUnavailable>;
}

/// The operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyUnavailable> {
        OsRng.try_fill_bytes(buf).map_err(|_| EntropyUnavailable)
    }
}

pub struct IdGenerator<E = OsEntropy> {
    entropy: E,
    fallback: Option<SmallRng>,
}

impl IdGenerator<OsEntropy> {
    pub fn new() -> Self {
        Self::with_entropy(OsEntropy)
    }
}

impl Default for IdGenerator<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> IdGenerator<E> {
    pub fn with_entropy(entropy: E) -> Self {
        Self {
            entropy,
            fallback: None,
        }
    }

    pub fn next_id(&mut self) -> String {
        let mut bytes = [0u8; ID_BYTES];
        match self.entropy.fill(&mut bytes) {
            Ok(()) => hex::encode(bytes),
            Err(e) => self.fallback_id(e),
        }
    }

    fn fallback_id(&mut self, cause: EntropyUnavailable) -> String {
        let now = Utc::now();
        let rng = self.fallback.get_or_insert_with(|| {
            tracing::warn!("{cause}, falling back to weak ids");
            let seed = now.timestamp_nanos_opt().unwrap_or_default().unsigned_abs();
            SmallRng::seed_from_u64(seed)
        });

        let suffix: String = (0..8)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();
        format!("id-{}{}", to_base36(now.timestamp_millis() as u64), suffix)
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}
