//! src/keyspace/mod.rs
//!
//! Deterministic candidate enumeration. One random 59-digit hex prefix is drawn per
//! run; every 5-digit hex suffix is then appended in counting order, so the sequence
//! covers the 16^5 fixed-radix suffix space exactly once.

use rand::Rng;
use std::iter::FusedIterator;

use crate::core::domain::{KeyCandidate, KEY_HEX_LEN};
use crate::core::errors::ScanError;

pub const PREFIX_LEN: usize = 59;
pub const SUFFIX_LEN: usize = KEY_HEX_LEN - PREFIX_LEN;
/// Number of candidates in one run (16^5).
pub const SUFFIX_SPACE: u32 = 1 << (4 * SUFFIX_LEN as u32);

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// The key space of one run: a fixed prefix plus every possible suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    /// Draws a fresh prefix from the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let prefix = (0..PREFIX_LEN)
            .map(|_| HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char)
            .collect();
        Self { prefix }
    }

    /// Reuses a known prefix, e.g. to reproduce an earlier run.
    pub fn with_prefix(prefix: &str) -> Result<Self, ScanError> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.len() != PREFIX_LEN {
            return Err(ScanError::ConfigError(format!(
                "key prefix must be {} hex digits, got {}",
                PREFIX_LEN,
                prefix.len()
            )));
        }
        if !prefix.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ScanError::ConfigError("key prefix must be hexadecimal".to_string()));
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Always `SUFFIX_SPACE`.
    pub fn len(&self) -> usize {
        SUFFIX_SPACE as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Candidate at position `index` of the enumeration order.
    pub fn candidate(&self, index: u32) -> Option<KeyCandidate> {
        (index < SUFFIX_SPACE).then(|| {
            let mut body = String::with_capacity(KEY_HEX_LEN);
            body.push_str(&self.prefix);
            push_suffix(&mut body, index);
            KeyCandidate::from_body_unchecked(body)
        })
    }

    pub fn iter(&self) -> KeySpaceIter {
        self.clone().into_iter()
    }
}

impl IntoIterator for KeySpace {
    type Item = KeyCandidate;
    type IntoIter = KeySpaceIter;

    fn into_iter(self) -> KeySpaceIter {
        KeySpaceIter { space: self, next: 0 }
    }
}

/// Forward-only cursor over a `KeySpace`.
#[derive(Debug, Clone)]
pub struct KeySpaceIter {
    space: KeySpace,
    next: u32,
}

impl Iterator for KeySpaceIter {
    type Item = KeyCandidate;

    fn next(&mut self) -> Option<KeyCandidate> {
        let candidate = self.space.candidate(self.next)?;
        self.next += 1;
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (SUFFIX_SPACE - self.next.min(SUFFIX_SPACE)) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for KeySpaceIter {}

impl FusedIterator for KeySpaceIter {}

/// Writes `index` as `SUFFIX_LEN` hex digits, most significant first.
fn push_suffix(out: &mut String, index: u32) {
    for digit in (0..SUFFIX_LEN).rev() {
        let nibble = (index >> (4 * digit)) & 0xf;
        out.push(HEX_CHARS[nibble as usize] as char);
    }
}
