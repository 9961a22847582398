//! Value types flowing through one scan: candidates, addresses, balances and the
//! per-candidate record used for classification.

use std::fmt;
use thiserror::Error;

/// Length of a private key body in hex digits.
pub const KEY_HEX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("expected {expected} hex digits, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("non-hex character in key body")]
    NotHex,
}

/// The two chains every candidate is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
    Tron,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Ethereum, Chain::Tron];

    /// Label used in result files and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Tron => "TRON",
        }
    }

    /// Native unit balances are reported in.
    pub fn native_unit(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Tron => "TRX",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate private key in canonical `0x`-prefixed, 64-hex-digit form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCandidate(String);

impl KeyCandidate {
    /// Canonicalises `raw` by trimming it and prepending `0x` when absent.
    pub fn parse(raw: &str) -> Result<Self, KeyParseError> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if body.len() != KEY_HEX_LEN {
            return Err(KeyParseError::Length { expected: KEY_HEX_LEN, actual: body.len() });
        }
        if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(KeyParseError::NotHex);
        }
        Ok(Self(format!("0x{}", body)))
    }

    /// Builds a candidate from a body already known to be 64 hex digits.
    pub(crate) fn from_body_unchecked(body: String) -> Self {
        debug_assert_eq!(body.len(), KEY_HEX_LEN);
        Self(format!("0x{}", body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key digits without the `0x` marker.
    pub fn body(&self) -> &str {
        &self.0[2..]
    }

    /// Raw 32-byte scalar.
    pub fn to_bytes(&self) -> Result<[u8; 32], KeyParseError> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(self.body(), &mut out).map_err(|_| KeyParseError::NotHex)?;
        Ok(out)
    }
}

impl fmt::Display for KeyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An address in the chain's native text format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainAddress(String);

impl ChainAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one balance probe.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceResult {
    /// Balance in the chain's native unit.
    Amount(f64),
    /// Probe failed; carries the last cause.
    Error(String),
}

impl BalanceResult {
    /// A numeric balance strictly greater than zero.
    pub fn is_funded(&self) -> bool {
        matches!(self, BalanceResult::Amount(v) if *v > 0.0)
    }
}

impl fmt::Display for BalanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceResult::Amount(v) => write!(f, "{}", v),
            BalanceResult::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Everything known about one probed candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub key: KeyCandidate,
    pub eth_address: ChainAddress,
    pub eth_balance: BalanceResult,
    pub tron_address: ChainAddress,
    pub tron_balance: BalanceResult,
}

impl ScanRecord {
    pub fn is_funded(&self) -> bool {
        self.eth_balance.is_funded() || self.tron_balance.is_funded()
    }

    pub fn address(&self, chain: Chain) -> &ChainAddress {
        match chain {
            Chain::Ethereum => &self.eth_address,
            Chain::Tron => &self.tron_address,
        }
    }

    pub fn balance(&self, chain: Chain) -> &BalanceResult {
        match chain {
            Chain::Ethereum => &self.eth_balance,
            Chain::Tron => &self.tron_balance,
        }
    }
}

/// Per-run statistics. Reset at the start of every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Candidates pulled from the key space.
    pub generated: u64,
    /// Candidates rejected by address derivation.
    pub invalid: u64,
    /// Candidates whose balances were queried.
    pub probed: u64,
    /// Watch-list hits successfully written to the match file.
    pub matched: u64,
}

impl Counters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
