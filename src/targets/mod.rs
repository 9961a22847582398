//! Watch-list of addresses of interest.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::core::errors::ScanError;

/// Lower-cased addresses loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    addresses: HashSet<String>,
}

impl TargetSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads a newline-delimited list. A missing file is an empty set.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let set = Self::from_lines(&content);
                info!("Loaded {} target addresses from {}", set.len(), path.display());
                Ok(set)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No watch-list at {}", path.display());
                Ok(Self::empty())
            }
            Err(e) => Err(ScanError::ConfigError(format!(
                "failed to read watch-list {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn from_lines(content: &str) -> Self {
        let addresses = content
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        Self { addresses }
    }

    /// Case-insensitive membership test.
    pub fn is_match(&self, address: &str) -> bool {
        !self.addresses.is_empty() && self.addresses.contains(&address.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
