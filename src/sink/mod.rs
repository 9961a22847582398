//! Durable, append-only result files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::domain::{Chain, ScanRecord};
use crate::core::errors::ScanError;

const MATCH_HEADER: &str = "Target Match!";

/// Destination for funded discoveries and watch-list matches.
pub trait ResultSink: Send + Sync {
    /// Must not return `Ok` before the record is on stable storage.
    fn record_funded(&self, record: &ScanRecord) -> Result<(), ScanError>;

    fn record_match(&self, record: &ScanRecord) -> Result<(), ScanError>;
}

/// Human-readable block for `record`, terminated by a blank line.
pub fn format_block(record: &ScanRecord, header: Option<&str>) -> String {
    let mut block = String::new();
    if let Some(header) = header {
        block.push_str(header);
        block.push('\n');
    }
    block.push_str(&format!("Private Key: {}\n", record.key));
    for chain in Chain::ALL {
        block.push_str(&format!(
            "{} Address: {} ({} {})\n",
            chain.label(),
            record.address(chain),
            record.balance(chain),
            chain.native_unit()
        ));
    }
    block.push('\n');
    block
}

/// Appends blocks to two text files, syncing each write.
#[derive(Debug, Clone)]
pub struct FileSink {
    funded_path: PathBuf,
    matches_path: PathBuf,
}

impl FileSink {
    pub fn new(funded_path: impl Into<PathBuf>, matches_path: impl Into<PathBuf>) -> Self {
        Self { funded_path: funded_path.into(), matches_path: matches_path.into() }
    }

    pub fn funded_path(&self) -> &Path {
        &self.funded_path
    }

    pub fn matches_path(&self) -> &Path {
        &self.matches_path
    }

    fn append(path: &Path, block: &str) -> Result<(), ScanError> {
        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(block.as_bytes())?;
            file.sync_all()
        };
        write().map_err(|e| ScanError::SinkWriteError(format!("{}: {}", path.display(), e)))
    }
}

impl ResultSink for FileSink {
    fn record_funded(&self, record: &ScanRecord) -> Result<(), ScanError> {
        Self::append(&self.funded_path, &format_block(record, None))?;
        info!("Funded record saved to {}", self.funded_path.display());
        Ok(())
    }

    fn record_match(&self, record: &ScanRecord) -> Result<(), ScanError> {
        Self::append(&self.matches_path, &format_block(record, Some(MATCH_HEADER)))?;
        info!("Target match saved to {}", self.matches_path.display());
        Ok(())
    }
}
