pub mod config;
pub mod domain;
pub mod errors;

pub use config::ScannerConfig;
pub use domain::{BalanceResult, Chain, ChainAddress, Counters, KeyCandidate, ScanRecord};
pub use errors::ScanError;
