// src/lib.rs
//! Sequential ETH + TRON keyspace scanner.
//!
//! `keyspace` enumerates candidates, `crypto` derives addresses, `prober` queries
//! balances through `blockchain` clients, `targets` and `sink` handle watch-list hits
//! and results, and `scanner` drives the whole pipeline.

pub mod blockchain;
pub mod cli;
pub mod core;
pub mod crypto;
pub mod keyspace;
pub mod prober;
pub mod scanner;
pub mod sink;
pub mod targets;

pub use crate::core::errors::ScanError;
pub use crate::scanner::{ScanOutcome, ScanReport, Scanner};
