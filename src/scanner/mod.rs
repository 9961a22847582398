// src/scanner/mod.rs
//! Scan orchestration.
//!
//! One task walks the candidate sequence. Per candidate it derives both addresses,
//! probes both balances concurrently, then classifies:
//! funded → record and halt, watch-list hit → record and continue, else discard.

use futures::future::join;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::core::domain::{Chain, ChainAddress, Counters, KeyCandidate, ScanRecord};
use crate::core::errors::ScanError;
use crate::crypto::derive::AddressDeriver;
use crate::prober::BalanceProber;
use crate::sink::ResultSink;
use crate::targets::TargetSet;

/// Where the orchestrator currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Enumerating,
    Deriving,
    Probing,
    Classifying,
    Halted,
    Exhausted,
    Interrupted,
    /// A fatal error ended the run.
    Failed,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// A candidate holds a positive balance; its record was written.
    Funded(ScanRecord),
    /// Every candidate was processed.
    Exhausted,
    /// The halt token was cancelled from outside.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    pub counters: Counters,
}

/// Classification of one probed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Funded,
    Target,
    Discard,
}

pub struct Scanner {
    deriver: Box<dyn AddressDeriver>,
    prober: BalanceProber,
    sink: Box<dyn ResultSink>,
    targets: TargetSet,
    candidate_delay: Option<Duration>,
    halt: CancellationToken,
    counters: Counters,
    state: ScanState,
}

impl Scanner {
    pub fn new(
        deriver: Box<dyn AddressDeriver>,
        prober: BalanceProber,
        sink: Box<dyn ResultSink>,
        targets: TargetSet,
    ) -> Self {
        Self {
            deriver,
            prober,
            sink,
            targets,
            candidate_delay: None,
            halt: CancellationToken::new(),
            counters: Counters::default(),
            state: ScanState::Idle,
        }
    }

    /// Pause between candidates. `None` or zero disables it.
    pub fn with_candidate_delay(mut self, delay: Option<Duration>) -> Self {
        self.candidate_delay = delay.filter(|d| !d.is_zero());
        self
    }

    /// Token that stops the run when cancelled; also cancelled on a funded hit.
    pub fn halt_token(&self) -> CancellationToken {
        self.halt.clone()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Drives the pipeline over `candidates` until a funded hit, exhaustion or
    /// cancellation.
    ///
    /// Only a failed funded-record write is returned as an error. The summary is
    /// logged on every exit and `counters()` stays readable afterwards.
    pub async fn run<I>(&mut self, candidates: I) -> Result<ScanReport, ScanError>
    where
        I: IntoIterator<Item = KeyCandidate>,
    {
        self.counters.reset();
        self.state = ScanState::Enumerating;

        let result = self.scan(candidates).await;
        self.state = match &result {
            Ok(ScanOutcome::Funded(_)) => ScanState::Halted,
            Ok(ScanOutcome::Exhausted) => ScanState::Exhausted,
            Ok(ScanOutcome::Interrupted) => ScanState::Interrupted,
            Err(_) => ScanState::Failed,
        };
        info!(
            generated = self.counters.generated,
            invalid = self.counters.invalid,
            probed = self.counters.probed,
            matched = self.counters.matched,
            state = ?self.state,
            "Scan finished. Invalid keys: {}",
            self.counters.invalid
        );

        result.map(|outcome| ScanReport { outcome, counters: self.counters })
    }

    async fn scan<I>(&mut self, candidates: I) -> Result<ScanOutcome, ScanError>
    where
        I: IntoIterator<Item = KeyCandidate>,
    {
        for candidate in candidates {
            if self.halt.is_cancelled() {
                return Ok(ScanOutcome::Interrupted);
            }
            self.counters.generated += 1;
            let index = self.counters.generated;

            match self.process(index, candidate).await {
                Ok(Some(record)) => {
                    self.halt.cancel();
                    return Ok(ScanOutcome::Funded(record));
                }
                Ok(None) => {}
                Err(e) if e.is_fatal() => {
                    self.halt.cancel();
                    return Err(e);
                }
                Err(e) => warn!("Candidate #{} skipped: {}", index, e),
            }

            if let Some(delay) = self.candidate_delay {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = self.halt.cancelled() => {}
                }
            }
        }
        Ok(ScanOutcome::Exhausted)
    }

    /// Handles one candidate. Returns the record when it is funded.
    async fn process(
        &mut self,
        index: u64,
        candidate: KeyCandidate,
    ) -> Result<Option<ScanRecord>, ScanError> {
        self.state = ScanState::Deriving;
        let (eth_address, tron_address) = match self.derive_both(&candidate) {
            Ok(addresses) => addresses,
            Err(e) => {
                self.counters.invalid += 1;
                warn!("Invalid key #{}: {} | {}", index, candidate, e);
                self.state = ScanState::Enumerating;
                return Ok(None);
            }
        };

        self.state = ScanState::Probing;
        let (eth_balance, tron_balance) = join(
            self.prober.probe(Chain::Ethereum, &eth_address),
            self.prober.probe(Chain::Tron, &tron_address),
        )
        .await;
        self.counters.probed += 1;

        let record = ScanRecord {
            key: candidate,
            eth_address,
            eth_balance,
            tron_address,
            tron_balance,
        };
        debug!(index, key = %record.key, "probed candidate");
        info!(
            "ETH → {} → {} ETH ----> TRON → {} → {} TRX",
            record.eth_address, record.eth_balance, record.tron_address, record.tron_balance
        );

        self.state = ScanState::Classifying;
        let verdict = self.classify(&record);
        self.state = ScanState::Enumerating;

        match verdict {
            Verdict::Funded => {
                if let Err(e) = self.sink.record_funded(&record) {
                    error!(key = %record.key, "Failed to persist funded wallet: {}", e);
                    return Err(e);
                }
                info!(
                    eth = %record.eth_address,
                    tron = %record.tron_address,
                    "FOUND FUNDED WALLET! Scan stopped."
                );
                Ok(Some(record))
            }
            Verdict::Target => {
                info!("Found target match: {} | {}", record.eth_address, record.tron_address);
                match self.sink.record_match(&record) {
                    Ok(()) => self.counters.matched += 1,
                    Err(e) => warn!("Failed to persist target match: {}", e),
                }
                Ok(None)
            }
            Verdict::Discard => Ok(None),
        }
    }

    fn derive_both(
        &self,
        candidate: &KeyCandidate,
    ) -> Result<(ChainAddress, ChainAddress), ScanError> {
        let eth = self.deriver.derive(Chain::Ethereum, candidate)?;
        let tron = self.deriver.derive(Chain::Tron, candidate)?;
        Ok((eth, tron))
    }

    fn classify(&self, record: &ScanRecord) -> Verdict {
        if record.is_funded() {
            Verdict::Funded
        } else if Chain::ALL
            .iter()
            .any(|c| self.targets.is_match(record.address(*c).as_str()))
        {
            Verdict::Target
        } else {
            Verdict::Discard
        }
    }
}
