// src/prober/mod.rs
//! Balance probing with per-chain retry policies.
//!
//! A probe never fails: transport and RPC errors are folded into
//! `BalanceResult::Error` once the chain's attempts are used up.

use std::time::Duration;
use tracing::{debug, warn};

use crate::blockchain::traits::BalanceClient;
use crate::core::domain::{BalanceResult, Chain, ChainAddress};

/// How many times to ask an endpoint and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Attempt `n` failing waits `n * base_delay` before attempt `n + 1`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// One attempt, errors surface immediately.
    pub fn single_attempt() -> Self {
        Self { max_attempts: 1, base_delay: Duration::ZERO }
    }

    pub fn linear(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), base_delay }
    }

    /// Wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::linear(3, Duration::from_millis(1000))
    }
}

struct ChainProbe {
    client: Box<dyn BalanceClient>,
    policy: RetryPolicy,
}

/// Balance lookups for both chains.
pub struct BalanceProber {
    ethereum: ChainProbe,
    tron: ChainProbe,
}

impl BalanceProber {
    /// Ethereum is probed once; TRON follows `tron_policy`.
    pub fn new(
        ethereum: Box<dyn BalanceClient>,
        tron: Box<dyn BalanceClient>,
        tron_policy: RetryPolicy,
    ) -> Self {
        Self {
            ethereum: ChainProbe { client: ethereum, policy: RetryPolicy::single_attempt() },
            tron: ChainProbe { client: tron, policy: tron_policy },
        }
    }

    fn probe_for(&self, chain: Chain) -> &ChainProbe {
        match chain {
            Chain::Ethereum => &self.ethereum,
            Chain::Tron => &self.tron,
        }
    }

    /// Queries `address` on `chain`, retrying any failure as the chain's policy allows.
    pub async fn probe(&self, chain: Chain, address: &ChainAddress) -> BalanceResult {
        let ChainProbe { client, policy } = self.probe_for(chain);
        let max_attempts = policy.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            match client.get_balance(address.as_str()).await {
                Ok(amount) => {
                    debug!(
                        network = client.get_network_name(),
                        address = %address,
                        attempt,
                        amount,
                        "balance probed"
                    );
                    return BalanceResult::Amount(amount);
                }
                Err(e) => {
                    warn!(
                        %chain,
                        network = client.get_network_name(),
                        address = %address,
                        "{} balance check failed (attempt {}/{}): {}",
                        client.get_native_token(),
                        attempt,
                        max_attempts,
                        e
                    );
                    if attempt >= max_attempts {
                        return BalanceResult::Error(e.to_string());
                    }
                    tokio::time::sleep(policy.delay_after(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ScanError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use test_case::test_case;
    use tokio::time::Instant;

    /// Replays scripted results and records when each call happened.
    #[derive(Clone, Default)]
    struct ScriptedClient {
        script: Arc<Mutex<VecDeque<Result<f64, ScanError>>>>,
        calls: Arc<Mutex<Vec<Instant>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<f64, ScanError>>) -> Self {
            Self { script: Arc::new(Mutex::new(script.into())), ..Default::default() }
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BalanceClient for ScriptedClient {
        async fn get_balance(&self, _address: &str) -> Result<f64, ScanError> {
            self.calls.lock().unwrap().push(Instant::now());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ScanError::NetworkError("script exhausted".into())))
        }

        fn get_network_name(&self) -> &str {
            "scripted"
        }

        fn get_native_token(&self) -> &str {
            "TST"
        }
    }

    fn net_err(msg: &str) -> Result<f64, ScanError> {
        Err(ScanError::NetworkError(msg.to_string()))
    }

    fn address() -> ChainAddress {
        ChainAddress::new("TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC")
    }

    fn prober(eth: &ScriptedClient, tron: &ScriptedClient, base: Duration) -> BalanceProber {
        BalanceProber::new(
            Box::new(eth.clone()),
            Box::new(tron.clone()),
            RetryPolicy::linear(3, base),
        )
    }

    #[test]
    fn linear_delays_grow_with_attempt() {
        let policy = RetryPolicy::linear(3, Duration::from_millis(1000));
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
        assert_eq!(RetryPolicy::linear(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tron_recovers_after_two_failures() {
        let eth = ScriptedClient::default();
        let tron = ScriptedClient::new(vec![net_err("reset"), net_err("reset"), Ok(5.0)]);
        let base = Duration::from_millis(1000);

        let result = prober(&eth, &tron, base).probe(Chain::Tron, &address()).await;

        assert_eq!(result, BalanceResult::Amount(5.0));
        let times = tron.call_times();
        assert_eq!(times.len(), 3);
        assert_eq!(times[1] - times[0], base);
        assert_eq!(times[2] - times[1], base * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tron_surfaces_last_error_after_exhaustion() {
        let eth = ScriptedClient::default();
        let tron =
            ScriptedClient::new(vec![net_err("first"), net_err("second"), net_err("third")]);

        let result =
            prober(&eth, &tron, Duration::from_millis(10)).probe(Chain::Tron, &address()).await;

        assert_eq!(result, BalanceResult::Error("Network error: third".to_string()));
        assert_eq!(tron.call_times().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn ethereum_does_not_retry() {
        let eth = ScriptedClient::new(vec![net_err("down"), Ok(1.0)]);
        let tron = ScriptedClient::default();

        let result = prober(&eth, &tron, Duration::from_millis(10))
            .probe(Chain::Ethereum, &ChainAddress::new("0xabc"))
            .await;

        assert_eq!(result, BalanceResult::Error("Network error: down".to_string()));
        assert_eq!(eth.call_times().len(), 1);
    }

    #[test_case(ScanError::Other("transient rpc glitch".into()) ; "other")]
    #[test_case(ScanError::AddressError("bad checksum".into()) ; "address")]
    #[test_case(ScanError::BlockchainError("account lookup failed".into()) ; "node")]
    #[test_case(ScanError::TimeoutError("10s".into()) ; "timeout")]
    #[test_case(ScanError::ConfigError("bad header".into()) ; "config")]
    #[tokio::test(start_paused = true)]
    async fn tron_retries_every_error_class(first: ScanError) {
        let eth = ScriptedClient::default();
        let tron = ScriptedClient::new(vec![Err(first), Ok(5.0)]);

        let result =
            prober(&eth, &tron, Duration::from_millis(1)).probe(Chain::Tron, &address()).await;

        assert_eq!(result, BalanceResult::Amount(5.0));
        assert_eq!(tron.call_times().len(), 2);
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let eth = ScriptedClient::new(vec![Ok(0.0)]);
        let tron = ScriptedClient::default();

        let result = prober(&eth, &tron, Duration::from_millis(1))
            .probe(Chain::Ethereum, &ChainAddress::new("0xabc"))
            .await;

        assert_eq!(result, BalanceResult::Amount(0.0));
        assert_eq!(eth.call_times().len(), 1);
    }
}
