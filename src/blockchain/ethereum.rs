use anyhow::Result;
use async_trait::async_trait;
use ethers::{
    prelude::JsonRpcClient,
    providers::{Http, Middleware, Provider},
    types::Address,
};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

use super::traits::BalanceClient;
use crate::core::errors::ScanError;

#[derive(Clone)]
pub struct EthereumClient<P: JsonRpcClient + Clone = Http> {
    provider: Provider<P>,
    network_name: String,
}

impl EthereumClient<Http> {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        // Clean RPC URL
        let rpc_url_clean = rpc_url.trim();
        let parsed_url = reqwest::Url::parse(rpc_url_clean).map_err(|e| {
            anyhow::anyhow!(
                "Invalid Ethereum RPC URL '{}': {}. Please check config.toml or env vars.",
                rpc_url_clean,
                e
            )
        })?;

        info!("Using Ethereum RPC endpoint: {}", parsed_url);
        // Build a reqwest client with a short timeout; allow proxy environment vars.
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if let Ok(proxy) = std::env::var("HTTPS_PROXY").or_else(|_| std::env::var("HTTP_PROXY")) {
            if let Ok(p) = reqwest::Proxy::all(proxy) {
                builder = builder.proxy(p);
            }
        }
        let client =
            builder.build().map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let provider = Provider::new(Http::new_with_client(parsed_url, client));

        Ok(Self { provider, network_name: "ethereum".to_string() })
    }
}

impl<P: JsonRpcClient + Clone> EthereumClient<P>
where
    P: Send + Sync,
{
    /// Creates a new EthereumClient with a given provider.
    /// This is useful for testing with a `MockProvider`.
    pub fn new_with_provider(provider: Provider<P>) -> EthereumClient<P> {
        EthereumClient { provider, network_name: "test".to_string() }
    }
}

#[async_trait]
impl<P> BalanceClient for EthereumClient<P>
where
    P: JsonRpcClient + Clone + 'static + Send + Sync,
{
    async fn get_balance(&self, address: &str) -> Result<f64, ScanError> {
        debug!("Getting ETH balance for address: {}", address);

        let address = Address::from_str(address)
            .map_err(|e| ScanError::AddressError(format!("Invalid Ethereum address: {}", e)))?;

        let balance = self
            .provider
            .get_balance(address, None)
            .await
            .map_err(|e| ScanError::NetworkError(format!("Failed to get balance: {}", e)))?;

        let balance_eth = ethers::utils::format_ether(balance);
        debug!("Balance: {} ETH", balance_eth);

        balance_eth.parse::<f64>().map_err(|e| {
            ScanError::BlockchainError(format!("Unparseable balance '{}': {}", balance_eth, e))
        })
    }

    fn get_network_name(&self) -> &str {
        &self.network_name
    }

    fn get_native_token(&self) -> &str {
        "ETH"
    }
}
