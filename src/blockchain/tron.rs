//! TRON balance lookups over the TronGrid-compatible HTTP API.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::traits::BalanceClient;
use crate::core::errors::ScanError;

/// 1 TRX = 10^6 SUN
pub const SUN_PER_TRX: f64 = 1_000_000.0;

const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

#[derive(Debug, Serialize)]
struct GetAccountRequest<'a> {
    address: &'a str,
    /// Addresses are sent and returned in base58 form.
    visible: bool,
}

/// `/wallet/getaccount` answers `{}` for accounts it has never seen.
#[derive(Debug, Deserialize)]
struct GetAccountResponse {
    #[serde(default)]
    balance: u64,
    #[serde(rename = "Error")]
    error: Option<String>,
}

pub struct TronClient {
    base_url: String,
    http_client: HttpClient,
    api_key: Option<String>,
}

impl TronClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ScanError> {
        let base_url = base_url.trim();
        let parsed = reqwest::Url::parse(base_url).map_err(|e| {
            ScanError::ConfigError(format!("Invalid TRON API URL '{}': {}", base_url, e))
        })?;
        info!("Using TRON API endpoint: {}", parsed);

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http_client,
            api_key: None,
        })
    }

    /// Sends the key as `TRON-PRO-API-KEY` on every request.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    async fn get_account(&self, address: &str) -> Result<GetAccountResponse, ScanError> {
        let url = format!("{}/wallet/getaccount", self.base_url);
        let mut req =
            self.http_client.post(&url).json(&GetAccountRequest { address, visible: true });
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScanError::NetworkError(format!(
                "TRON API returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let account: GetAccountResponse = response.json().await?;
        if let Some(error) = account.error {
            return Err(ScanError::BlockchainError(error));
        }
        Ok(account)
    }
}

#[async_trait]
impl BalanceClient for TronClient {
    async fn get_balance(&self, address: &str) -> Result<f64, ScanError> {
        debug!("Getting TRX balance for address: {}", address);
        let account = self.get_account(address).await?;
        let balance_trx = account.balance as f64 / SUN_PER_TRX;
        debug!("Balance: {} TRX", balance_trx);
        Ok(balance_trx)
    }

    fn get_network_name(&self) -> &str {
        "tron"
    }

    fn get_native_token(&self) -> &str {
        "TRX"
    }
}
