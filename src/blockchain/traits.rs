use async_trait::async_trait;

use crate::core::errors::ScanError;

/// Read-only balance lookup against one chain's RPC endpoint.
#[async_trait]
pub trait BalanceClient: Send + Sync {
    /// Retrieves the balance of `address` in the chain's native unit.
    async fn get_balance(&self, address: &str) -> Result<f64, ScanError>;

    /// Returns the name of the network (e.g., "ethereum", "tron").
    fn get_network_name(&self) -> &str;

    /// Returns the symbol of the native token (e.g., "ETH", "TRX").
    fn get_native_token(&self) -> &str;
}
