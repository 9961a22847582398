use clap::Parser;
use std::path::PathBuf;

use crate::core::config::ScannerConfig;

/// Dual chain (ETH + TRON) key scanner (library-facing definitions)
#[derive(Debug, Parser)]
#[command(name = "dual_chain_scanner", about = "Dual chain (ETH + TRON) key scanner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "CONFIG_PATH", default_value = "config.toml")]
    pub config: PathBuf,

    /// Ethereum JSON-RPC endpoint
    #[arg(long = "eth-rpc", env = "ETH_RPC_URL")]
    pub eth_rpc: Option<String>,

    /// TRON HTTP API endpoint
    #[arg(long = "tron-rpc", env = "TRON_RPC_URL")]
    pub tron_rpc: Option<String>,

    /// TronGrid API key
    #[arg(long = "tron-api-key", env = "TRON_PRO_API_KEY", hide_env_values = true)]
    pub tron_api_key: Option<String>,

    /// Newline-delimited watch-list
    #[arg(long)]
    pub targets: Option<PathBuf>,

    /// File funded wallets are appended to
    #[arg(long = "funded-out")]
    pub funded_out: Option<PathBuf>,

    /// File watch-list matches are appended to
    #[arg(long = "matches-out")]
    pub matches_out: Option<PathBuf>,

    /// Milliseconds to wait between candidates (0 disables)
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,

    /// Reuse a 59-hex-digit key prefix instead of drawing a random one
    #[arg(long)]
    pub prefix: Option<String>,
}

impl Cli {
    /// Applies command-line values on top of `config`.
    pub fn apply_to(&self, config: &mut ScannerConfig) {
        if let Some(url) = &self.eth_rpc {
            config.networks.eth.rpc_url = url.clone();
        }
        if let Some(url) = &self.tron_rpc {
            config.networks.tron.rpc_url = url.clone();
        }
        if let Some(key) = &self.tron_api_key {
            config.networks.tron.api_key = Some(key.clone());
        }
        if let Some(path) = &self.targets {
            config.output.targets_path = path.clone();
        }
        if let Some(path) = &self.funded_out {
            config.output.funded_path = path.clone();
        }
        if let Some(path) = &self.matches_out {
            config.output.matches_path = path.clone();
        }
        if let Some(ms) = self.delay_ms {
            config.candidate_delay_ms = ms;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = Some(prefix.clone());
        }
    }
}
