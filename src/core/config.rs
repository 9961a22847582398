use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::core::errors::ScanError;

/// Endpoint configuration for one chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    pub rpc_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "NetworkConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional provider key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
}

impl NetworkConfig {
    fn default_timeout_secs() -> u64 { 10 }

    fn with_url(rpc_url: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            timeout_secs: Self::default_timeout_secs(),
            api_key: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// RPC endpoints for both chains
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworksConfig {
    #[serde(default = "NetworksConfig::default_eth")]
    pub eth: NetworkConfig,
    #[serde(default = "NetworksConfig::default_tron")]
    pub tron: NetworkConfig,
}

impl NetworksConfig {
    fn default_eth() -> NetworkConfig { NetworkConfig::with_url("https://eth.llamarpc.com") }
    fn default_tron() -> NetworkConfig { NetworkConfig::with_url("https://api.trongrid.io") }
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self { eth: Self::default_eth(), tron: Self::default_tron() }
    }
}

/// TRON probe retry settings. Ethereum probes are always single-shot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    #[serde(default = "RetryConfig::default_tron_max_attempts")]
    pub tron_max_attempts: u32,

    /// Backoff unit; attempt `n` waits `n * base` before the next try
    #[serde(default = "RetryConfig::default_tron_base_delay_ms")]
    pub tron_base_delay_ms: u64,
}

impl RetryConfig {
    fn default_tron_max_attempts() -> u32 { 3 }
    fn default_tron_base_delay_ms() -> u64 { 1000 }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            tron_max_attempts: Self::default_tron_max_attempts(),
            tron_base_delay_ms: Self::default_tron_base_delay_ms(),
        }
    }
}

/// Input and result file locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_targets_path")]
    pub targets_path: PathBuf,
    #[serde(default = "OutputConfig::default_funded_path")]
    pub funded_path: PathBuf,
    #[serde(default = "OutputConfig::default_matches_path")]
    pub matches_path: PathBuf,
}

impl OutputConfig {
    fn default_targets_path() -> PathBuf { PathBuf::from("target_addresses.txt") }
    fn default_funded_path() -> PathBuf { PathBuf::from("funded_wallets.txt") }
    fn default_matches_path() -> PathBuf { PathBuf::from("target_matches.txt") }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            targets_path: Self::default_targets_path(),
            funded_path: Self::default_funded_path(),
            matches_path: Self::default_matches_path(),
        }
    }
}

/// Scanner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScannerConfig {
    #[serde(default)]
    pub networks: NetworksConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Pause between candidates; 0 disables the throttle
    #[serde(default)]
    pub candidate_delay_ms: u64,

    /// Fixed 59-digit key prefix; a random one is drawn when absent
    #[serde(default)]
    pub prefix: Option<String>,
}

impl ScannerConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ScanError> {
        let config: ScannerConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                info!("Loaded scanner config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file {} not found. Using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ScanError::ConfigError(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn candidate_delay(&self) -> Option<Duration> {
        (self.candidate_delay_ms > 0).then(|| Duration::from_millis(self.candidate_delay_ms))
    }

    pub fn tron_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry.tron_base_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        for (name, net) in [("eth", &self.networks.eth), ("tron", &self.networks.tron)] {
            if net.rpc_url.trim().is_empty() {
                return Err(ScanError::ConfigError(format!("networks.{}.rpc_url is empty", name)));
            }
            if net.timeout_secs == 0 {
                return Err(ScanError::ConfigError(format!(
                    "networks.{}.timeout_secs must be positive",
                    name
                )));
            }
        }
        if self.retry.tron_max_attempts == 0 {
            return Err(ScanError::ConfigError(
                "retry.tron_max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_public_endpoints() {
        let config = ScannerConfig::default();
        assert_eq!(config.networks.eth.rpc_url, "https://eth.llamarpc.com");
        assert_eq!(config.networks.tron.rpc_url, "https://api.trongrid.io");
        assert_eq!(config.retry.tron_max_attempts, 3);
        assert_eq!(config.tron_base_delay(), Duration::from_millis(1000));
        assert_eq!(config.candidate_delay(), None);
        assert_eq!(config.output.funded_path, PathBuf::from("funded_wallets.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = ScannerConfig::from_toml_str(
            r#"
            candidate_delay_ms = 500

            [networks.tron]
            rpc_url = "http://127.0.0.1:9090"
            api_key = "abc"

            [retry]
            tron_base_delay_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.candidate_delay(), Some(Duration::from_millis(500)));
        assert_eq!(config.networks.tron.rpc_url, "http://127.0.0.1:9090");
        assert_eq!(config.networks.tron.api_key.as_deref(), Some("abc"));
        assert_eq!(config.networks.tron.timeout_secs, 10);
        assert_eq!(config.networks.eth.rpc_url, "https://eth.llamarpc.com");
        assert_eq!(config.retry.tron_max_attempts, 3);
        assert_eq!(config.retry.tron_base_delay_ms, 10);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = ScannerConfig::from_toml_str("candidate_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ScanError::ConfigError(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScannerConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ScannerConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nfunded_path = \"hits.txt\"").unwrap();
        let config = ScannerConfig::load(file.path()).unwrap();
        assert_eq!(config.output.funded_path, PathBuf::from("hits.txt"));
        assert_eq!(config.output.matches_path, PathBuf::from("target_matches.txt"));
    }

    #[test]
    fn zero_attempts_rejected() {
        let mut config = ScannerConfig::default();
        config.retry.tron_max_attempts = 0;
        assert!(matches!(config.validate(), Err(ScanError::ConfigError(_))));
    }

    #[test]
    fn empty_url_rejected() {
        let mut config = ScannerConfig::default();
        config.networks.eth.rpc_url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
