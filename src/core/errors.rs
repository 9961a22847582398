use std::fmt;

/// Custom error type for scanner operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanError {
    /// Configuration-related errors.
    ConfigError(String),
    /// Candidate is not a usable secp256k1 private key.
    InvalidKey(String),
    /// Address parsing/encoding errors.
    AddressError(String),
    /// Transport-level failures talking to an RPC endpoint.
    NetworkError(String),
    /// The endpoint answered, but with an error or an unusable payload.
    BlockchainError(String),
    /// Request exceeded its deadline.
    TimeoutError(String),
    /// A result record could not be durably appended.
    SinkWriteError(String),
    /// IO errors outside of the result sink.
    IoError(String),
    /// Generic errors.
    Other(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ScanError::InvalidKey(msg) => write!(f, "Invalid private key: {}", msg),
            ScanError::AddressError(msg) => write!(f, "Address error: {}", msg),
            ScanError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ScanError::BlockchainError(msg) => write!(f, "Blockchain error: {}", msg),
            ScanError::TimeoutError(msg) => write!(f, "Timeout error: {}", msg),
            ScanError::SinkWriteError(msg) => write!(f, "Result write failed: {}", msg),
            ScanError::IoError(msg) => write!(f, "IO error: {}", msg),
            ScanError::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ScanError {}

impl ScanError {
    /// Failures that must stop the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::SinkWriteError(_) | ScanError::ConfigError(_))
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ScanError {
    fn from(err: toml::de::Error) -> Self {
        ScanError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScanError::TimeoutError(err.to_string())
        } else if err.is_decode() {
            ScanError::BlockchainError(err.to_string())
        } else {
            ScanError::NetworkError(err.to_string())
        }
    }
}
