pub mod ethereum;
pub mod traits;
pub mod tron;

pub use ethereum::EthereumClient;
pub use traits::BalanceClient;
pub use tron::TronClient;
