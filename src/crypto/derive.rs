//! Private key → chain address derivation.
//!
//! Both supported chains share the secp256k1 curve and the Ethereum-style account
//! hash `keccak256(uncompressed_pubkey[1..])[12..]`; they differ only in encoding.

use ethers::types::Address;
use ethers::utils::to_checksum;
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest as _, Sha256};
use sha3::Keccak256;

use crate::core::domain::{Chain, ChainAddress, KeyCandidate};
use crate::core::errors::ScanError;

/// Version byte of TRON mainnet addresses.
const TRON_ADDRESS_PREFIX: u8 = 0x41;

/// Maps a candidate key to its address on a given chain.
pub trait AddressDeriver: Send + Sync {
    /// Fails with `ScanError::InvalidKey` when `key` is not a usable scalar.
    fn derive(&self, chain: Chain, key: &KeyCandidate) -> Result<ChainAddress, ScanError>;
}

/// secp256k1-backed deriver for Ethereum and TRON.
pub struct Secp256k1Deriver {
    secp: Secp256k1<All>,
}

impl Secp256k1Deriver {
    pub fn new() -> Self {
        Self { secp: Secp256k1::new() }
    }

    fn account_hash(&self, key: &KeyCandidate) -> Result<[u8; 20], ScanError> {
        let bytes = key.to_bytes().map_err(|e| ScanError::InvalidKey(e.to_string()))?;
        let secret_key =
            SecretKey::from_slice(&bytes).map_err(|e| ScanError::InvalidKey(e.to_string()))?;
        let public_key = PublicKey::from_secret_key(&self.secp, &secret_key);

        let pub_bytes = public_key.serialize_uncompressed();
        let hash = Keccak256::digest(&pub_bytes[1..]);
        let mut account = [0u8; 20];
        account.copy_from_slice(&hash[12..]);
        Ok(account)
    }
}

impl Default for Secp256k1Deriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressDeriver for Secp256k1Deriver {
    fn derive(&self, chain: Chain, key: &KeyCandidate) -> Result<ChainAddress, ScanError> {
        let account = self.account_hash(key)?;
        let address = match chain {
            Chain::Ethereum => ethereum_address(&account),
            Chain::Tron => tron_address(&account),
        };
        Ok(ChainAddress::new(address))
    }
}

/// EIP-55 checksummed `0x` address.
pub fn ethereum_address(account: &[u8; 20]) -> String {
    to_checksum(&Address::from_slice(account), None)
}

/// Base58check over `0x41 || account`.
pub fn tron_address(account: &[u8; 20]) -> String {
    let mut data = Vec::with_capacity(25);
    data.push(TRON_ADDRESS_PREFIX);
    data.extend_from_slice(account);

    let checksum = Sha256::digest(&Sha256::digest(&data));
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}
