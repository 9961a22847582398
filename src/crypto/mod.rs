pub mod derive;

pub use derive::{AddressDeriver, Secp256k1Deriver};
