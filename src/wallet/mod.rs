//! Wallet Module
//!
//! Derivation paths and the keychain capability used to sign.

pub mod derivation_path;
pub mod keychain;

pub use derivation_path::{address_n_to_str, DerivationPath, HARDENED};
pub use keychain::{Keychain, Keypair, Slip10Keychain};
