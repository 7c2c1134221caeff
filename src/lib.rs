//! Solana Signing Core
//!
//! Decodes a serialized Solana message, explains it to the user as a
//! sequence of confirmation screens, and only after every screen is
//! approved signs the original bytes with the device key.
//!
//! # Architecture
//!
//! - **tx**: wire decoding (legacy and v0 messages, lookup tables)
//! - **instructions**: program registry, templates and the data decoder
//! - **security**: blind-signing and multisig policies
//! - **fees**: expected fee from compute-budget instructions
//! - **ui**: screens, value formatting, screen sequencing
//! - **signing**: confirmation state machine and the `sign_tx` entry point
//! - **wallet**: derivation paths and the Ed25519 keychain
//!
//! # Security
//!
//! Seeds and secret keys are held in `zeroize` wrappers and cleared on drop.
//! Unknown instructions are never an error: they force a blind-signing
//! warning and a raw-details view instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use sol_signer_core::{sign_tx, SignTxRequest, SigningSettings, Slip10Keychain};
//!
//! let keychain = Slip10Keychain::from_mnemonic(phrase, "")?;
//! let request = SignTxRequest { address_n, serialized_tx };
//! let signature = sign_tx(&request, &keychain, &mut ui, &SigningSettings::default())?;
//! ```

pub mod error;
pub mod types;
pub mod tx;
pub mod instructions;
pub mod security;
pub mod fees;
pub mod ui;
pub mod signing;
pub mod wallet;
pub mod utils;
pub mod serde_bytes;

// Re-export key types for convenience
pub use error::{ErrorCode, FailureCategory, SignerError, SignerResult};
pub use instructions::{Instruction, PropertyValue};
pub use signing::{sign_tx, SignTxRequest, SigningFlow, Step, TxSignature};
pub use tx::Transaction;
pub use types::{Account, Address, AddressReference, AddressType, Pubkey};
pub use ui::{ConfirmationUi, DisplayValue, PropertyItem, Screen, UserAction};
pub use utils::SigningSettings;
pub use wallet::{DerivationPath, Keychain, Keypair, Slip10Keychain};
