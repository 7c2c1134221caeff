//! Shared types for the signing core
//!
//! Addresses, lookup-table references and position-only raw instructions.
//! Every value here is built from one inbound buffer and dropped with it.

use serde::{Deserialize, Serialize};

/// Ed25519 public key (32 bytes)
pub type Pubkey = [u8; 32];

/// Encode a public key (or blockhash) as base58 text
pub fn to_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base58 text into a 32-byte key
pub fn pubkey_from_base58(text: &str) -> Option<Pubkey> {
    let bytes = bs58::decode(text).into_vec().ok()?;
    bytes.try_into().ok()
}

// =============================================================================
// Addresses
// =============================================================================

/// Signer / writable classification of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    /// Writable signer
    Signer,
    /// Read-only signer
    SignerReadOnly,
    /// Read-only, not a signer
    ReadOnly,
    /// Writable, not a signer
    Writable,
}

impl AddressType {
    pub fn is_signer(self) -> bool {
        matches!(self, AddressType::Signer | AddressType::SignerReadOnly)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, AddressType::Signer | AddressType::Writable)
    }

    /// Annotation shown next to raw accounts
    pub fn annotation(self) -> &'static str {
        match self {
            AddressType::Signer => "(Writable, Signer)",
            AddressType::SignerReadOnly => "(Signer)",
            AddressType::ReadOnly => "",
            AddressType::Writable => "(Writable)",
        }
    }
}

/// An inline account key with its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub pubkey: Pubkey,
    pub address_type: AddressType,
}

impl Address {
    pub fn new(pubkey: Pubkey, address_type: AddressType) -> Self {
        Self { pubkey, address_type }
    }
}

/// A pointer into an externally supplied address lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressReference {
    /// Lookup table account address
    pub table: Pubkey,
    /// Index within the table
    pub index: u8,
    /// `Writable` for writable lookups, `ReadOnly` otherwise
    pub address_type: AddressType,
}

/// Any account an instruction can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Account {
    Inline(Address),
    Lookup(AddressReference),
}

impl Account {
    /// Key of an inline account; lookup references are not resolvable offline
    pub fn pubkey(&self) -> Option<&Pubkey> {
        match self {
            Account::Inline(address) => Some(&address.pubkey),
            Account::Lookup(_) => None,
        }
    }

    pub fn address_type(&self) -> AddressType {
        match self {
            Account::Inline(address) => address.address_type,
            Account::Lookup(reference) => reference.address_type,
        }
    }

    /// True when this is an inline account holding `key`
    pub fn is_key(&self, key: &Pubkey) -> bool {
        self.pubkey() == Some(key)
    }
}

// =============================================================================
// Raw instructions
// =============================================================================

/// Position-only instruction as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstruction {
    /// Index into the inline address table
    pub program_index: u8,
    /// Discriminant read from the head of the data
    pub instruction_id: u32,
    /// Indices into the combined account list
    pub account_indices: Vec<u8>,
    /// Instruction data following the discriminant
    pub data: Vec<u8>,
}
