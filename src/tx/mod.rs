//! Transaction Module
//!
//! Decodes a serialized message into an immutable `Transaction`. Decoding is
//! all-or-nothing: any violation of the wire format, including trailing
//! bytes, rejects the whole buffer.

pub mod accounts;
pub mod builder;
pub mod parser;
pub mod reader;

pub use accounts::combined_accounts;
pub use builder::MessageBuilder;

use crate::error::{SignerError, SignerResult};
use crate::instructions::registry::instruction_id_format;
use crate::instructions::Instruction;
use crate::security::tx_policy;
use crate::types::{Account, Address, AddressReference, RawInstruction};
use crate::{log_debug, log_warn};
use reader::ByteReader;

/// A fully decoded transaction message
#[derive(Debug, Clone)]
pub struct Transaction {
    version: Option<u8>,
    required_signers_count: u8,
    addresses: Vec<Address>,
    blockhash: [u8; 32],
    raw_instructions: Vec<RawInstruction>,
    instructions: Vec<Instruction>,
    lookup_writable_addresses: Vec<AddressReference>,
    lookup_readonly_addresses: Vec<AddressReference>,
    blind_signing: bool,
}

impl Transaction {
    /// Decode a serialized message
    pub fn decode(serialized: &[u8]) -> SignerResult<Self> {
        let mut reader = ByteReader::new(serialized);

        let header = parser::parse_header(&mut reader)?;
        let addresses = parser::parse_addresses(&mut reader, &header)?;
        let blockhash = parser::parse_block_hash(&mut reader)?;
        let raw_instructions =
            parser::parse_instructions(&mut reader, &addresses, instruction_id_format)?;

        let (lookup_writable_addresses, lookup_readonly_addresses) = if header.version.is_some() {
            parser::parse_address_lookup_tables(&mut reader)?
        } else {
            (Vec::new(), Vec::new())
        };

        if !reader.is_empty() {
            return Err(SignerError::malformed("Invalid transaction").with_details(format!(
                "{} trailing bytes at offset {}",
                reader.remaining(),
                reader.offset()
            )));
        }

        let combined = combined_accounts(
            &addresses,
            &lookup_writable_addresses,
            &lookup_readonly_addresses,
        );
        let instructions = raw_instructions
            .iter()
            .enumerate()
            .map(|(position, raw)| Instruction::resolve(position, raw, &addresses, &combined))
            .collect::<SignerResult<Vec<_>>>()?;

        let blind_signing = tx_policy::blind_signing(&instructions);

        log_debug!(
            "tx",
            "decoded transaction",
            version = format!("{:?}", header.version),
            signers = header.num_required_signatures,
            accounts = addresses.len(),
            instructions = instructions.len(),
            lookups = lookup_writable_addresses.len() + lookup_readonly_addresses.len()
        );
        if blind_signing {
            log_warn!("tx", "transaction contains unsupported instructions");
        }

        Ok(Self {
            version: header.version,
            required_signers_count: header.num_required_signatures,
            addresses,
            blockhash,
            raw_instructions,
            instructions,
            lookup_writable_addresses,
            lookup_readonly_addresses,
            blind_signing,
        })
    }

    /// `None` for legacy messages
    pub fn version(&self) -> Option<u8> {
        self.version
    }

    pub fn is_legacy(&self) -> bool {
        self.version.is_none()
    }

    pub fn required_signers_count(&self) -> u8 {
        self.required_signers_count
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn blockhash(&self) -> &[u8; 32] {
        &self.blockhash
    }

    pub fn raw_instructions(&self) -> &[RawInstruction] {
        &self.raw_instructions
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn lookup_writable_addresses(&self) -> &[AddressReference] {
        &self.lookup_writable_addresses
    }

    pub fn lookup_readonly_addresses(&self) -> &[AddressReference] {
        &self.lookup_readonly_addresses
    }

    /// Inline addresses followed by lookup references
    pub fn combined_accounts(&self) -> Vec<Account> {
        combined_accounts(
            &self.addresses,
            &self.lookup_writable_addresses,
            &self.lookup_readonly_addresses,
        )
    }

    /// True when any instruction could not be fully interpreted
    pub fn blind_signing(&self) -> bool {
        self.blind_signing
    }
}
