//! Wire Decoder sections
//!
//! Each function consumes one section of the serialized message. The
//! positional address classification and the instruction id split happen
//! here; program-specific interpretation does not.

use super::reader::ByteReader;
use crate::error::{SignerError, SignerResult};
use crate::instructions::registry::InstructionIdFormat;
use crate::types::*;

/// High bit of the first byte marks a versioned message
const VERSION_PREFIX_MASK: u8 = 0x80;

/// Only v0 messages are understood
const SUPPORTED_VERSION: u8 = 0;

/// Message header, including the optional version prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub version: Option<u8>,
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

pub fn parse_header(reader: &mut ByteReader<'_>) -> SignerResult<MessageHeader> {
    let first = reader.read_u8()?;

    let (version, num_required_signatures) = if first & VERSION_PREFIX_MASK != 0 {
        let version = first & !VERSION_PREFIX_MASK;
        if version != SUPPORTED_VERSION {
            return Err(SignerError::malformed("Unsupported transaction version")
                .with_details(format!("version {}", version)));
        }
        (Some(version), reader.read_u8()?)
    } else {
        (None, first)
    };

    Ok(MessageHeader {
        version,
        num_required_signatures,
        num_readonly_signed_accounts: reader.read_u8()?,
        num_readonly_unsigned_accounts: reader.read_u8()?,
    })
}

/// Read the inline address table and classify each key by position
pub fn parse_addresses(
    reader: &mut ByteReader<'_>,
    header: &MessageHeader,
) -> SignerResult<Vec<Address>> {
    let count = reader.read_varint()? as usize;

    let required = header.num_required_signatures as usize;
    let readonly_signed = header.num_readonly_signed_accounts as usize;
    let readonly_unsigned = header.num_readonly_unsigned_accounts as usize;

    if required == 0 || readonly_signed > required || required + readonly_unsigned > count {
        return Err(SignerError::malformed("Invalid transaction header").with_details(format!(
            "{} signers, {} read-only signers, {} read-only accounts, {} addresses",
            required, readonly_signed, readonly_unsigned, count
        )));
    }

    let mut addresses = Vec::with_capacity(count.min(reader.remaining() / 32));
    for i in 0..count {
        let pubkey = reader.read_pubkey()?;
        let address_type = if i < required - readonly_signed {
            AddressType::Signer
        } else if i < required {
            AddressType::SignerReadOnly
        } else if i < count - readonly_unsigned {
            AddressType::Writable
        } else {
            AddressType::ReadOnly
        };
        addresses.push(Address::new(pubkey, address_type));
    }

    Ok(addresses)
}

pub fn parse_block_hash(reader: &mut ByteReader<'_>) -> SignerResult<[u8; 32]> {
    Ok(reader.read_array::<32>()?)
}

/// Read the instruction list
///
/// `id_format` tells how many discriminant bytes lead each program's data.
pub fn parse_instructions<F>(
    reader: &mut ByteReader<'_>,
    addresses: &[Address],
    id_format: F,
) -> SignerResult<Vec<RawInstruction>>
where
    F: Fn(&str) -> InstructionIdFormat,
{
    let count = reader.read_varint()? as usize;
    let mut instructions = Vec::with_capacity(count.min(reader.remaining()));

    for position in 0..count {
        let program_index = reader.read_u8()?;
        let program = addresses.get(program_index as usize).ok_or_else(|| {
            SignerError::malformed("Invalid program index")
                .with_details(format!("instruction {}: index {}", position, program_index))
        })?;

        let account_indices = reader.read_compact_bytes()?.to_vec();
        let data = reader.read_compact_bytes()?;

        let format = id_format(&to_base58(&program.pubkey));
        let mut data_reader = ByteReader::new(data);
        let instruction_id = if data.is_empty() && !format.is_included_if_zero {
            0
        } else {
            data_reader.read_uint_le(format.length)?
        };

        instructions.push(RawInstruction {
            program_index,
            instruction_id,
            account_indices,
            data: data_reader.read_rest().to_vec(),
        });
    }

    Ok(instructions)
}

/// Read the address lookup table section of a versioned message
///
/// Returns (writable references, read-only references), each in table order.
pub fn parse_address_lookup_tables(
    reader: &mut ByteReader<'_>,
) -> SignerResult<(Vec<AddressReference>, Vec<AddressReference>)> {
    let count = reader.read_varint()? as usize;

    let mut writable = Vec::new();
    let mut readonly = Vec::new();

    for _ in 0..count {
        let table = reader.read_pubkey()?;

        for &index in reader.read_compact_bytes()? {
            writable.push(AddressReference {
                table,
                index,
                address_type: AddressType::Writable,
            });
        }
        for &index in reader.read_compact_bytes()? {
            readonly.push(AddressReference {
                table,
                index,
                address_type: AddressType::ReadOnly,
            });
        }
    }

    Ok((writable, readonly))
}
