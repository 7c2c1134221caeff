//! Transaction Builder
//!
//! Serializes messages in the same wire format the decoder reads. Used by
//! the CLI demo mode, fixtures and tests. It does not validate; callers can
//! build inconsistent messages on purpose.

use crate::types::Pubkey;

/// Instruction with account positions already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_index: u8,
    pub accounts: Vec<u8>,
    /// Full data, discriminant included
    pub data: Vec<u8>,
}

/// Address lookup table entry for versioned messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLookupTable {
    pub account_key: Pubkey,
    pub writable_indexes: Vec<u8>,
    pub readonly_indexes: Vec<u8>,
}

/// Message builder
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    version: Option<u8>,
    num_required_signatures: u8,
    num_readonly_signed_accounts: u8,
    num_readonly_unsigned_accounts: u8,
    addresses: Vec<Pubkey>,
    blockhash: [u8; 32],
    instructions: Vec<CompiledInstruction>,
    lookup_tables: Vec<AddressLookupTable>,
}

impl MessageBuilder {
    /// Legacy message (no version prefix)
    pub fn legacy(required: u8, readonly_signed: u8, readonly_unsigned: u8) -> Self {
        Self {
            num_required_signatures: required,
            num_readonly_signed_accounts: readonly_signed,
            num_readonly_unsigned_accounts: readonly_unsigned,
            ..Self::default()
        }
    }

    /// Versioned v0 message
    pub fn v0(required: u8, readonly_signed: u8, readonly_unsigned: u8) -> Self {
        Self {
            version: Some(0),
            ..Self::legacy(required, readonly_signed, readonly_unsigned)
        }
    }

    /// Append an address and return its index
    pub fn address(&mut self, pubkey: Pubkey) -> u8 {
        self.addresses.push(pubkey);
        (self.addresses.len() - 1) as u8
    }

    pub fn with_address(mut self, pubkey: Pubkey) -> Self {
        self.address(pubkey);
        self
    }

    pub fn with_blockhash(mut self, blockhash: [u8; 32]) -> Self {
        self.blockhash = blockhash;
        self
    }

    pub fn with_instruction(mut self, program_index: u8, accounts: Vec<u8>, data: Vec<u8>) -> Self {
        self.instructions.push(CompiledInstruction {
            program_index,
            accounts,
            data,
        });
        self
    }

    pub fn with_lookup_table(
        mut self,
        account_key: Pubkey,
        writable_indexes: Vec<u8>,
        readonly_indexes: Vec<u8>,
    ) -> Self {
        self.lookup_tables.push(AddressLookupTable {
            account_key,
            writable_indexes,
            readonly_indexes,
        });
        self
    }

    /// Serialize the message
    pub fn build(&self) -> Vec<u8> {
        let mut message = Vec::new();

        // Version prefix (0x80 | version)
        if let Some(version) = self.version {
            message.push(0x80 | version);
        }

        // Message header (3 bytes)
        message.push(self.num_required_signatures);
        message.push(self.num_readonly_signed_accounts);
        message.push(self.num_readonly_unsigned_accounts);

        write_varint(self.addresses.len() as u32, &mut message);
        for address in &self.addresses {
            message.extend_from_slice(address);
        }

        message.extend_from_slice(&self.blockhash);

        write_varint(self.instructions.len() as u32, &mut message);
        for ix in &self.instructions {
            message.push(ix.program_index);
            write_compact_bytes(&ix.accounts, &mut message);
            write_compact_bytes(&ix.data, &mut message);
        }

        if self.version.is_some() {
            write_varint(self.lookup_tables.len() as u32, &mut message);
            for table in &self.lookup_tables {
                message.extend_from_slice(&table.account_key);
                write_compact_bytes(&table.writable_indexes, &mut message);
                write_compact_bytes(&table.readonly_indexes, &mut message);
            }
        }

        message
    }
}

/// Write an unsigned LEB128 varint
pub fn write_varint(mut value: u32, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

fn write_compact_bytes(bytes: &[u8], buf: &mut Vec<u8>) {
    write_varint(bytes.len() as u32, buf);
    buf.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let mut buf = Vec::new();

        write_varint(0, &mut buf);
        assert_eq!(buf, vec![0]);

        buf.clear();
        write_varint(127, &mut buf);
        assert_eq!(buf, vec![127]);

        buf.clear();
        write_varint(128, &mut buf);
        assert_eq!(buf, vec![0x80, 0x01]);

        buf.clear();
        write_varint(16383, &mut buf);
        assert_eq!(buf, vec![0xff, 0x7f]);

        buf.clear();
        write_varint(16384, &mut buf);
        assert_eq!(buf, vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_legacy_layout() {
        let bytes = MessageBuilder::legacy(1, 0, 1)
            .with_address([1u8; 32])
            .with_address([0u8; 32])
            .with_blockhash([0xab; 32])
            .with_instruction(1, vec![0], vec![9, 9])
            .build();

        assert_eq!(&bytes[..4], &[1, 0, 1, 2]);
        assert_eq!(bytes.len(), 4 + 64 + 32 + 1 + 1 + 2 + 3);
        assert_eq!(&bytes[bytes.len() - 7..], &[1, 1, 1, 0, 2, 9, 9]);
    }

    #[test]
    fn test_v0_has_prefix_and_table_section() {
        let bytes = MessageBuilder::v0(1, 0, 0)
            .with_address([1u8; 32])
            .with_lookup_table([4u8; 32], vec![0, 1], vec![2])
            .build();

        assert_eq!(bytes[0], 0x80);
        // signer key, zero blockhash, no instructions, one table
        let tail = &bytes[bytes.len() - 38..];
        assert_eq!(tail[0], 1);
        assert_eq!(&tail[1..33], &[4u8; 32]);
        assert_eq!(&tail[33..], &[2, 0, 1, 1, 2]);
    }
}
