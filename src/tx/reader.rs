//! Byte Reader
//!
//! Bounds-checked cursor over an immutable transaction buffer. Every read
//! either succeeds completely or returns a `ReadError`; nothing here can
//! index out of bounds.

use crate::error::SignerError;
use crate::types::Pubkey;

/// Maximum number of 7-bit groups in a varint (enough for `u32::MAX`)
const MAX_VARINT_GROUPS: usize = 5;

/// Errors raised while reading the buffer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("Unexpected end of buffer at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Truncated varint at offset {0}")]
    TruncatedVarint(usize),

    #[error("Varint overflow at offset {0}")]
    VarintOverflow(usize),

    #[error("Invalid UTF-8 at offset {0}")]
    InvalidUtf8(usize),

    #[error("Length {length} at offset {offset} does not fit in memory")]
    LengthOverflow { offset: usize, length: u64 },
}

impl From<ReadError> for SignerError {
    fn from(e: ReadError) -> Self {
        SignerError::malformed("Invalid transaction").with_details(e.to_string())
    }
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Cursor over a byte buffer
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current position in the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not consumed yet
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Consume exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ReadError::UnexpectedEnd {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..self.offset])
    }

    /// Consume everything that is left
    pub fn read_rest(&mut self) -> &'a [u8] {
        let start = self.offset;
        self.offset = self.data.len();
        &self.data[start..]
    }

    pub fn read_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_pubkey(&mut self) -> ReadResult<Pubkey> {
        self.read_array::<32>()
    }

    pub fn read_u8(&mut self) -> ReadResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u32_le(&mut self) -> ReadResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_u64_le(&mut self) -> ReadResult<u64> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    pub fn read_i32_le(&mut self) -> ReadResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_i64_le(&mut self) -> ReadResult<i64> {
        Ok(i64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Little-endian unsigned integer spanning `len` bytes (`len <= 4`)
    pub fn read_uint_le(&mut self, len: usize) -> ReadResult<u32> {
        debug_assert!(len <= 4);
        let bytes = self.read_bytes(len)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)))
    }

    /// Unsigned LEB128 varint
    ///
    /// A buffer that ends before the terminating group is a hard error.
    pub fn read_varint(&mut self) -> ReadResult<u32> {
        let start = self.offset;
        let mut value: u64 = 0;

        for group in 0..MAX_VARINT_GROUPS {
            let byte = match self.peek() {
                Some(byte) => byte,
                None => return Err(ReadError::TruncatedVarint(start)),
            };
            self.offset += 1;

            value |= u64::from(byte & 0x7f) << (7 * group);
            if byte & 0x80 == 0 {
                return u32::try_from(value).map_err(|_| ReadError::VarintOverflow(start));
            }
        }

        Err(ReadError::VarintOverflow(start))
    }

    /// Varint used as a length, checked against the remaining bytes
    pub fn read_length(&mut self) -> ReadResult<usize> {
        let offset = self.offset;
        let length = self.read_varint()? as usize;
        if length > self.remaining() {
            return Err(ReadError::UnexpectedEnd {
                offset,
                needed: length,
                remaining: self.remaining(),
            });
        }
        Ok(length)
    }

    /// Compact-array of single bytes
    pub fn read_compact_bytes(&mut self) -> ReadResult<&'a [u8]> {
        let length = self.read_length()?;
        self.read_bytes(length)
    }

    /// UTF-8 string with a `u64` little-endian length prefix
    pub fn read_string(&mut self) -> ReadResult<String> {
        let offset = self.offset;
        let length = self.read_u64_le()?;
        let length = usize::try_from(length)
            .map_err(|_| ReadError::LengthOverflow { offset, length })?;
        let bytes = self.read_bytes(length)?;
        utf8(bytes, offset)
    }

    /// UTF-8 text taking the rest of the buffer
    pub fn read_utf8_rest(&mut self) -> ReadResult<String> {
        let offset = self.offset;
        let bytes = self.read_rest();
        utf8(bytes, offset)
    }
}

fn utf8(bytes: &[u8], offset: usize) -> ReadResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| ReadError::InvalidUtf8(offset))
}
