//! Instruction templates
//!
//! Declarative, static descriptions of how an instruction's data and
//! accounts are laid out and which of them are shown to the user.

use super::PropertyValue;
use crate::error::{SignerError, SignerResult};
use crate::tx::reader::{ByteReader, ReadResult};

/// Closed enumeration carried in instruction data
#[derive(Debug)]
pub struct EnumSpec {
    pub name: &'static str,
    /// Encoded width in bytes (1 or 4, little-endian)
    pub width: usize,
    pub variants: &'static [(u32, &'static str)],
}

impl EnumSpec {
    pub fn variant(&self, value: u32) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|(discriminant, _)| *discriminant == value)
            .map(|(_, name)| *name)
    }
}

/// Semantic kind of an instruction property
#[derive(Debug, Clone, Copy)]
pub enum PropertyKind {
    U8,
    U32,
    U64,
    I32,
    I64,
    Pubkey,
    /// A key that must belong to a signer
    Authority,
    Enum(&'static EnumSpec),
    /// `u64` length prefix, UTF-8
    String,
    /// Remainder of the data, UTF-8
    Memo,
    Lamports,
    TokenAmount,
    UnixTimestamp,
}

impl PropertyKind {
    /// Consume one value of this kind
    pub fn decode(self, reader: &mut ByteReader<'_>) -> SignerResult<PropertyValue> {
        let value = match self {
            PropertyKind::U8 => PropertyValue::Unsigned(u64::from(reader.read_u8()?)),
            PropertyKind::U32 => PropertyValue::Unsigned(u64::from(reader.read_u32_le()?)),
            PropertyKind::U64 | PropertyKind::Lamports | PropertyKind::TokenAmount => {
                PropertyValue::Unsigned(reader.read_u64_le()?)
            }
            PropertyKind::I32 => PropertyValue::Signed(i64::from(reader.read_i32_le()?)),
            PropertyKind::I64 | PropertyKind::UnixTimestamp => {
                PropertyValue::Signed(reader.read_i64_le()?)
            }
            PropertyKind::Pubkey | PropertyKind::Authority => {
                PropertyValue::Pubkey(reader.read_pubkey()?)
            }
            PropertyKind::String => PropertyValue::Text(reader.read_string()?),
            PropertyKind::Memo => PropertyValue::Text(reader.read_utf8_rest()?),
            PropertyKind::Enum(spec) => return decode_enum(spec, reader),
        };
        Ok(value)
    }

    pub fn is_authority(self) -> bool {
        matches!(self, PropertyKind::Authority)
    }
}

fn decode_enum(spec: &'static EnumSpec, reader: &mut ByteReader<'_>) -> SignerResult<PropertyValue> {
    let offset = reader.offset();
    let value = read_enum_value(spec, reader)?;
    let name = spec.variant(value).ok_or_else(|| {
        SignerError::malformed("Invalid transaction")
            .with_details(format!("unknown {} variant {} at offset {}", spec.name, value, offset))
    })?;
    Ok(PropertyValue::Enum { value, name })
}

fn read_enum_value(spec: &EnumSpec, reader: &mut ByteReader<'_>) -> ReadResult<u32> {
    match spec.width {
        1 => reader.read_u8().map(u32::from),
        _ => reader.read_u32_le(),
    }
}

/// One property of instruction data
#[derive(Debug, Clone, Copy)]
pub struct PropertyTemplate {
    pub name: &'static str,
    pub kind: PropertyKind,
    /// Preceded by a presence byte; `0` means absent
    pub optional: bool,
}

/// One account slot of an instruction
#[derive(Debug, Clone, Copy)]
pub struct AccountTemplate {
    pub name: &'static str,
    pub is_authority: bool,
    pub optional: bool,
}

/// What a display line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    Parameter(&'static str),
    Account(&'static str),
}

/// One entry of the display plan
#[derive(Debug, Clone, Copy)]
pub struct UiProperty {
    pub target: UiTarget,
    pub display_name: &'static str,
    pub is_authority: bool,
}

/// Everything needed to decode and display one instruction
#[derive(Debug)]
pub struct InstructionSpec {
    pub id: u32,
    pub ui_name: &'static str,
    pub properties: &'static [PropertyTemplate],
    pub accounts: &'static [AccountTemplate],
    pub ui_properties: &'static [UiProperty],
    /// Accounts past the template are multisig signers
    pub multisig: bool,
    pub deprecation_warning: Option<&'static str>,
}

impl InstructionSpec {
    pub fn property_template(&self, name: &str) -> SignerResult<&'static PropertyTemplate> {
        self.properties
            .iter()
            .find(|template| template.name == name)
            .ok_or_else(|| {
                SignerError::invalid_display("Unknown property")
                    .with_details(format!("{}: {}", self.ui_name, name))
            })
    }

    pub fn account_template(&self, name: &str) -> SignerResult<&'static AccountTemplate> {
        self.accounts
            .iter()
            .find(|template| template.name == name)
            .ok_or_else(|| {
                SignerError::invalid_display("Unknown account")
                    .with_details(format!("{}: {}", self.ui_name, name))
            })
    }
}

// MARK: - Const constructors for the static tables

pub const fn property(name: &'static str, kind: PropertyKind) -> PropertyTemplate {
    PropertyTemplate {
        name,
        kind,
        optional: false,
    }
}

pub const fn optional_property(name: &'static str, kind: PropertyKind) -> PropertyTemplate {
    PropertyTemplate {
        name,
        kind,
        optional: true,
    }
}

pub const fn account(name: &'static str) -> AccountTemplate {
    AccountTemplate {
        name,
        is_authority: false,
        optional: false,
    }
}

pub const fn authority(name: &'static str) -> AccountTemplate {
    AccountTemplate {
        name,
        is_authority: true,
        optional: false,
    }
}

pub const fn optional_account(name: &'static str) -> AccountTemplate {
    AccountTemplate {
        name,
        is_authority: false,
        optional: true,
    }
}

pub const fn show(parameter: &'static str, display_name: &'static str) -> UiProperty {
    UiProperty {
        target: UiTarget::Parameter(parameter),
        display_name,
        is_authority: false,
    }
}

pub const fn show_account(account: &'static str, display_name: &'static str) -> UiProperty {
    UiProperty {
        target: UiTarget::Account(account),
        display_name,
        is_authority: false,
    }
}

pub const fn show_authority(account: &'static str, display_name: &'static str) -> UiProperty {
    UiProperty {
        target: UiTarget::Account(account),
        display_name,
        is_authority: true,
    }
}
