//! Instruction Decoder
//!
//! Applies an `InstructionSpec` to instruction data and resolved accounts.
//! The data is walked once in template order and must be consumed exactly.

use std::collections::BTreeMap;

use super::templates::InstructionSpec;
use super::PropertyValue;
use crate::error::{SignerError, SignerResult};
use crate::tx::reader::ByteReader;
use crate::types::Account;

/// Name of the property that carries token decimals
pub const DECIMALS_PROPERTY: &str = "decimals";

/// Output of a structured decode
#[derive(Debug, Clone, Default)]
pub struct DecodedInstruction {
    pub parsed_data: BTreeMap<&'static str, PropertyValue>,
    pub parsed_accounts: BTreeMap<&'static str, Account>,
    pub multisig_signers: Vec<Account>,
}

impl DecodedInstruction {
    pub fn decimals(&self) -> Option<u8> {
        self.parsed_data
            .get(DECIMALS_PROPERTY)
            .and_then(PropertyValue::as_unsigned)
            .and_then(|value| u8::try_from(value).ok())
    }
}

/// Decode `data` and `accounts` according to `spec`
pub fn decode(
    spec: &'static InstructionSpec,
    accounts: &[Account],
    data: &[u8],
) -> SignerResult<DecodedInstruction> {
    let mut decoded = DecodedInstruction::default();
    let mut reader = ByteReader::new(data);

    for template in spec.properties {
        if template.optional {
            // Presence byte: 0 = absent
            if reader.read_u8()? == 0 {
                continue;
            }
        }
        let value = template.kind.decode(&mut reader)?;
        decoded.parsed_data.insert(template.name, value);
    }

    if !reader.is_empty() {
        return Err(SignerError::malformed("Invalid instruction data").with_details(format!(
            "{} trailing bytes after {}",
            reader.remaining(),
            spec.ui_name
        )));
    }

    for (position, template) in spec.accounts.iter().enumerate() {
        match accounts.get(position) {
            Some(account) => {
                decoded.parsed_accounts.insert(template.name, *account);
            }
            None if template.optional => {}
            None => {
                return Err(SignerError::malformed("Missing instruction account").with_details(
                    format!(
                        "{} requires {} at position {}, got {} accounts",
                        spec.ui_name,
                        template.name,
                        position,
                        accounts.len()
                    ),
                ));
            }
        }
    }

    if spec.multisig && accounts.len() > spec.accounts.len() {
        decoded.multisig_signers = accounts[spec.accounts.len()..].to_vec();
    }

    Ok(decoded)
}
