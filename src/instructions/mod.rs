//! Instructions Module
//!
//! Turns position-only raw instructions into resolved, typed instructions
//! using the static program registry.

pub mod decoder;
pub mod programs;
pub mod registry;
pub mod templates;

use std::collections::BTreeMap;

use crate::error::{SignerError, SignerResult};
use crate::types::{to_base58, Account, Address, Pubkey, RawInstruction};
use registry::{Lookup, UNSUPPORTED_PROGRAM_UI_NAME};
use templates::{AccountTemplate, InstructionSpec, PropertyTemplate, UiProperty};

/// A decoded instruction property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Unsigned(u64),
    Signed(i64),
    Pubkey(Pubkey),
    Text(String),
    Enum { value: u32, name: &'static str },
}

impl PropertyValue {
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            PropertyValue::Unsigned(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_pubkey(&self) -> Option<&Pubkey> {
        match self {
            PropertyValue::Pubkey(key) => Some(key),
            _ => None,
        }
    }
}

/// Resolved instruction
#[derive(Debug, Clone)]
pub struct Instruction {
    program_id: String,
    instruction_id: u32,
    accounts: Vec<Account>,
    instruction_data: Vec<u8>,
    ui_name: &'static str,
    spec: Option<&'static InstructionSpec>,
    is_program_supported: bool,
    parsed_data: BTreeMap<&'static str, PropertyValue>,
    parsed_accounts: BTreeMap<&'static str, Account>,
    multisig_signers: Vec<Account>,
    decimals: Option<u8>,
}

impl Instruction {
    /// Resolve a raw instruction against the inline table and the combined
    /// account list, then decode it if the registry knows it
    pub fn resolve(
        position: usize,
        raw: &RawInstruction,
        addresses: &[Address],
        combined: &[Account],
    ) -> SignerResult<Self> {
        let program = addresses.get(raw.program_index as usize).ok_or_else(|| {
            SignerError::malformed("Invalid program index")
                .with_details(format!("instruction {}: index {}", position, raw.program_index))
        })?;
        let program_id = to_base58(&program.pubkey);

        let accounts = raw
            .account_indices
            .iter()
            .map(|&index| {
                combined.get(index as usize).copied().ok_or_else(|| {
                    SignerError::malformed("Invalid account index").with_details(format!(
                        "instruction {}: index {} of {} accounts",
                        position,
                        index,
                        combined.len()
                    ))
                })
            })
            .collect::<SignerResult<Vec<_>>>()?;

        let mut instruction = Instruction {
            program_id,
            instruction_id: raw.instruction_id,
            accounts,
            instruction_data: raw.data.clone(),
            ui_name: UNSUPPORTED_PROGRAM_UI_NAME,
            spec: None,
            is_program_supported: false,
            parsed_data: BTreeMap::new(),
            parsed_accounts: BTreeMap::new(),
            multisig_signers: Vec::new(),
            decimals: None,
        };

        match registry::lookup(&instruction.program_id, instruction.instruction_id) {
            Lookup::Supported { spec, .. } => {
                instruction.apply_spec(spec).map_err(|e| {
                    let details = e.details.clone().unwrap_or_default();
                    e.with_details(format!("instruction {} ({}): {}", position, spec.ui_name, details))
                })?;
            }
            Lookup::UnsupportedInstruction { program } => {
                instruction.ui_name = program.name;
                instruction.is_program_supported = true;
            }
            Lookup::UnsupportedProgram => {}
        }

        Ok(instruction)
    }

    /// Decode against a template outside the registry
    #[cfg(test)]
    pub(crate) fn with_spec(
        program_id: &str,
        spec: &'static InstructionSpec,
        accounts: Vec<Account>,
        data: Vec<u8>,
    ) -> SignerResult<Self> {
        let mut instruction = Instruction {
            program_id: program_id.to_string(),
            instruction_id: spec.id,
            accounts,
            instruction_data: data,
            ui_name: UNSUPPORTED_PROGRAM_UI_NAME,
            spec: None,
            is_program_supported: false,
            parsed_data: BTreeMap::new(),
            parsed_accounts: BTreeMap::new(),
            multisig_signers: Vec::new(),
            decimals: None,
        };
        instruction.apply_spec(spec)?;
        Ok(instruction)
    }

    fn apply_spec(&mut self, spec: &'static InstructionSpec) -> SignerResult<()> {
        let decoded = decoder::decode(spec, &self.accounts, &self.instruction_data)?;
        self.ui_name = spec.ui_name;
        self.spec = Some(spec);
        self.is_program_supported = true;
        self.decimals = decoded.decimals();
        self.parsed_data = decoded.parsed_data;
        self.parsed_accounts = decoded.parsed_accounts;
        self.multisig_signers = decoded.multisig_signers;
        Ok(())
    }

    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    pub fn instruction_id(&self) -> u32 {
        self.instruction_id
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Data following the discriminant
    pub fn instruction_data(&self) -> &[u8] {
        &self.instruction_data
    }

    pub fn ui_name(&self) -> &'static str {
        self.ui_name
    }

    pub fn is_program_supported(&self) -> bool {
        self.is_program_supported
    }

    pub fn is_instruction_supported(&self) -> bool {
        self.spec.is_some()
    }

    pub fn is_supported(&self) -> bool {
        self.is_program_supported && self.is_instruction_supported()
    }

    /// Display plan; empty for unsupported instructions
    pub fn ui_properties(&self) -> &'static [UiProperty] {
        self.spec.map(|spec| spec.ui_properties).unwrap_or(&[])
    }

    pub fn deprecation_warning(&self) -> Option<&'static str> {
        self.spec.and_then(|spec| spec.deprecation_warning)
    }

    pub fn parsed_data(&self) -> &BTreeMap<&'static str, PropertyValue> {
        &self.parsed_data
    }

    pub fn parsed_accounts(&self) -> &BTreeMap<&'static str, Account> {
        &self.parsed_accounts
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.parsed_data.get(name)
    }

    pub fn parsed_account(&self, name: &str) -> Option<&Account> {
        self.parsed_accounts.get(name)
    }

    pub fn multisig_signers(&self) -> &[Account] {
        &self.multisig_signers
    }

    pub fn decimals(&self) -> Option<u8> {
        self.decimals
    }

    pub fn property_template(&self, name: &str) -> SignerResult<&'static PropertyTemplate> {
        self.supported_spec()?.property_template(name)
    }

    pub fn account_template(&self, name: &str) -> SignerResult<&'static AccountTemplate> {
        self.supported_spec()?.account_template(name)
    }

    fn supported_spec(&self) -> SignerResult<&'static InstructionSpec> {
        self.spec.ok_or_else(|| {
            SignerError::invalid_display("Instruction has no template")
                .with_details(format!("{} id {}", self.program_id, self.instruction_id))
        })
    }
}
