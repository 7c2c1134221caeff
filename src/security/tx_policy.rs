//! Transaction Policies
//!
//! Derived facts that decide which confirmation screens are mandatory:
//! - Blind signing (any instruction the registry cannot interpret)
//! - Multiple required signers (higher fee)
//! - Multisig instructions and their signer lists

use crate::instructions::Instruction;
use crate::tx::Transaction;
use crate::types::{Account, Pubkey};
use crate::ui::format::{format_account, format_path};

pub const BLIND_SIGNING_WARNING: &str = "Transaction contains unknown instructions.";

pub fn multiple_signers_message(count: u8) -> String {
    format!("Transaction requires {} signers which increases the fee.", count)
}

/// True when any instruction's program or discriminant is unregistered
pub fn blind_signing(instructions: &[Instruction]) -> bool {
    instructions.iter().any(|instruction| !instruction.is_supported())
}

/// Mandatory notice shown before any instruction screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyWarning {
    BlindSigning,
    /// Required signer count, always above one
    MultipleSigners(u8),
}

impl PolicyWarning {
    pub fn message(&self) -> String {
        match self {
            PolicyWarning::BlindSigning => BLIND_SIGNING_WARNING.to_string(),
            PolicyWarning::MultipleSigners(count) => multiple_signers_message(*count),
        }
    }
}

/// Result of evaluating a decoded transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReport {
    /// Mandatory warnings, in display order
    pub warnings: Vec<PolicyWarning>,
}

impl PolicyReport {
    pub fn evaluate(transaction: &Transaction) -> Self {
        let mut warnings = Vec::new();
        if transaction.blind_signing() {
            warnings.push(PolicyWarning::BlindSigning);
        }
        let required_signers_count = transaction.required_signers_count();
        if required_signers_count > 1 {
            warnings.push(PolicyWarning::MultipleSigners(required_signers_count));
        }
        Self { warnings }
    }
}

/// `Signer {i}:` lines for a multisig instruction
///
/// The device's own key is annotated with its derivation path.
pub fn multisig_signer_lines(
    instruction: &Instruction,
    signer_pubkey: &Pubkey,
    signer_path: &[u32],
) -> Vec<(String, String)> {
    signer_lines(instruction.multisig_signers(), signer_pubkey, signer_path)
}

fn signer_lines(signers: &[Account], signer_pubkey: &Pubkey, signer_path: &[u32]) -> Vec<(String, String)> {
    signers
        .iter()
        .enumerate()
        .map(|(i, account)| {
            let path = if account.is_key(signer_pubkey) {
                format!(" ({})", format_path(signer_path))
            } else {
                String::new()
            };
            (format!("Signer {}{}:", i + 1, path), format_account(account))
        })
        .collect()
}
