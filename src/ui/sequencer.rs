//! Confirmation Sequencer
//!
//! Builds the ordered list of screens for a decoded transaction:
//! mandatory warnings, one group per instruction, then the final
//! hold-to-confirm summary.

use super::format::{format_account, format_path, format_property, format_signer_account};
use super::{PropertyItem, Screen};
use crate::error::{SignerError, SignerResult};
use crate::instructions::templates::{UiProperty, UiTarget};
use crate::instructions::{Instruction, PropertyValue};
use crate::security::tx_policy::{multisig_signer_lines, PolicyReport, PolicyWarning};
use crate::tx::Transaction;
use crate::types::{to_base58, Account, Pubkey};

pub const BLIND_SIGNING_ID: &str = "warning_blind_signing";
pub const MULTIPLE_SIGNERS_ID: &str = "multiple_signers";
pub const DEPRECATED_ID: &str = "confirm_deprecated_warning";
pub const INSTRUCTION_ID: &str = "confirm_instruction";
pub const MULTISIG_ID: &str = "confirm_multisig";
pub const UNSUPPORTED_ID: &str = "confirm_unsupported_instruction";
pub const INSTRUCTION_DATA_ID: &str = "instruction_data";
pub const ACCOUNTS_ID: &str = "instruction_accounts";
pub const FINAL_ID: &str = "confirm_transaction";

pub const SHOW_DETAILS_BUTTON: &str = "Show details";

/// The device key the request signs with
#[derive(Debug, Clone, Copy)]
pub struct SignerIdentity<'a> {
    pub address_n: &'a [u32],
    pub pubkey: &'a Pubkey,
}

/// Ordered screens for `transaction`
pub fn plan(transaction: &Transaction, signer: SignerIdentity<'_>, fee: u128) -> SignerResult<Vec<Screen>> {
    let report = PolicyReport::evaluate(transaction);
    let mut screens = Vec::new();

    for warning in &report.warnings {
        screens.push(match warning {
            PolicyWarning::BlindSigning => Screen::Warning {
                id: BLIND_SIGNING_ID,
                message: warning.message(),
            },
            PolicyWarning::MultipleSigners(_) => Screen::Metadata {
                id: MULTIPLE_SIGNERS_ID,
                title: "Multiple signers".to_string(),
                message: warning.message(),
            },
        });
    }

    let count = transaction.instructions().len();
    for (position, instruction) in transaction.instructions().iter().enumerate() {
        let title = format!("{}/{}: {}", position + 1, count, instruction.ui_name());
        if instruction.is_supported() {
            instruction_screens(instruction, &title, signer, &mut screens)?;
        } else {
            screens.push(unsupported_screen(instruction, title, signer));
        }
    }

    screens.push(final_screen(transaction, signer, fee));
    Ok(screens)
}

fn instruction_screens(
    instruction: &Instruction,
    title: &str,
    signer: SignerIdentity<'_>,
    screens: &mut Vec<Screen>,
) -> SignerResult<()> {
    if let Some(warning) = instruction.deprecation_warning() {
        screens.push(Screen::Metadata {
            id: DEPRECATED_ID,
            title: title.to_string(),
            message: warning.to_string(),
        });
    }

    for ui_property in instruction.ui_properties() {
        let items = match ui_property.target {
            UiTarget::Parameter(name) => parameter_items(instruction, ui_property, name, signer)?,
            UiTarget::Account(name) => account_items(instruction, ui_property, name, signer)?,
        };
        if items.is_empty() {
            continue;
        }
        screens.push(Screen::Properties {
            id: INSTRUCTION_ID,
            title: title.to_string(),
            items,
            hold: false,
        });
    }

    if !instruction.multisig_signers().is_empty() {
        screens.push(Screen::Metadata {
            id: MULTISIG_ID,
            title: "Confirm multisig".to_string(),
            message: "The following instruction is a multisig instruction.".to_string(),
        });
        let items = multisig_signer_lines(instruction, signer.pubkey, signer.address_n)
            .into_iter()
            .map(|(label, value)| PropertyItem::text(label, value))
            .collect();
        screens.push(Screen::Properties {
            id: MULTISIG_ID,
            title: title.to_string(),
            items,
            hold: false,
        });
    }

    Ok(())
}

fn parameter_items(
    instruction: &Instruction,
    ui_property: &UiProperty,
    name: &str,
    signer: SignerIdentity<'_>,
) -> SignerResult<Vec<PropertyItem>> {
    let template = instruction.property_template(name)?;
    let label = format!("{}:", ui_property.display_name);

    let value = match instruction.property(name) {
        Some(value) => value,
        None if template.optional => return Ok(vec![PropertyItem::text(label, "None")]),
        None => {
            return Err(SignerError::invalid_display("Missing instruction property")
                .with_details(format!("{}: {}", instruction.ui_name(), name)))
        }
    };

    let is_authority = template.kind.is_authority() || ui_property.is_authority;
    if is_authority && matches!(value, PropertyValue::Pubkey(key) if key == signer.pubkey) {
        return Ok(Vec::new());
    }

    let text = format_property(template.kind, value, instruction.decimals());
    Ok(vec![PropertyItem::text(label, text)])
}

fn account_items(
    instruction: &Instruction,
    ui_property: &UiProperty,
    name: &str,
    signer: SignerIdentity<'_>,
) -> SignerResult<Vec<PropertyItem>> {
    let template = instruction.account_template(name)?;
    let Some(account) = instruction.parsed_account(name) else {
        // absent optional slot
        return Ok(Vec::new());
    };

    let is_authority = template.is_authority || ui_property.is_authority;
    if is_authority && account.is_key(signer.pubkey) {
        return Ok(Vec::new());
    }

    let items = match account {
        Account::Inline(address) => {
            let mut value = to_base58(&address.pubkey);
            if &address.pubkey == signer.pubkey {
                value.push_str(" (Signer)");
            }
            vec![PropertyItem::text(format!("{}:", ui_property.display_name), value)]
        }
        Account::Lookup(reference) => vec![
            PropertyItem::text(
                format!("{} is provided via a lookup table.", ui_property.display_name),
                "",
            ),
            PropertyItem::text("Lookup table address:", to_base58(&reference.table)),
            PropertyItem::text("Account index:", reference.index.to_string()),
        ],
    };
    Ok(items)
}

fn unsupported_screen(instruction: &Instruction, title: String, signer: SignerIdentity<'_>) -> Screen {
    let title = if instruction.is_program_supported() {
        format!("{}: instruction id ({})", title, instruction.instruction_id())
    } else {
        title
    };

    let data_screen = Screen::Properties {
        id: INSTRUCTION_DATA_ID,
        title: title.clone(),
        items: vec![PropertyItem::bytes(
            "Instruction data:",
            instruction.instruction_data().to_vec(),
        )],
        hold: false,
    };

    let account_lines = instruction
        .accounts()
        .iter()
        .enumerate()
        .map(|(i, account)| {
            let mut label = format!("Account {}", i + 1);
            if account.is_key(signer.pubkey) {
                label.push_str(&format!(" ({})", format_path(signer.address_n)));
            }
            let annotation = account.address_type().annotation();
            if !annotation.is_empty() {
                label.push(' ');
                label.push_str(annotation);
            }
            label.push(':');
            PropertyItem::text(label, format_account(account))
        })
        .collect();
    let accounts_screen = Screen::Properties {
        id: ACCOUNTS_ID,
        title: title.clone(),
        items: account_lines,
        hold: false,
    };

    Screen::ShowMore {
        id: UNSUPPORTED_ID,
        summary: format!(
            "Instruction contains {} accounts and its data is {} bytes long.",
            instruction.accounts().len(),
            instruction.instruction_data().len()
        ),
        title,
        button: SHOW_DETAILS_BUTTON,
        details: vec![data_screen, accounts_screen],
    }
}

fn final_screen(transaction: &Transaction, signer: SignerIdentity<'_>, fee: u128) -> Screen {
    Screen::Properties {
        id: FINAL_ID,
        title: "Confirm transaction".to_string(),
        items: vec![
            PropertyItem::text("Expected fee:", format!("{} lamports", fee)),
            PropertyItem::text("Blockhash:", to_base58(transaction.blockhash())),
            PropertyItem::text("Signer account:", format_signer_account(signer.address_n)),
            PropertyItem::text("Signer address:", to_base58(signer.pubkey)),
        ],
        hold: true,
    }
}
