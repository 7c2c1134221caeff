//! Value formatting for confirmation screens

use crate::instructions::templates::PropertyKind;
use crate::instructions::PropertyValue;
use crate::types::{to_base58, Account};
use crate::wallet::derivation_path::{address_n_to_str, unharden};

/// Decimals of the native token
pub const SOL_DECIMALS: u8 = 9;

/// Path component shown as the signer account number
const ACCOUNT_PATH_INDEX: usize = 3;

/// Fixed-point amount with `,` thousands grouping and no trailing zeros
pub fn format_amount(value: u64, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;

    let (integer, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, fraction)
    }
}

pub fn format_lamports(lamports: u64) -> String {
    format!("{} SOL", format_amount(lamports, SOL_DECIMALS))
}

/// Base units when the instruction does not state decimals
pub fn format_token_amount(value: u64, decimals: Option<u8>) -> String {
    format_amount(value, decimals.unwrap_or(0))
}

/// UTC `YYYY-MM-DD HH:MM:SS`
pub fn format_unix_timestamp(timestamp: i64) -> String {
    match chrono::DateTime::from_timestamp(timestamp, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn format_property(kind: PropertyKind, value: &PropertyValue, decimals: Option<u8>) -> String {
    match (kind, value) {
        (PropertyKind::Lamports, PropertyValue::Unsigned(v)) => format_lamports(*v),
        (PropertyKind::TokenAmount, PropertyValue::Unsigned(v)) => format_token_amount(*v, decimals),
        (PropertyKind::UnixTimestamp, PropertyValue::Signed(v)) => format_unix_timestamp(*v),
        (_, PropertyValue::Unsigned(v)) => v.to_string(),
        (_, PropertyValue::Signed(v)) => v.to_string(),
        (_, PropertyValue::Pubkey(key)) => to_base58(key),
        (_, PropertyValue::Text(text)) => text.clone(),
        (_, PropertyValue::Enum { name, .. }) => name.to_string(),
    }
}

/// Key of an inline account, or its table position
pub fn format_account(account: &Account) -> String {
    match account {
        Account::Inline(address) => to_base58(&address.pubkey),
        Account::Lookup(reference) => format!(
            "{} (lookup table index {})",
            to_base58(&reference.table),
            reference.index
        ),
    }
}

pub fn format_path(address_n: &[u32]) -> String {
    address_n_to_str(address_n)
}

/// `#n` for standard Solana paths, the full path otherwise
pub fn format_signer_account(address_n: &[u32]) -> String {
    if address_n.len() < 4 {
        return format_path(address_n);
    }
    format!("#{}", u64::from(unharden(address_n[ACCOUNT_PATH_INDEX])) + 1)
}
