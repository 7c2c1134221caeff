//! Fee Estimator
//!
//! `base fee × writable signers + floor(unit price × unit limit / 10^6)`.
//! Only the leading instructions are searched for compute budget settings
//! and the first occurrence of each setting wins.

use crate::instructions::programs::compute_budget::{
    COMPUTE_BUDGET_PROGRAM_ID, INS_SET_COMPUTE_UNIT_LIMIT, INS_SET_COMPUTE_UNIT_PRICE, LAMPORTS,
    UNITS,
};
use crate::log_debug;
use crate::tx::Transaction;
use crate::types::AddressType;
use crate::utils::SigningSettings;
use serde::{Deserialize, Serialize};

/// Fee components in lamports (price in micro-lamports per unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub signers: u64,
    pub base_fee: u128,
    pub unit_limit: u64,
    pub unit_price: u64,
    pub priority_fee: u128,
}

impl FeeBreakdown {
    pub fn total(&self) -> u128 {
        self.base_fee + self.priority_fee
    }
}

/// Estimated fee in lamports
pub fn estimate_fee(transaction: &Transaction, settings: &SigningSettings) -> u128 {
    fee_breakdown(transaction, settings).total()
}

pub fn fee_breakdown(transaction: &Transaction, settings: &SigningSettings) -> FeeBreakdown {
    // Lookup-table accounts can never sign and only writable signers pay
    let signers = transaction
        .addresses()
        .iter()
        .filter(|address| address.address_type == AddressType::Signer)
        .count() as u64;
    let base_fee = u128::from(settings.base_fee_lamports) * u128::from(signers);

    let mut unit_limit: Option<u64> = None;
    let mut unit_price: Option<u64> = None;

    for instruction in transaction
        .instructions()
        .iter()
        .take(settings.fee_scan_window)
        .filter(|instruction| instruction.program_id() == COMPUTE_BUDGET_PROGRAM_ID)
    {
        match instruction.instruction_id() {
            INS_SET_COMPUTE_UNIT_LIMIT if unit_limit.is_none() => {
                unit_limit = instruction.property(UNITS).and_then(|v| v.as_unsigned());
            }
            INS_SET_COMPUTE_UNIT_PRICE if unit_price.is_none() => {
                unit_price = instruction.property(LAMPORTS).and_then(|v| v.as_unsigned());
            }
            _ => {}
        }
    }

    let unit_limit = unit_limit.unwrap_or(u64::from(settings.default_compute_unit_limit));
    let unit_price = unit_price.unwrap_or(0);
    let divisor = u128::from(settings.micro_lamports_per_lamport.max(1));
    let priority_fee = u128::from(unit_price) * u128::from(unit_limit) / divisor;

    let breakdown = FeeBreakdown {
        signers,
        base_fee,
        unit_limit,
        unit_price,
        priority_fee,
    };
    log_debug!(
        "fees",
        "estimated fee",
        signers = signers,
        unit_limit = unit_limit,
        unit_price = unit_price,
        total = breakdown.total()
    );
    breakdown
}
