//! Compute Budget program
//!
//! Adjusts the compute-unit limit and price, and through them the fee.

use super::super::registry::{InstructionIdFormat, ProgramSpec};
use super::super::templates::*;

pub const COMPUTE_BUDGET_PROGRAM_ID: &str = "ComputeBudget111111111111111111111111111111";

pub const INS_REQUEST_HEAP_FRAME: u32 = 1;
pub const INS_SET_COMPUTE_UNIT_LIMIT: u32 = 2;
pub const INS_SET_COMPUTE_UNIT_PRICE: u32 = 3;

/// Parameter holding the unit limit
pub const UNITS: &str = "units";
/// Parameter holding the unit price in micro-lamports
pub const LAMPORTS: &str = "lamports";

const INSTRUCTIONS: &[InstructionSpec] = &[
    InstructionSpec {
        id: INS_REQUEST_HEAP_FRAME,
        ui_name: "Request heap frame",
        properties: &[property("bytes", PropertyKind::U32)],
        accounts: &[],
        ui_properties: &[show("bytes", "Bytes")],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: INS_SET_COMPUTE_UNIT_LIMIT,
        ui_name: "Set compute unit limit",
        properties: &[property(UNITS, PropertyKind::U32)],
        accounts: &[],
        ui_properties: &[show(UNITS, "Units")],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: INS_SET_COMPUTE_UNIT_PRICE,
        ui_name: "Set compute unit price",
        properties: &[property(LAMPORTS, PropertyKind::U64)],
        accounts: &[],
        ui_properties: &[show(LAMPORTS, "Compute unit price (micro-lamports)")],
        multisig: false,
        deprecation_warning: None,
    },
];

pub const PROGRAM: ProgramSpec = ProgramSpec {
    program_id: COMPUTE_BUDGET_PROGRAM_ID,
    name: "Compute Budget program",
    id_format: InstructionIdFormat {
        length: 1,
        is_included_if_zero: true,
    },
    instructions: INSTRUCTIONS,
};
