//! Memo program, current and legacy deployments

use super::super::registry::{InstructionIdFormat, ProgramSpec};
use super::super::templates::*;

pub const MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";
pub const MEMO_LEGACY_PROGRAM_ID: &str = "Memo1UhkJRfHyvLMcVucJwxXeuD728EqVDDwQDxFMNo";

const INSTRUCTIONS: &[InstructionSpec] = &[InstructionSpec {
    id: 0,
    ui_name: "Memo",
    properties: &[property("memo", PropertyKind::Memo)],
    accounts: &[],
    ui_properties: &[show("memo", "Memo")],
    multisig: false,
    deprecation_warning: None,
}];

// The whole data is the memo text, there is no discriminant
const MEMO_ID_FORMAT: InstructionIdFormat = InstructionIdFormat {
    length: 0,
    is_included_if_zero: false,
};

pub const PROGRAM: ProgramSpec = ProgramSpec {
    program_id: MEMO_PROGRAM_ID,
    name: "Memo program",
    id_format: MEMO_ID_FORMAT,
    instructions: INSTRUCTIONS,
};

pub const LEGACY_PROGRAM: ProgramSpec = ProgramSpec {
    program_id: MEMO_LEGACY_PROGRAM_ID,
    name: "Memo v1 program",
    id_format: MEMO_ID_FORMAT,
    instructions: INSTRUCTIONS,
};
