//! Instruction Registry
//!
//! Static table from (program id, discriminant) to an `InstructionSpec`.
//! Unregistered keys resolve to an explicit unsupported variant.

use super::programs::{associated_token, compute_budget, memo, stake, token};
use super::templates::InstructionSpec;

/// How the discriminant is laid out at the head of instruction data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionIdFormat {
    /// Number of little-endian bytes
    pub length: usize,
    /// When false, empty data means discriminant `0`
    pub is_included_if_zero: bool,
}

/// Discriminant format of programs the registry does not know
pub const UNKNOWN_PROGRAM_ID_FORMAT: InstructionIdFormat = InstructionIdFormat {
    length: 0,
    is_included_if_zero: false,
};

/// UI name for instructions of unregistered programs
pub const UNSUPPORTED_PROGRAM_UI_NAME: &str = "Unsupported program";

/// A registered on-chain program
#[derive(Debug)]
pub struct ProgramSpec {
    pub program_id: &'static str,
    pub name: &'static str,
    pub id_format: InstructionIdFormat,
    pub instructions: &'static [InstructionSpec],
}

/// Result of a registry lookup
#[derive(Debug, Clone, Copy)]
pub enum Lookup {
    Supported {
        program: &'static ProgramSpec,
        spec: &'static InstructionSpec,
    },
    UnsupportedInstruction {
        program: &'static ProgramSpec,
    },
    UnsupportedProgram,
}

const PROGRAMS: &[&ProgramSpec] = &[
    &compute_budget::PROGRAM,
    &token::TOKEN_PROGRAM,
    &token::TOKEN_2022_PROGRAM,
    &associated_token::PROGRAM,
    &memo::PROGRAM,
    &memo::LEGACY_PROGRAM,
    &stake::PROGRAM,
];

/// All registered programs
pub fn programs() -> &'static [&'static ProgramSpec] {
    PROGRAMS
}

pub fn find_program(program_id: &str) -> Option<&'static ProgramSpec> {
    PROGRAMS
        .iter()
        .copied()
        .find(|program| program.program_id == program_id)
}

/// Discriminant format for a program
pub fn instruction_id_format(program_id: &str) -> InstructionIdFormat {
    find_program(program_id)
        .map(|program| program.id_format)
        .unwrap_or(UNKNOWN_PROGRAM_ID_FORMAT)
}

pub fn lookup(program_id: &str, instruction_id: u32) -> Lookup {
    let program = match find_program(program_id) {
        Some(program) => program,
        None => return Lookup::UnsupportedProgram,
    };

    match program
        .instructions
        .iter()
        .find(|spec| spec.id == instruction_id)
    {
        Some(spec) => Lookup::Supported { program, spec },
        None => Lookup::UnsupportedInstruction { program },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registered_lookup() {
        match lookup(compute_budget::COMPUTE_BUDGET_PROGRAM_ID, 3) {
            Lookup::Supported { spec, .. } => assert_eq!(spec.ui_name, "Set compute unit price"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_discriminant_of_known_program() {
        assert!(matches!(
            lookup(token::TOKEN_PROGRAM_ID, 250),
            Lookup::UnsupportedInstruction { .. }
        ));
    }

    #[test]
    fn test_system_program_is_not_registered() {
        assert!(matches!(
            lookup("11111111111111111111111111111111", 0),
            Lookup::UnsupportedProgram
        ));
        assert_eq!(
            instruction_id_format("11111111111111111111111111111111"),
            UNKNOWN_PROGRAM_ID_FORMAT
        );
    }

    #[test]
    fn test_program_ids_are_unique_and_valid_keys() {
        let mut seen = HashSet::new();
        for program in programs() {
            assert!(seen.insert(program.program_id), "{}", program.program_id);
            assert!(
                crate::types::pubkey_from_base58(program.program_id).is_some(),
                "{} is not a 32-byte key",
                program.program_id
            );
        }
    }

    #[test]
    fn test_templates_are_consistent() {
        // Every displayed parameter/account must exist in its template list
        for program in programs() {
            let mut ids = HashSet::new();
            for spec in program.instructions {
                assert!(ids.insert(spec.id), "{} duplicate id {}", program.name, spec.id);
                assert!(program.id_format.length <= 4);
                for ui in spec.ui_properties {
                    match ui.target {
                        super::super::templates::UiTarget::Parameter(name) => {
                            assert!(spec.property_template(name).is_ok(), "{} {}", spec.ui_name, name)
                        }
                        super::super::templates::UiTarget::Account(name) => {
                            let template = spec.account_template(name);
                            assert!(template.is_ok(), "{} {}", spec.ui_name, name);
                        }
                    }
                }
            }
        }
    }
}
