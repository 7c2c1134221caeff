//! Associated Token Account program

use super::super::registry::{InstructionIdFormat, ProgramSpec};
use super::super::templates::*;

pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

const CREATE_ACCOUNTS: &[AccountTemplate] = &[
    account("funding_account"),
    account("associated_token_account"),
    account("wallet_address"),
    account("token_mint"),
    account("system_program"),
    account("spl_token"),
];

const CREATE_UI: &[UiProperty] = &[
    show_account("associated_token_account", "Associated token account"),
    show_account("wallet_address", "Wallet address"),
    show_account("token_mint", "Token mint"),
    show_authority("funding_account", "Funded by"),
];

const INSTRUCTIONS: &[InstructionSpec] = &[
    InstructionSpec {
        id: 0,
        ui_name: "Create token account",
        properties: &[],
        accounts: CREATE_ACCOUNTS,
        ui_properties: CREATE_UI,
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 1,
        ui_name: "Create token account",
        properties: &[],
        accounts: CREATE_ACCOUNTS,
        ui_properties: CREATE_UI,
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 2,
        ui_name: "Recover nested",
        properties: &[],
        accounts: &[
            account("nested_account"),
            account("nested_mint"),
            account("destination_account"),
            account("owner_account"),
            account("owner_mint"),
            authority("wallet_address"),
            account("spl_token"),
        ],
        ui_properties: &[
            show_account("nested_account", "Nested account"),
            show_account("nested_mint", "Nested token mint"),
            show_account("destination_account", "Destination"),
            show_account("owner_account", "Nested owner"),
            show_account("owner_mint", "Owner token mint"),
            show_authority("wallet_address", "Owner"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
];

pub const PROGRAM: ProgramSpec = ProgramSpec {
    program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
    name: "Associated Token Account program",
    // Create predates the discriminant and is sent with empty data
    id_format: InstructionIdFormat {
        length: 1,
        is_included_if_zero: false,
    },
    instructions: INSTRUCTIONS,
};
