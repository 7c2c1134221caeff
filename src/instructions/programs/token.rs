//! SPL Token and Token-2022 programs
//!
//! Both programs share the base token instruction set. Authority slots may
//! hold a multisig account, in which case the trailing accounts are its
//! signers.

use super::super::registry::{InstructionIdFormat, ProgramSpec};
use super::super::templates::*;

pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

const UNCHECKED_WARNING: &str =
    "This instruction does not state the token decimals. Amounts are shown in base units.";

pub const AUTHORITY_TYPE: EnumSpec = EnumSpec {
    name: "AuthorityType",
    width: 1,
    variants: &[
        (0, "Mint tokens"),
        (1, "Freeze account"),
        (2, "Account owner"),
        (3, "Close account"),
        (4, "Transfer fee config"),
        (5, "Withheld withdraw"),
        (6, "Close mint"),
        (7, "Interest rate"),
        (8, "Permanent delegate"),
        (9, "Confidential transfer mint"),
        (10, "Transfer hook program id"),
        (11, "Confidential transfer fee config"),
        (12, "Metadata pointer"),
        (13, "Group pointer"),
        (14, "Group member pointer"),
    ],
};

const INSTRUCTIONS: &[InstructionSpec] = &[
    InstructionSpec {
        id: 1,
        ui_name: "Initialize account",
        properties: &[],
        accounts: &[
            account("account"),
            account("mint"),
            account("owner"),
            account("rent_sysvar"),
        ],
        ui_properties: &[
            show_account("account", "Account"),
            show_account("owner", "Owner"),
            show_account("mint", "Mint"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 3,
        ui_name: "Transfer",
        properties: &[property("amount", PropertyKind::TokenAmount)],
        accounts: &[
            account("source"),
            account("destination"),
            authority("owner"),
        ],
        ui_properties: &[
            show_account("destination", "Recipient"),
            show("amount", "Amount"),
            show_account("source", "From"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: Some(UNCHECKED_WARNING),
    },
    InstructionSpec {
        id: 4,
        ui_name: "Approve",
        properties: &[property("amount", PropertyKind::TokenAmount)],
        accounts: &[account("source"), account("delegate"), authority("owner")],
        ui_properties: &[
            show_account("delegate", "Delegate"),
            show("amount", "Allowance"),
            show_account("source", "From"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: Some(UNCHECKED_WARNING),
    },
    InstructionSpec {
        id: 5,
        ui_name: "Revoke",
        properties: &[],
        accounts: &[account("source"), authority("owner")],
        ui_properties: &[
            show_account("source", "Revoke from"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 6,
        ui_name: "Set authority",
        properties: &[
            property("authority_type", PropertyKind::Enum(&AUTHORITY_TYPE)),
            optional_property("new_authority", PropertyKind::Pubkey),
        ],
        accounts: &[account("account"), authority("current_authority")],
        ui_properties: &[
            show_account("account", "Account"),
            show("authority_type", "Authority type"),
            show("new_authority", "New authority"),
            show_authority("current_authority", "Current authority"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 7,
        ui_name: "Mint to",
        properties: &[property("amount", PropertyKind::TokenAmount)],
        accounts: &[
            account("mint"),
            account("destination"),
            authority("mint_authority"),
        ],
        ui_properties: &[
            show_account("destination", "Recipient"),
            show("amount", "Amount"),
            show_account("mint", "Mint"),
            show_authority("mint_authority", "Mint authority"),
        ],
        multisig: true,
        deprecation_warning: Some(UNCHECKED_WARNING),
    },
    InstructionSpec {
        id: 8,
        ui_name: "Burn",
        properties: &[property("amount", PropertyKind::TokenAmount)],
        accounts: &[account("account"), account("mint"), authority("owner")],
        ui_properties: &[
            show_account("account", "Burn from"),
            show("amount", "Amount"),
            show_account("mint", "Mint"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: Some(UNCHECKED_WARNING),
    },
    InstructionSpec {
        id: 9,
        ui_name: "Close account",
        properties: &[],
        accounts: &[
            account("account"),
            account("destination"),
            authority("owner"),
        ],
        ui_properties: &[
            show_account("account", "Close account"),
            show_account("destination", "Send rent to"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 10,
        ui_name: "Freeze account",
        properties: &[],
        accounts: &[
            account("account"),
            account("mint"),
            authority("freeze_authority"),
        ],
        ui_properties: &[
            show_account("account", "Account"),
            show_account("mint", "Mint"),
            show_authority("freeze_authority", "Freeze authority"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 11,
        ui_name: "Thaw account",
        properties: &[],
        accounts: &[
            account("account"),
            account("mint"),
            authority("freeze_authority"),
        ],
        ui_properties: &[
            show_account("account", "Account"),
            show_account("mint", "Mint"),
            show_authority("freeze_authority", "Freeze authority"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 12,
        ui_name: "Transfer",
        properties: &[
            property("amount", PropertyKind::TokenAmount),
            property("decimals", PropertyKind::U8),
        ],
        accounts: &[
            account("source"),
            account("mint"),
            account("destination"),
            authority("owner"),
        ],
        ui_properties: &[
            show_account("destination", "Recipient"),
            show("amount", "Amount"),
            show_account("mint", "Mint"),
            show_account("source", "From"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 13,
        ui_name: "Approve",
        properties: &[
            property("amount", PropertyKind::TokenAmount),
            property("decimals", PropertyKind::U8),
        ],
        accounts: &[
            account("source"),
            account("mint"),
            account("delegate"),
            authority("owner"),
        ],
        ui_properties: &[
            show_account("delegate", "Delegate"),
            show("amount", "Allowance"),
            show_account("mint", "Mint"),
            show_account("source", "From"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 14,
        ui_name: "Mint to",
        properties: &[
            property("amount", PropertyKind::TokenAmount),
            property("decimals", PropertyKind::U8),
        ],
        accounts: &[
            account("mint"),
            account("destination"),
            authority("mint_authority"),
        ],
        ui_properties: &[
            show_account("destination", "Recipient"),
            show("amount", "Amount"),
            show_account("mint", "Mint"),
            show_authority("mint_authority", "Mint authority"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 15,
        ui_name: "Burn",
        properties: &[
            property("amount", PropertyKind::TokenAmount),
            property("decimals", PropertyKind::U8),
        ],
        accounts: &[account("account"), account("mint"), authority("owner")],
        ui_properties: &[
            show_account("account", "Burn from"),
            show("amount", "Amount"),
            show_account("mint", "Mint"),
            show_authority("owner", "Owner"),
        ],
        multisig: true,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 16,
        ui_name: "Initialize account",
        properties: &[property("owner", PropertyKind::Pubkey)],
        accounts: &[account("account"), account("mint"), account("rent_sysvar")],
        ui_properties: &[
            show_account("account", "Account"),
            show("owner", "Owner"),
            show_account("mint", "Mint"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 17,
        ui_name: "Sync native",
        properties: &[],
        accounts: &[account("account")],
        ui_properties: &[show_account("account", "Token account")],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 18,
        ui_name: "Initialize account",
        properties: &[property("owner", PropertyKind::Pubkey)],
        accounts: &[account("account"), account("mint")],
        ui_properties: &[
            show_account("account", "Account"),
            show("owner", "Owner"),
            show_account("mint", "Mint"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 22,
        ui_name: "Initialize immutable owner",
        properties: &[],
        accounts: &[account("account")],
        ui_properties: &[show_account("account", "Account")],
        multisig: false,
        deprecation_warning: None,
    },
];

const TOKEN_ID_FORMAT: InstructionIdFormat = InstructionIdFormat {
    length: 1,
    is_included_if_zero: true,
};

pub const TOKEN_PROGRAM: ProgramSpec = ProgramSpec {
    program_id: TOKEN_PROGRAM_ID,
    name: "Token program",
    id_format: TOKEN_ID_FORMAT,
    instructions: INSTRUCTIONS,
};

pub const TOKEN_2022_PROGRAM: ProgramSpec = ProgramSpec {
    program_id: TOKEN_2022_PROGRAM_ID,
    name: "Token 2022 program",
    id_format: TOKEN_ID_FORMAT,
    instructions: INSTRUCTIONS,
};
