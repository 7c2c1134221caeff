//! Stake program
//!
//! Discriminants are `u32` little-endian.

use super::super::registry::{InstructionIdFormat, ProgramSpec};
use super::super::templates::*;

pub const STAKE_PROGRAM_ID: &str = "Stake11111111111111111111111111111111111111";

pub const STAKE_AUTHORIZE: EnumSpec = EnumSpec {
    name: "StakeAuthorize",
    width: 4,
    variants: &[(0, "Staker"), (1, "Withdrawer")],
};

const INSTRUCTIONS: &[InstructionSpec] = &[
    InstructionSpec {
        id: 0,
        ui_name: "Initialize stake",
        properties: &[
            property("staker", PropertyKind::Pubkey),
            property("withdrawer", PropertyKind::Pubkey),
            property("unix_timestamp", PropertyKind::UnixTimestamp),
            property("epoch", PropertyKind::U64),
            property("custodian", PropertyKind::Pubkey),
        ],
        accounts: &[account("stake_account"), account("rent_sysvar")],
        ui_properties: &[
            show_account("stake_account", "Stake account"),
            show("staker", "New stake authority"),
            show("withdrawer", "New withdraw authority"),
            show("unix_timestamp", "Lockup time"),
            show("epoch", "Lockup epoch"),
            show("custodian", "Lockup authority"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 1,
        ui_name: "Authorize",
        properties: &[
            property("pubkey", PropertyKind::Pubkey),
            property("stake_authorize", PropertyKind::Enum(&STAKE_AUTHORIZE)),
        ],
        accounts: &[
            account("stake_account"),
            account("clock_sysvar"),
            authority("stake_or_withdraw_authority"),
            optional_account("lockup_authority"),
        ],
        ui_properties: &[
            show_account("stake_account", "Stake account"),
            show("pubkey", "New authority"),
            show("stake_authorize", "Authority type"),
            show_authority("stake_or_withdraw_authority", "Authorized by"),
            show_account("lockup_authority", "Lockup authority"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 2,
        ui_name: "Delegate stake",
        properties: &[],
        accounts: &[
            account("stake_account"),
            account("vote_account"),
            account("clock_sysvar"),
            account("stake_history_sysvar"),
            account("config_account"),
            authority("stake_authority"),
        ],
        ui_properties: &[
            show_account("stake_account", "Stake account"),
            show_account("vote_account", "Vote account"),
            show_authority("stake_authority", "Authorized by"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 3,
        ui_name: "Split stake",
        properties: &[property("lamports", PropertyKind::Lamports)],
        accounts: &[
            account("stake_account"),
            account("uninitialized_stake_account"),
            authority("stake_authority"),
        ],
        ui_properties: &[
            show_account("stake_account", "Split from"),
            show_account("uninitialized_stake_account", "Split to"),
            show("lamports", "Amount"),
            show_authority("stake_authority", "Authorized by"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 4,
        ui_name: "Withdraw stake",
        properties: &[property("lamports", PropertyKind::Lamports)],
        accounts: &[
            account("stake_account"),
            account("recipient_account"),
            account("clock_sysvar"),
            account("stake_history_sysvar"),
            authority("withdrawal_authority"),
            optional_account("lockup_authority"),
        ],
        ui_properties: &[
            show_account("recipient_account", "Recipient"),
            show("lamports", "Amount"),
            show_account("stake_account", "Withdraw from"),
            show_authority("withdrawal_authority", "Authorized by"),
            show_account("lockup_authority", "Lockup authority"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 5,
        ui_name: "Deactivate stake",
        properties: &[],
        accounts: &[
            account("delegated_stake_account"),
            account("clock_sysvar"),
            authority("stake_authority"),
        ],
        ui_properties: &[
            show_account("delegated_stake_account", "Stake account"),
            show_authority("stake_authority", "Authorized by"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 6,
        ui_name: "Set lockup",
        properties: &[
            optional_property("unix_timestamp", PropertyKind::UnixTimestamp),
            optional_property("epoch", PropertyKind::U64),
            optional_property("custodian", PropertyKind::Pubkey),
        ],
        accounts: &[account("stake_account"), authority("lockup_or_withdraw_authority")],
        ui_properties: &[
            show_account("stake_account", "Stake account"),
            show("unix_timestamp", "Lockup time"),
            show("epoch", "Lockup epoch"),
            show("custodian", "Lockup authority"),
            show_authority("lockup_or_withdraw_authority", "Authorized by"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
    InstructionSpec {
        id: 7,
        ui_name: "Merge stake",
        properties: &[],
        accounts: &[
            account("destination_stake_account"),
            account("source_stake_account"),
            account("clock_sysvar"),
            account("stake_history_sysvar"),
            authority("stake_authority"),
        ],
        ui_properties: &[
            show_account("destination_stake_account", "Merge into"),
            show_account("source_stake_account", "Merge from"),
            show_authority("stake_authority", "Authorized by"),
        ],
        multisig: false,
        deprecation_warning: None,
    },
];

pub const PROGRAM: ProgramSpec = ProgramSpec {
    program_id: STAKE_PROGRAM_ID,
    name: "Stake program",
    id_format: InstructionIdFormat {
        length: 4,
        is_included_if_zero: true,
    },
    instructions: INSTRUCTIONS,
};
