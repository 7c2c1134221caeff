use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sol_signer_core::instructions::programs::{compute_budget, token};
use sol_signer_core::tx::MessageBuilder;
use sol_signer_core::types::{pubkey_from_base58, to_base58, Pubkey};
use sol_signer_core::{
    sign_tx, ConfirmationUi, DerivationPath, DisplayValue, ErrorCode, FailureCategory, Keychain,
    Screen, SignTxRequest, SigningSettings, Slip10Keychain, UserAction,
};

const MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";

/// Records every screen; optionally rejects one or expands details
struct RecordingUi {
    screens: Vec<Screen>,
    reject_at: Option<usize>,
    expand_details: bool,
    /// Answer hold screens with a plain tap
    skip_hold: bool,
}

impl RecordingUi {
    fn approving() -> Self {
        Self {
            screens: Vec::new(),
            reject_at: None,
            expand_details: true,
            skip_hold: false,
        }
    }

    fn rejecting_at(screen: usize) -> Self {
        Self {
            reject_at: Some(screen),
            ..Self::approving()
        }
    }

    fn ids(&self) -> Vec<&'static str> {
        self.screens.iter().map(Screen::id).collect()
    }

    /// Every (label, text) line shown
    fn lines(&self) -> Vec<(String, String)> {
        self.screens
            .iter()
            .filter_map(|screen| match screen {
                Screen::Properties { items, .. } => Some(items),
                _ => None,
            })
            .flatten()
            .map(|item| (item.label.clone(), item.value.to_string()))
            .collect()
    }

    fn value_of(&self, label: &str) -> Option<String> {
        self.lines()
            .into_iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }
}

impl ConfirmationUi for RecordingUi {
    fn confirm(&mut self, screen: &Screen) -> UserAction {
        self.screens.push(screen.clone());
        if self.reject_at == Some(self.screens.len()) {
            return UserAction::Reject;
        }
        match screen {
            Screen::ShowMore { .. } if self.expand_details => UserAction::ShowDetails,
            _ if screen.requires_hold() && !self.skip_hold => UserAction::Hold,
            _ => UserAction::Confirm,
        }
    }
}

struct Device {
    keychain: Slip10Keychain,
    path: DerivationPath,
    pubkey: Pubkey,
}

fn device() -> Device {
    let keychain = Slip10Keychain::from_mnemonic(MNEMONIC, "").unwrap();
    let path = DerivationPath::solana(0);
    let pubkey = *keychain.derive(&path).unwrap().public_key();
    Device {
        keychain,
        path,
        pubkey,
    }
}

fn program(id: &str) -> Pubkey {
    pubkey_from_base58(id).unwrap()
}

fn request(device: &Device, serialized_tx: Vec<u8>) -> SignTxRequest {
    SignTxRequest {
        address_n: device.path.address_n(),
        serialized_tx,
    }
}

fn transfer_data(amount: u64) -> Vec<u8> {
    let mut data = vec![3];
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

fn unit_price(micro_lamports: u64) -> Vec<u8> {
    let mut data = vec![compute_budget::INS_SET_COMPUTE_UNIT_PRICE as u8];
    data.extend_from_slice(&micro_lamports.to_le_bytes());
    data
}

fn unit_limit(units: u32) -> Vec<u8> {
    let mut data = vec![compute_budget::INS_SET_COMPUTE_UNIT_LIMIT as u8];
    data.extend_from_slice(&units.to_le_bytes());
    data
}

#[test]
fn system_program_transfer_is_blind_signed() {
    let device = device();
    let mut data = vec![2, 0, 0, 0];
    data.extend_from_slice(&1_000_000u64.to_le_bytes());
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address([8u8; 32])
        .with_address(program(SYSTEM_PROGRAM_ID))
        .with_blockhash([1u8; 32])
        .with_instruction(2, vec![0, 1], data.clone())
        .build();

    let mut ui = RecordingUi::approving();
    let signature = sign_tx(
        &request(&device, bytes.clone()),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    assert_eq!(
        ui.ids(),
        vec![
            "warning_blind_signing",
            "confirm_unsupported_instruction",
            "instruction_data",
            "instruction_accounts",
            "confirm_transaction",
        ]
    );
    assert_eq!(ui.screens[1].title(), Some("1/1: Unsupported program"));
    match &ui.screens[2] {
        Screen::Properties { items, .. } => assert_eq!(items[0].value, DisplayValue::Bytes(data)),
        other => panic!("unexpected screen {:?}", other),
    }
    assert_eq!(
        ui.value_of("Account 1 (m/44'/501'/0'/0') (Writable, Signer):"),
        Some(to_base58(&device.pubkey))
    );
    assert_eq!(ui.value_of("Account 2 (Writable):"), Some(to_base58(&[8u8; 32])));

    let verifying_key = VerifyingKey::from_bytes(&device.pubkey).unwrap();
    assert!(verifying_key
        .verify(&bytes, &Signature::from_bytes(&signature.signature))
        .is_ok());
}

#[test]
fn compute_budget_data_one_byte_short_shows_nothing() {
    let device = device();
    let mut data = unit_limit(300_000);
    data.pop();
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_instruction(1, vec![], data)
        .build();

    let mut ui = RecordingUi::approving();
    let err = sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::MalformedTransaction);
    assert_eq!(err.category(), FailureCategory::DataError);
    assert!(ui.screens.is_empty());
}

#[test]
fn first_compute_unit_price_wins() {
    let device = device();
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_instruction(1, vec![], unit_price(1_000_000))
        .with_instruction(1, vec![], unit_price(5_000_000))
        .build();

    let mut ui = RecordingUi::approving();
    sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    // 5000 base + 1 lamport/unit over the default 200 000 units
    assert_eq!(ui.value_of("Expected fee:"), Some("205000 lamports".to_string()));
    assert_eq!(ui.screens[0].title(), Some("1/2: Set compute unit price"));
    assert_eq!(ui.screens[1].title(), Some("2/2: Set compute unit price"));
}

#[test]
fn owner_equal_to_device_key_is_not_shown() {
    let device = device();
    let source = [2u8; 32];
    let destination = [3u8; 32];
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address(source)
        .with_address(destination)
        .with_address(program(token::TOKEN_PROGRAM_ID))
        .with_instruction(3, vec![1, 2, 0], transfer_data(1_000_000))
        .build();

    let mut ui = RecordingUi::approving();
    sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    assert_eq!(ui.ids()[0], "confirm_deprecated_warning");
    assert_eq!(ui.value_of("Recipient:"), Some(to_base58(&destination)));
    assert_eq!(ui.value_of("Amount:"), Some("1,000,000".to_string()));
    assert_eq!(ui.value_of("From:"), Some(to_base58(&source)));
    assert_eq!(ui.value_of("Owner:"), None);
}

#[test]
fn foreign_owner_is_shown() {
    let device = device();
    let owner = [4u8; 32];
    let bytes = MessageBuilder::legacy(1, 0, 2)
        .with_address(device.pubkey)
        .with_address([2u8; 32])
        .with_address([3u8; 32])
        .with_address(owner)
        .with_address(program(token::TOKEN_PROGRAM_ID))
        .with_instruction(4, vec![1, 2, 3], transfer_data(5))
        .build();

    let mut ui = RecordingUi::approving();
    sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    assert_eq!(ui.value_of("Owner:"), Some(to_base58(&owner)));
}

#[test]
fn rejecting_a_screen_cancels_signing() {
    let device = device();
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_instruction(1, vec![], unit_limit(1000))
        .with_instruction(1, vec![], unit_price(1000))
        .build();

    let mut ui = RecordingUi::rejecting_at(2);
    let err = sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::ActionCancelled);
    assert!(err.is_cancelled());
    assert_eq!(ui.screens.len(), 2);
}

#[test]
fn tapping_the_final_screen_does_not_sign() {
    let device = device();
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_instruction(1, vec![], unit_limit(1000))
        .build();

    let mut ui = RecordingUi {
        skip_hold: true,
        ..RecordingUi::approving()
    };
    let err = sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidDisplayState);
    assert_eq!(ui.ids().last(), Some(&"confirm_transaction"));
}

#[test]
fn lookup_table_destination_is_explained() {
    let device = device();
    let table = [9u8; 32];
    let bytes = MessageBuilder::v0(1, 0, 1)
        .with_address(device.pubkey)
        .with_address([2u8; 32])
        .with_address(program(token::TOKEN_PROGRAM_ID))
        // index 3 is the first writable lookup entry
        .with_instruction(2, vec![1, 3, 0], transfer_data(7))
        .with_lookup_table(table, vec![4], vec![])
        .build();

    let mut ui = RecordingUi::approving();
    sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    assert_eq!(
        ui.value_of("Recipient is provided via a lookup table."),
        Some(String::new())
    );
    assert_eq!(ui.value_of("Lookup table address:"), Some(to_base58(&table)));
    assert_eq!(ui.value_of("Account index:"), Some("4".to_string()));
}

#[test]
fn multisig_transfer_lists_signers() {
    let device = device();
    let cosigner = [8u8; 32];
    let multisig = [5u8; 32];
    let bytes = MessageBuilder::legacy(2, 0, 1)
        .with_address(device.pubkey)
        .with_address(cosigner)
        .with_address([2u8; 32])
        .with_address([3u8; 32])
        .with_address(multisig)
        .with_address(program(token::TOKEN_PROGRAM_ID))
        .with_instruction(5, vec![2, 3, 4, 0, 1], transfer_data(42))
        .build();

    let mut ui = RecordingUi::approving();
    sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    let ids = ui.ids();
    assert_eq!(ids[0], "multiple_signers");
    assert!(ids.contains(&"confirm_multisig"));
    assert_eq!(ui.value_of("Owner:"), Some(to_base58(&multisig)));
    assert_eq!(
        ui.value_of("Signer 1 (m/44'/501'/0'/0'):"),
        Some(to_base58(&device.pubkey))
    );
    assert_eq!(ui.value_of("Signer 2:"), Some(to_base58(&cosigner)));
    assert_eq!(ui.value_of("Expected fee:"), Some("10000 lamports".to_string()));
}

#[test]
fn final_screen_summarizes_request() {
    let device = device();
    let blockhash = [6u8; 32];
    let bytes = MessageBuilder::legacy(1, 0, 1)
        .with_address(device.pubkey)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_blockhash(blockhash)
        .with_instruction(1, vec![], unit_limit(50_000))
        .build();

    let mut ui = RecordingUi::approving();
    let first = sign_tx(
        &request(&device, bytes.clone()),
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap();

    let last = ui.screens.last().unwrap();
    assert_eq!(last.id(), "confirm_transaction");
    assert!(last.requires_hold());
    assert_eq!(ui.value_of("Blockhash:"), Some(to_base58(&blockhash)));
    assert_eq!(ui.value_of("Signer account:"), Some("#1".to_string()));
    assert_eq!(ui.value_of("Signer address:"), Some(to_base58(&device.pubkey)));

    let second = sign_tx(
        &request(&device, bytes),
        &device.keychain,
        &mut RecordingUi::approving(),
        &SigningSettings::default(),
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn non_hardened_path_is_refused_before_decoding() {
    let device = device();
    let mut ui = RecordingUi::approving();
    let err = sign_tx(
        &SignTxRequest {
            address_n: vec![0x8000_002c, 0x8000_01f5, 0],
            serialized_tx: vec![0xff],
        },
        &device.keychain,
        &mut ui,
        &SigningSettings::default(),
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidPath);
    assert!(ui.screens.is_empty());
}
