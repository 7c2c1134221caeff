//! `sol-signer`: drive the signing core from the command line
//!
//! Every screen is printed and approved automatically unless `--reject-at`
//! names the screen to refuse. Exit codes: 0 signed, 2 cancelled, 1 error.

use std::path::PathBuf;
use std::process::ExitCode;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use serde_json::json;

use sol_signer_core::instructions::programs::{compute_budget, memo};
use sol_signer_core::tx::MessageBuilder;
use sol_signer_core::types::pubkey_from_base58;
use sol_signer_core::utils::logging;
use sol_signer_core::{
    sign_tx, ConfirmationUi, DerivationPath, Keychain, Screen, SignTxRequest, SignerError,
    SignerResult, SigningSettings, Slip10Keychain, UserAction,
};

/// BIP-39 test vector phrase; development use only
const DEMO_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

#[derive(Parser, Debug)]
#[command(name = "sol-signer", version, about = "Review and sign a serialized Solana message")]
struct Cli {
    /// Serialized message, hex or base64
    #[arg(long, required_unless_present = "build_demo")]
    tx: Option<String>,

    #[arg(long, default_value = "m/44'/501'/0'/0'")]
    path: String,

    #[arg(long, default_value = DEMO_MNEMONIC)]
    mnemonic: String,

    #[arg(long, default_value = "")]
    passphrase: String,

    /// Reject the N-th screen (1-based)
    #[arg(long)]
    reject_at: Option<usize>,

    /// Emit a single JSON document
    #[arg(long)]
    json: bool,

    /// JSON file with signing settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    debug: bool,

    /// Print a sample message for the derived key and exit
    #[arg(long)]
    build_demo: bool,
}

/// Approves everything except the screen at `reject_at`
struct ScriptedUi {
    reject_at: Option<usize>,
    echo: bool,
    screens: Vec<Screen>,
}

impl ConfirmationUi for ScriptedUi {
    fn confirm(&mut self, screen: &Screen) -> UserAction {
        self.screens.push(screen.clone());
        let number = self.screens.len();
        if self.echo {
            println!("--- screen {} [{}]", number, screen.id());
            println!("{}", screen);
        }

        if self.reject_at == Some(number) {
            return UserAction::Reject;
        }
        match screen {
            Screen::ShowMore { .. } => UserAction::ShowDetails,
            _ if screen.requires_hold() => UserAction::Hold,
            _ => UserAction::Confirm,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => return report_error(&cli, &[], &e),
    };
    if cli.debug || settings.debug_logging {
        logging::enable_debug();
    }

    let setup = Slip10Keychain::from_mnemonic(&cli.mnemonic, &cli.passphrase)
        .and_then(|keychain| Ok((keychain, cli.path.parse::<DerivationPath>()?)));
    let (keychain, path) = match setup {
        Ok(setup) => setup,
        Err(e) => return report_error(&cli, &[], &e),
    };

    if cli.build_demo {
        return match demo_message(&keychain, &path) {
            Ok(bytes) => {
                println!("{}", hex::encode(bytes));
                ExitCode::SUCCESS
            }
            Err(e) => report_error(&cli, &[], &e),
        };
    }

    let serialized_tx = match cli.tx.as_deref().map(decode_tx_arg) {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => return report_error(&cli, &[], &e),
        None => {
            return report_error(&cli, &[], &SignerError::malformed("No transaction given"));
        }
    };

    let request = SignTxRequest {
        address_n: path.address_n(),
        serialized_tx,
    };
    let mut ui = ScriptedUi {
        reject_at: cli.reject_at,
        echo: !cli.json,
        screens: Vec::new(),
    };

    match sign_tx(&request, &keychain, &mut ui, &settings) {
        Ok(signature) => {
            if cli.json {
                let output = json!({ "screens": ui.screens, "signature": signature });
                println!("{}", output);
            } else {
                println!("Signature: {}", hex::encode(signature.signature));
            }
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&cli, &ui.screens, &e),
    }
}

fn load_settings(cli: &Cli) -> SignerResult<SigningSettings> {
    let settings = match &cli.config {
        Some(path) => SigningSettings::load(path)?,
        None => SigningSettings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

/// Hex (optionally `0x`-prefixed) first, then standard base64
fn decode_tx_arg(text: &str) -> SignerResult<Vec<u8>> {
    let trimmed = text.trim();
    let unprefixed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if let Ok(bytes) = hex::decode(unprefixed) {
        return Ok(bytes);
    }
    STANDARD.decode(trimmed).map_err(|e| {
        SignerError::malformed("Transaction is neither hex nor base64").with_details(e.to_string())
    })
}

/// Compute budget plus a memo, paid by the derived key
fn demo_message(keychain: &Slip10Keychain, path: &DerivationPath) -> SignerResult<Vec<u8>> {
    let keypair = keychain.derive(path)?;
    let program = |id: &str| {
        pubkey_from_base58(id).ok_or_else(|| SignerError::internal("Invalid program id").with_details(id.to_string()))
    };

    let mut unit_limit = vec![compute_budget::INS_SET_COMPUTE_UNIT_LIMIT as u8];
    unit_limit.extend_from_slice(&200_000u32.to_le_bytes());
    let mut unit_price = vec![compute_budget::INS_SET_COMPUTE_UNIT_PRICE as u8];
    unit_price.extend_from_slice(&10_000u64.to_le_bytes());

    let bytes = MessageBuilder::legacy(1, 0, 2)
        .with_address(*keypair.public_key())
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID)?)
        .with_address(program(memo::MEMO_PROGRAM_ID)?)
        .with_blockhash([0x42; 32])
        .with_instruction(1, vec![], unit_limit)
        .with_instruction(1, vec![], unit_price)
        .with_instruction(2, vec![0], b"sol-signer demo".to_vec())
        .build();
    Ok(bytes)
}

fn report_error(cli: &Cli, screens: &[Screen], error: &SignerError) -> ExitCode {
    if cli.json {
        println!("{}", json!({ "screens": screens, "error": error }));
    } else {
        eprintln!("Error: {}", error);
    }

    if error.is_cancelled() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
