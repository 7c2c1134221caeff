//! Signing Orchestrator
//!
//! Drives a signing request from raw bytes to a signature:
//!
//! 1. Derive the device keypair for the requested path
//! 2. Decode the message
//! 3. Plan the confirmation screens
//! 4. Walk the plan through `SigningFlow`
//! 5. Sign the original bytes once every screen is approved
//!
//! Hosts that render screens asynchronously can drive `SigningFlow`
//! themselves instead of going through `sign_tx`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{SignerError, SignerResult};
use crate::fees::estimate_fee;
use crate::tx::Transaction;
use crate::ui::sequencer::{self, SignerIdentity};
use crate::ui::{ConfirmationUi, Screen, UserAction};
use crate::utils::SigningSettings;
use crate::wallet::{DerivationPath, Keychain};
use crate::{log_debug, log_info, log_warn};

/// Host request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignTxRequest {
    pub address_n: Vec<u32>,
    #[serde(with = "crate::serde_bytes::hex_vec")]
    pub serialized_tx: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    #[serde(with = "crate::serde_bytes::hex64")]
    pub signature: [u8; 64],
}

/// Outcome of one flow transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Prompt(Screen),
    Approved,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    NotStarted,
    Awaiting,
    Approved,
    Cancelled,
}

/// Confirmation state machine over a screen plan
#[derive(Debug)]
pub struct SigningFlow {
    pending: VecDeque<Screen>,
    current: Option<Screen>,
    state: FlowState,
}

impl SigningFlow {
    pub fn new(screens: Vec<Screen>) -> Self {
        Self {
            pending: screens.into(),
            current: None,
            state: FlowState::NotStarted,
        }
    }

    /// Plan `transaction` for the given device key
    pub fn for_transaction(
        transaction: &Transaction,
        signer: SignerIdentity<'_>,
        settings: &SigningSettings,
    ) -> SignerResult<Self> {
        let fee = estimate_fee(transaction, settings);
        log_debug!("signing", "fee estimated", fee = fee);
        Ok(Self::new(sequencer::plan(transaction, signer, fee)?))
    }

    pub fn start(&mut self) -> SignerResult<Step> {
        if self.state != FlowState::NotStarted {
            return Err(SignerError::invalid_display("Signing flow already started"));
        }
        Ok(self.next_step())
    }

    pub fn advance(&mut self, action: UserAction) -> SignerResult<Step> {
        if self.state != FlowState::Awaiting {
            return Err(SignerError::invalid_display("Signing flow is not awaiting input")
                .with_details(format!("{:?}", self.state)));
        }

        let current = self.current.take();
        match action {
            UserAction::Confirm => match current {
                Some(screen) if screen.requires_hold() => {
                    self.terminate(FlowState::Cancelled);
                    Err(SignerError::invalid_display("Screen requires hold confirmation")
                        .with_details(screen.id().to_string()))
                }
                _ => Ok(self.next_step()),
            },
            UserAction::Hold => Ok(self.next_step()),
            UserAction::ShowDetails => match current {
                Some(Screen::ShowMore { details, .. }) => {
                    for screen in details.into_iter().rev() {
                        self.pending.push_front(screen);
                    }
                    Ok(self.next_step())
                }
                other => {
                    self.terminate(FlowState::Cancelled);
                    Err(SignerError::invalid_display("Screen has no details")
                        .with_details(other.map(|s| s.id()).unwrap_or("none").to_string()))
                }
            },
            UserAction::Reject | UserAction::HostCancel => {
                log_info!("signing", "flow cancelled", action = format!("{:?}", action));
                self.terminate(FlowState::Cancelled);
                Ok(Step::Cancelled)
            }
        }
    }

    /// Screens not yet shown
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, FlowState::Approved | FlowState::Cancelled)
    }

    fn next_step(&mut self) -> Step {
        match self.pending.pop_front() {
            Some(screen) => {
                self.state = FlowState::Awaiting;
                self.current = Some(screen.clone());
                Step::Prompt(screen)
            }
            None => {
                self.terminate(FlowState::Approved);
                Step::Approved
            }
        }
    }

    fn terminate(&mut self, state: FlowState) {
        self.pending.clear();
        self.current = None;
        self.state = state;
    }
}

/// Confirm and sign a serialized message
pub fn sign_tx(
    request: &SignTxRequest,
    keychain: &impl Keychain,
    ui: &mut impl ConfirmationUi,
    settings: &SigningSettings,
) -> SignerResult<TxSignature> {
    settings.validate()?;

    let path = DerivationPath::from_address_n(&request.address_n);
    for warning in path.warnings() {
        log_warn!("signing", "unusual derivation path", path = path.to_string(), warning = warning);
    }
    let keypair = keychain.derive(&path)?;

    let transaction = Transaction::decode(&request.serialized_tx)?;

    let signer = SignerIdentity {
        address_n: &request.address_n,
        pubkey: keypair.public_key(),
    };
    let mut flow = SigningFlow::for_transaction(&transaction, signer, settings)?;

    let mut step = flow.start()?;
    let mut shown = 0usize;
    loop {
        match step {
            Step::Prompt(screen) => {
                shown += 1;
                let action = ui.confirm(&screen);
                step = flow.advance(action)?;
            }
            Step::Approved => break,
            Step::Cancelled => {
                return Err(SignerError::cancelled("Signing cancelled")
                    .with_details(format!("after {} screens", shown)));
            }
        }
    }

    let signature = keychain.sign(&keypair, &request.serialized_tx)?;
    log_info!(
        "signing",
        "transaction signed",
        screens = shown,
        signer_address = crate::types::to_base58(keypair.public_key())
    );
    Ok(TxSignature { signature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn metadata(id: &'static str) -> Screen {
        Screen::Metadata {
            id,
            title: id.to_string(),
            message: String::new(),
        }
    }

    fn show_more(details: Vec<Screen>) -> Screen {
        Screen::ShowMore {
            id: "more",
            title: "more".to_string(),
            summary: String::new(),
            button: "Show details",
            details,
        }
    }

    fn held(id: &'static str) -> Screen {
        Screen::Properties {
            id,
            title: id.to_string(),
            items: Vec::new(),
            hold: true,
        }
    }

    fn prompt_id(step: &Step) -> &'static str {
        match step {
            Step::Prompt(screen) => screen.id(),
            other => panic!("expected prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_confirm_walks_plan_in_order() {
        let mut flow = SigningFlow::new(vec![metadata("a"), metadata("b")]);
        assert_eq!(prompt_id(&flow.start().unwrap()), "a");
        assert_eq!(prompt_id(&flow.advance(UserAction::Confirm).unwrap()), "b");
        assert_eq!(flow.advance(UserAction::Confirm).unwrap(), Step::Approved);
        assert!(flow.is_finished());
    }

    #[test]
    fn test_show_details_inserts_before_rest() {
        let mut flow = SigningFlow::new(vec![
            show_more(vec![metadata("d1"), metadata("d2")]),
            metadata("final"),
        ]);
        assert_eq!(prompt_id(&flow.start().unwrap()), "more");
        assert_eq!(prompt_id(&flow.advance(UserAction::ShowDetails).unwrap()), "d1");
        assert_eq!(prompt_id(&flow.advance(UserAction::Confirm).unwrap()), "d2");
        assert_eq!(prompt_id(&flow.advance(UserAction::Confirm).unwrap()), "final");
    }

    #[test]
    fn test_confirm_skips_details() {
        let mut flow = SigningFlow::new(vec![show_more(vec![metadata("d1")]), metadata("final")]);
        flow.start().unwrap();
        assert_eq!(prompt_id(&flow.advance(UserAction::Confirm).unwrap()), "final");
    }

    #[test]
    fn test_reject_is_terminal() {
        let mut flow = SigningFlow::new(vec![metadata("a"), metadata("b")]);
        flow.start().unwrap();
        assert_eq!(flow.advance(UserAction::Reject).unwrap(), Step::Cancelled);
        assert_eq!(flow.remaining(), 0);

        let err = flow.advance(UserAction::Confirm).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDisplayState);
    }

    #[test]
    fn test_host_cancel_is_terminal() {
        let mut flow = SigningFlow::new(vec![metadata("a")]);
        flow.start().unwrap();
        assert_eq!(flow.advance(UserAction::HostCancel).unwrap(), Step::Cancelled);
        assert!(flow.start().is_err());
    }

    #[test]
    fn test_show_details_on_plain_screen_fails() {
        let mut flow = SigningFlow::new(vec![metadata("a"), metadata("b")]);
        flow.start().unwrap();
        assert!(flow.advance(UserAction::ShowDetails).is_err());
        assert!(flow.is_finished());
    }

    #[test]
    fn test_hold_screen_rejects_plain_confirm() {
        let mut flow = SigningFlow::new(vec![metadata("a"), held("final")]);
        flow.start().unwrap();
        assert_eq!(prompt_id(&flow.advance(UserAction::Confirm).unwrap()), "final");

        let err = flow.advance(UserAction::Confirm).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDisplayState);
        assert!(flow.is_finished());
        assert!(flow.advance(UserAction::Hold).is_err());
    }

    #[test]
    fn test_hold_approves() {
        let mut flow = SigningFlow::new(vec![metadata("a"), held("final")]);
        flow.start().unwrap();
        assert_eq!(prompt_id(&flow.advance(UserAction::Hold).unwrap()), "final");
        assert_eq!(flow.advance(UserAction::Hold).unwrap(), Step::Approved);
    }

    #[test]
    fn test_request_json_shape() {
        let request: SignTxRequest =
            serde_json::from_str(r#"{"address_n":[2147483692],"serialized_tx":"0102"}"#).unwrap();
        assert_eq!(request.serialized_tx, vec![1, 2]);
        assert_eq!(request.address_n, vec![2147483692]);
    }
}
