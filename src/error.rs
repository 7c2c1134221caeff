//! Unified error types for the signing core
//!
//! Every fatal condition flows through `SignerError` so the host can tell
//! "device refused to parse" apart from "user said no".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all signing operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl SignerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedTransaction, msg)
    }

    pub fn invalid_display(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDisplayState, msg)
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ActionCancelled, msg)
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPath, msg)
    }

    pub fn crypto_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CryptoError, msg)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }

    /// Failure class reported to the host
    pub fn category(&self) -> FailureCategory {
        self.code.category()
    }

    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::ActionCancelled
    }
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for SignerError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    MalformedTransaction,
    InvalidPath,
    InvalidConfig,

    // Registry / display contract violations
    InvalidDisplayState,

    // User or host refused
    ActionCancelled,

    // Crypto errors
    CryptoError,

    // Internal
    Internal,
}

impl ErrorCode {
    pub fn category(self) -> FailureCategory {
        match self {
            ErrorCode::MalformedTransaction | ErrorCode::InvalidPath | ErrorCode::InvalidConfig => {
                FailureCategory::DataError
            }
            ErrorCode::ActionCancelled => FailureCategory::Cancelled,
            ErrorCode::InvalidDisplayState | ErrorCode::CryptoError | ErrorCode::Internal => {
                FailureCategory::ProcessError
            }
        }
    }
}

/// Failure classes visible to host software
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// The request itself was unacceptable (bad bytes, bad path)
    DataError,
    /// The user rejected, or the host aborted
    Cancelled,
    /// The device failed while processing a well-formed request
    ProcessError,
}

/// Result type alias for signing operations
pub type SignerResult<T> = Result<T, SignerError>;

// Conversions from common error types

impl From<serde_json::Error> for SignerError {
    fn from(e: serde_json::Error) -> Self {
        SignerError::new(ErrorCode::InvalidConfig, e.to_string())
    }
}

impl From<hex::FromHexError> for SignerError {
    fn from(e: hex::FromHexError) -> Self {
        SignerError::malformed(format!("Hex error: {}", e))
    }
}

impl From<std::io::Error> for SignerError {
    fn from(e: std::io::Error) -> Self {
        SignerError::new(ErrorCode::Internal, e.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for SignerError {
    fn from(e: ed25519_dalek::SignatureError) -> Self {
        SignerError::crypto_error(format!("Ed25519 error: {}", e))
    }
}

impl From<bip39::Error> for SignerError {
    fn from(e: bip39::Error) -> Self {
        SignerError::new(ErrorCode::CryptoError, format!("BIP39 error: {}", e))
    }
}
