//! Signing Configuration
//!
//! Fee constants and logging switches for one signing session:
//! - `standard()` preset matching mainnet fee rules
//! - Builder-style overrides
//! - JSON (de)serialization for tool configs
//!
//! Settings are passed explicitly; nothing here is global.

use crate::error::{SignerError, SignerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lamports charged per writable signer
pub const BASE_FEE_LAMPORTS: u64 = 5_000;
/// Compute units assumed when no limit instruction is found
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 200_000;
/// Leading instructions searched for compute budget settings
pub const FEE_SCAN_WINDOW: usize = 3;
/// Unit price is denominated in micro-lamports
pub const MICRO_LAMPORTS_PER_LAMPORT: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSettings {
    pub base_fee_lamports: u64,
    pub default_compute_unit_limit: u32,
    pub fee_scan_window: usize,
    pub micro_lamports_per_lamport: u64,
    /// Emit `LogLevel::Debug` lines
    pub debug_logging: bool,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self::standard()
    }
}

impl SigningSettings {
    pub fn standard() -> Self {
        Self {
            base_fee_lamports: BASE_FEE_LAMPORTS,
            default_compute_unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
            fee_scan_window: FEE_SCAN_WINDOW,
            micro_lamports_per_lamport: MICRO_LAMPORTS_PER_LAMPORT,
            debug_logging: false,
        }
    }

    pub fn with_base_fee(mut self, lamports: u64) -> Self {
        self.base_fee_lamports = lamports;
        self
    }

    pub fn with_default_compute_unit_limit(mut self, units: u32) -> Self {
        self.default_compute_unit_limit = units;
        self
    }

    pub fn with_fee_scan_window(mut self, instructions: usize) -> Self {
        self.fee_scan_window = instructions;
        self
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// Reject settings that would make the fee formula meaningless
    pub fn validate(&self) -> SignerResult<()> {
        if self.micro_lamports_per_lamport == 0 {
            return Err(SignerError::invalid_config(
                "micro_lamports_per_lamport must be non-zero",
            ));
        }
        if self.fee_scan_window == 0 {
            return Err(SignerError::invalid_config("fee_scan_window must be at least 1"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> SignerResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| SignerError::invalid_config("Invalid settings").with_details(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> SignerResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SignerError::invalid_config("Cannot read settings")
                .with_details(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> SignerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
