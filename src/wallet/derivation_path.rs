//! Key Derivation Paths
//!
//! Parses and formats SLIP-0010 paths for Solana keys. Ed25519 derivation
//! is hardened-only, so every component must carry the hardened bit.

use crate::error::{SignerError, SignerResult};
use std::fmt;
use std::str::FromStr;

pub const BIP44_PURPOSE: u32 = 44;
/// SLIP-0044 coin type
pub const SOLANA_COIN_TYPE: u32 = 501;

/// Hardened offset for BIP-32 derivation
pub const HARDENED: u32 = 0x80000000;

/// Position of the account component in `m/44'/501'/account'/...`
const ACCOUNT_INDEX: usize = 2;

pub fn harden(index: u32) -> u32 {
    index | HARDENED
}

pub fn unharden(index: u32) -> u32 {
    index & !HARDENED
}

/// Single component of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationComponent {
    pub index: u32,
    pub hardened: bool,
}

impl DerivationComponent {
    pub fn new(index: u32, hardened: bool) -> Self {
        Self { index, hardened }
    }

    /// Index including the hardened bit
    pub fn full_index(&self) -> u32 {
        if self.hardened {
            harden(self.index)
        } else {
            self.index
        }
    }

    pub fn from_full_index(full: u32) -> Self {
        Self::new(unharden(full), full & HARDENED != 0)
    }
}

impl fmt::Display for DerivationComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    pub components: Vec<DerivationComponent>,
}

impl DerivationPath {
    /// `m/44'/501'/{account}'/0'`
    pub fn solana(account: u32) -> Self {
        Self::from_address_n(&[
            harden(BIP44_PURPOSE),
            harden(SOLANA_COIN_TYPE),
            harden(account),
            harden(0),
        ])
    }

    pub fn from_address_n(address_n: &[u32]) -> Self {
        Self {
            components: address_n
                .iter()
                .copied()
                .map(DerivationComponent::from_full_index)
                .collect(),
        }
    }

    /// Full indices as carried in signing requests
    pub fn address_n(&self) -> Vec<u32> {
        self.components.iter().map(DerivationComponent::full_index).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Unhardened account index, if the path is long enough
    pub fn account(&self) -> Option<u32> {
        self.components.get(ACCOUNT_INDEX).map(|c| c.index)
    }

    pub fn is_fully_hardened(&self) -> bool {
        self.components.iter().all(|c| c.hardened)
    }

    /// Non-fatal remarks about unusual paths
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(purpose) = self.components.first() {
            if purpose.index != BIP44_PURPOSE {
                warnings.push(format!("Non-standard purpose: {}. Solana uses 44", purpose.index));
            }
        }
        if let Some(coin_type) = self.components.get(1) {
            if coin_type.index != SOLANA_COIN_TYPE {
                warnings.push(format!(
                    "Coin type {} is not standard for Solana (expected {})",
                    coin_type.index, SOLANA_COIN_TYPE
                ));
            }
        }
        if let Some(account) = self.account() {
            if account > 100 {
                warnings.push(format!("Unusual account number: {}. Most wallets use 0", account));
            }
        }

        warnings
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = SignerError;

    fn from_str(path: &str) -> SignerResult<Self> {
        let trimmed = path.trim();

        let rest = trimmed
            .strip_prefix("m/")
            .or_else(|| trimmed.strip_prefix("M/"))
            .ok_or_else(|| SignerError::invalid_path("Derivation path must start with 'm/'"))?;
        if rest.is_empty() {
            return Err(SignerError::invalid_path("Empty derivation path"));
        }

        let components = rest
            .split('/')
            .map(parse_component)
            .collect::<SignerResult<Vec<_>>>()?;

        Ok(Self { components })
    }
}

fn parse_component(s: &str) -> SignerResult<DerivationComponent> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(SignerError::invalid_path("Empty path component"));
    }

    let (number_str, hardened) = match trimmed.strip_suffix(&['\'', 'h', 'H'][..]) {
        Some(number) => (number, true),
        None => (trimmed, false),
    };

    let index: u32 = number_str.parse().map_err(|e| {
        SignerError::invalid_path(format!("Invalid path component '{}'", s)).with_details(format!("{}", e))
    })?;

    if index >= HARDENED {
        return Err(SignerError::invalid_path(format!(
            "Path component {} exceeds maximum value",
            index
        )));
    }

    Ok(DerivationComponent::new(index, hardened))
}

/// `m/44'/501'/0'/0'` form of a raw path
pub fn address_n_to_str(address_n: &[u32]) -> String {
    DerivationPath::from_address_n(address_n).to_string()
}
