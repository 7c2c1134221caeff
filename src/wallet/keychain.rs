//! Keychain
//!
//! The signing core only needs two capabilities from the key subsystem:
//! derive a keypair for a path and sign raw bytes with it. `Slip10Keychain`
//! is the software implementation used by the CLI and tests.
//!
//! SECURITY: seeds and secret keys are zeroized on drop.

use bip39::Mnemonic;
use ed25519_dalek::{Signer, SigningKey};
use hmac::{Hmac, Mac};
use zeroize::{Zeroize, Zeroizing};

use super::derivation_path::{DerivationPath, HARDENED};
use crate::error::{SignerError, SignerResult};
use crate::types::Pubkey;

type HmacSha512 = Hmac<sha2::Sha512>;

/// SLIP-0010 master key domain for Ed25519
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Derived Ed25519 keypair
pub struct Keypair {
    secret: Zeroizing<[u8; 32]>,
    public: Pubkey,
}

impl Keypair {
    pub fn from_secret(secret: [u8; 32]) -> Self {
        let secret = Zeroizing::new(secret);
        let public = SigningKey::from_bytes(&secret).verifying_key().to_bytes();
        Self { secret, public }
    }

    pub fn public_key(&self) -> &Pubkey {
        &self.public
    }

    pub fn secret(&self) -> &[u8; 32] {
        &self.secret
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &bs58::encode(self.public).into_string())
            .finish_non_exhaustive()
    }
}

/// Key derivation and raw signing
pub trait Keychain {
    fn derive(&self, path: &DerivationPath) -> SignerResult<Keypair>;

    /// Ed25519 signature over `message`
    fn sign(&self, keypair: &Keypair, message: &[u8]) -> SignerResult<[u8; 64]> {
        let signing_key = SigningKey::from_bytes(keypair.secret());
        Ok(signing_key.sign(message).to_bytes())
    }
}

/// Software SLIP-0010 keychain over a BIP-39 seed
pub struct Slip10Keychain {
    seed: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for Slip10Keychain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slip10Keychain").finish_non_exhaustive()
    }
}

impl Slip10Keychain {
    pub fn from_seed(seed: &[u8]) -> SignerResult<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(SignerError::crypto_error("Seed must be 16 to 64 bytes")
                .with_details(format!("got {} bytes", seed.len())));
        }
        Ok(Self {
            seed: Zeroizing::new(seed.to_vec()),
        })
    }

    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> SignerResult<Self> {
        let mnemonic = Mnemonic::parse_normalized(phrase)?;
        let seed = Zeroizing::new(mnemonic.to_seed_normalized(passphrase));
        Self::from_seed(seed.as_ref())
    }

    fn master(&self) -> SignerResult<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>)> {
        hmac_split(ED25519_SEED_KEY, &[self.seed.as_slice()])
    }
}

impl Keychain for Slip10Keychain {
    fn derive(&self, path: &DerivationPath) -> SignerResult<Keypair> {
        if !path.is_fully_hardened() {
            return Err(SignerError::invalid_path("Ed25519 only supports hardened derivation")
                .with_details(path.to_string()));
        }

        let (mut key, mut chain_code) = self.master()?;
        for index in path.address_n() {
            // 0x00 || key || ser32(index)
            let index = (index | HARDENED).to_be_bytes();
            let (child_key, child_chain) =
                hmac_split(&chain_code[..], &[&[0x00][..], &key[..], &index[..]])?;
            key = child_key;
            chain_code = child_chain;
        }

        Ok(Keypair::from_secret(*key))
    }
}

fn hmac_split(
    key: &[u8],
    parts: &[&[u8]],
) -> SignerResult<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>)> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| SignerError::crypto_error("HMAC initialization failed").with_details(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut output = mac.finalize().into_bytes();

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = Zeroizing::new([0u8; 32]);
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    output.as_mut_slice().zeroize();
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    const SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn keychain() -> Slip10Keychain {
        Slip10Keychain::from_seed(&hex::decode(SEED).unwrap()).unwrap()
    }

    #[test]
    fn test_slip10_vector_master() {
        let master = keychain().derive(&DerivationPath::from_address_n(&[])).unwrap();
        assert_eq!(
            hex::encode(master.secret()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.public_key()),
            "a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
        );
    }

    #[test]
    fn test_slip10_vector_first_child() {
        let path: DerivationPath = "m/0'".parse().unwrap();
        let child = keychain().derive(&path).unwrap();
        assert_eq!(
            hex::encode(child.secret()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.public_key()),
            "8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c"
        );
    }

    #[test]
    fn test_unhardened_path_rejected() {
        let path: DerivationPath = "m/44'/501'/0'/0".parse().unwrap();
        let err = keychain().derive(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPath);
    }

    #[test]
    fn test_signature_verifies() {
        let keychain = keychain();
        let keypair = keychain.derive(&DerivationPath::solana(0)).unwrap();
        let signature = keychain.sign(&keypair, b"message").unwrap();

        let verifying_key = VerifyingKey::from_bytes(keypair.public_key()).unwrap();
        assert!(verifying_key
            .verify(b"message", &Signature::from_bytes(&signature))
            .is_ok());
    }

    #[test]
    fn test_mnemonic_keychain() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let a = Slip10Keychain::from_mnemonic(phrase, "").unwrap();
        let b = Slip10Keychain::from_mnemonic(phrase, "TREZOR").unwrap();
        let path = DerivationPath::solana(0);
        assert_ne!(
            a.derive(&path).unwrap().public_key(),
            b.derive(&path).unwrap().public_key()
        );

        let err = Slip10Keychain::from_mnemonic("abandon abandon", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::CryptoError);
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = Keypair::from_secret([1u8; 32]);
        let debug = format!("{:?}", keypair);
        assert!(!debug.contains("secret"));
    }
}
