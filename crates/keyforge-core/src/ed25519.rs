//! Ed25519 signing and verification keys.
//!
//! Private keys carry an optional 32-byte chain code so SLIP-0010 child
//! derivation can continue from any generated or seed-derived key. Keys
//! built from bare 32/64-byte material have no chain code and cannot
//! derive children.

use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use keyforge_der::{oid, Writer};
use rand::rngs::OsRng;
use rand::RngCore as _;
use std::fmt;
use zeroize::Zeroize;

use crate::error::{BadKeyError, DeriveError};
use crate::mnemonic::Mnemonic;
use crate::{legacy, slip10};

pub const SIGNATURE_LENGTH: usize = 64;

/// Emitted DER prefix: the seed rides in a BIT STRING, the same layout as
/// the public key. Newer tooling writes PKCS#8 with a nested OCTET STRING
/// instead; decode accepts both, encode keeps emitting this form so keys
/// already in storage round-trip byte-for-byte.
pub(crate) const DER_PREFIX_PRIVATE: [u8; 15] = [
    0x30, 0x2d, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// PKCS#8 v1 prefix (seed nested in an OCTET STRING), accepted on decode.
pub(crate) const DER_PREFIX_PRIVATE_PKCS8: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04,
    0x20,
];

/// SubjectPublicKeyInfo prefix for a 32-byte Ed25519 point.
pub(crate) const DER_PREFIX_PUBLIC: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

pub struct Ed25519PrivateKey {
    signing_key: SigningKey,
    chain_code: Option<[u8; 32]>,
}

impl Ed25519PrivateKey {
    /// Generate a key from 64 bytes of CSPRNG entropy: the first half
    /// seeds the keypair, the second half becomes the chain code, so a
    /// freshly generated key can always derive children.
    pub fn generate() -> Self {
        let mut entropy = [0u8; 64];
        OsRng.fill_bytes(&mut entropy);

        let mut seed = [0u8; 32];
        let mut chain_code = [0u8; 32];
        seed.copy_from_slice(&entropy[..32]);
        chain_code.copy_from_slice(&entropy[32..]);
        entropy.zeroize();

        let key = Self::from_parts(seed, Some(chain_code));
        seed.zeroize();
        chain_code.zeroize();
        key
    }

    fn from_parts(seed: [u8; 32], chain_code: Option<[u8; 32]>) -> Self {
        Ed25519PrivateKey {
            signing_key: SigningKey::from_bytes(&seed),
            chain_code,
        }
    }

    /// Accepts a 32-byte seed or 64 bytes of seed ‖ public key.
    pub fn from_bytes_raw(data: &[u8]) -> Result<Self, BadKeyError> {
        match data.len() {
            32 | 64 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&data[..32]);
                let key = Self::from_parts(seed, None);
                seed.zeroize();
                Ok(key)
            }
            other => Err(BadKeyError::InvalidPrivateKeyLength(other)),
        }
    }

    /// Accepts the 47-byte emitted form or the 48-byte PKCS#8 form.
    pub fn from_bytes_der(data: &[u8]) -> Result<Self, BadKeyError> {
        let seed_bytes = match data.len() {
            47 if data[..15] == DER_PREFIX_PRIVATE => &data[15..],
            48 if data[..16] == DER_PREFIX_PRIVATE_PKCS8 => &data[16..],
            47 | 48 => return Err(BadKeyError::UnrecognizedPrefix),
            other => return Err(BadKeyError::InvalidPrivateKeyLength(other)),
        };
        let mut seed = [0u8; 32];
        seed.copy_from_slice(seed_bytes);
        let key = Self::from_parts(seed, None);
        seed.zeroize();
        Ok(key)
    }

    /// Root key from a master seed (SLIP-0010 `"ed25519 seed"` step).
    pub fn from_seed(seed: &[u8]) -> Self {
        let (mut key_seed, chain_code) = slip10::master_from_seed(seed);
        let key = Self::from_parts(key_seed, Some(chain_code));
        key_seed.zeroize();
        key
    }

    /// Root key from a mnemonic and passphrase.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Self {
        let seed = mnemonic.to_seed(passphrase);
        Self::from_seed(&seed[..])
    }

    /// Hardened child at `index`. Fails without a chain code and on an
    /// index that already carries the hardened bit.
    pub fn derive(&self, index: u32) -> Result<Self, DeriveError> {
        let chain_code = self.chain_code.ok_or(DeriveError::MissingChainCode)?;
        let mut seed = self.signing_key.to_bytes();
        let derived = slip10::derive_child(&seed, &chain_code, index);
        seed.zeroize();
        let (mut child_seed, child_chain) = derived?;
        let key = Self::from_parts(child_seed, Some(child_chain));
        child_seed.zeroize();
        Ok(key)
    }

    /// Child at `index` under the pre-HD PBKDF2 scheme. The result has no
    /// chain code.
    pub fn legacy_derive(&self, index: i64) -> Self {
        let mut seed = self.signing_key.to_bytes();
        let mut child_seed = legacy::derive(&seed, index);
        seed.zeroize();
        let key = Self::from_parts(child_seed, None);
        child_seed.zeroize();
        key
    }

    /// Detached signature, 64 bytes, deterministic per (key, message).
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    pub fn chain_code(&self) -> Option<&[u8; 32]> {
        self.chain_code.as_ref()
    }

    /// The 32-byte seed.
    pub fn to_bytes_raw(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// DER encoding, always the 47-byte emitted form (see
    /// [`DER_PREFIX_PRIVATE`]).
    pub fn to_bytes_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|seq| {
            seq.write_small_integer(0);
            seq.write_sequence(|alg| alg.write_oid(oid::ED25519));
            seq.write_bit_string(&self.signing_key.to_bytes());
        });
        writer.into_bytes()
    }
}

impl Clone for Ed25519PrivateKey {
    fn clone(&self) -> Self {
        Ed25519PrivateKey {
            signing_key: self.signing_key.clone(),
            chain_code: self.chain_code,
        }
    }
}

impl Drop for Ed25519PrivateKey {
    fn drop(&mut self) {
        // SigningKey zeroizes itself; the chain code is ours to clear.
        if let Some(chain_code) = self.chain_code.as_mut() {
            chain_code.zeroize();
        }
    }
}

impl PartialEq for Ed25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.signing_key.to_bytes() == other.signing_key.to_bytes()
            && self.chain_code == other.chain_code
    }
}

impl Eq for Ed25519PrivateKey {}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("public_key", &self.public_key())
            .field("has_chain_code", &self.chain_code.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    verifying_key: VerifyingKey,
}

impl Ed25519PublicKey {
    /// Exactly 32 bytes of point data.
    pub fn from_bytes_raw(data: &[u8]) -> Result<Self, BadKeyError> {
        let bytes: [u8; 32] = data
            .try_into()
            .map_err(|_| BadKeyError::InvalidPublicKeyLength(data.len()))?;
        let verifying_key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| BadKeyError::InvalidPoint(e.to_string()))?;
        Ok(Ed25519PublicKey { verifying_key })
    }

    /// Exactly 44 bytes: SubjectPublicKeyInfo prefix + point.
    pub fn from_bytes_der(data: &[u8]) -> Result<Self, BadKeyError> {
        if data.len() != 44 {
            return Err(BadKeyError::InvalidPublicKeyLength(data.len()));
        }
        if data[..12] != DER_PREFIX_PUBLIC {
            return Err(BadKeyError::UnrecognizedPrefix);
        }
        Self::from_bytes_raw(&data[12..])
    }

    /// Raw point or DER, by length.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BadKeyError> {
        match data.len() {
            32 => Self::from_bytes_raw(data),
            _ => Self::from_bytes_der(data),
        }
    }

    /// Standard Ed25519 verification. A malformed or non-verifying
    /// signature yields `false`, never an error.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
            return false;
        };
        let signature = Signature::from_bytes(&bytes);
        self.verifying_key.verify(message, &signature).is_ok()
    }

    pub fn to_bytes_raw(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|seq| {
            seq.write_sequence(|alg| alg.write_oid(oid::ED25519));
            seq.write_bit_string(&self.verifying_key.to_bytes());
        });
        writer.into_bytes()
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", hex::encode(self.to_bytes_raw()))
    }
}
