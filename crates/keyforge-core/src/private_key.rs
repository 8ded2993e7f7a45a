//! Curve-agnostic private key.
//!
//! A tagged union over the two curve implementations, giving callers one
//! API for generation, import/export, signing and child derivation. Curve
//! detection on import works on structure, not guesswork: DER input is
//! dispatched on its algorithm OID. Raw 32-byte input is ambiguous (an
//! Ed25519 seed and a secp256k1 scalar look identical) and decodes as
//! Ed25519. Callers holding raw ECDSA material must say so via
//! [`PrivateKey::from_bytes_ecdsa`].

use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

use crate::ecdsa::EcdsaPrivateKey;
use crate::ed25519::Ed25519PrivateKey;
use crate::error::{BadKeyError, DeriveError};
use crate::mnemonic::Mnemonic;
use crate::public_key::PublicKey;
use crate::{decode_hex, keystore, pem, pkcs8};

#[derive(Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Ed25519(Ed25519PrivateKey),
    Ecdsa(EcdsaPrivateKey),
}

impl PrivateKey {
    pub fn generate_ed25519() -> Self {
        PrivateKey::Ed25519(Ed25519PrivateKey::generate())
    }

    pub fn generate_ecdsa() -> Self {
        PrivateKey::Ecdsa(EcdsaPrivateKey::generate())
    }

    /// Decode from bytes: DER input dispatches on its algorithm OID,
    /// anything else is treated as raw Ed25519 material (see the module
    /// docs for why).
    pub fn from_bytes(data: &[u8]) -> Result<Self, BadKeyError> {
        if pkcs8::looks_like_der(data) {
            return Self::from_bytes_der(data);
        }
        Ok(PrivateKey::Ed25519(Ed25519PrivateKey::from_bytes_raw(
            data,
        )?))
    }

    /// Decode a DER envelope, picking the curve from the OID.
    pub fn from_bytes_der(data: &[u8]) -> Result<Self, BadKeyError> {
        match pkcs8::parse_private_key_info(data) {
            Ok(pkcs8::ParsedPrivateKey::Ed25519 { mut seed }) => {
                let key = Ed25519PrivateKey::from_bytes_raw(&seed);
                seed.zeroize();
                Ok(PrivateKey::Ed25519(key?))
            }
            Ok(pkcs8::ParsedPrivateKey::Ecdsa { mut scalar }) => {
                let key = EcdsaPrivateKey::from_bytes_raw(&scalar);
                scalar.zeroize();
                Ok(PrivateKey::Ecdsa(key?))
            }
            Err(BadKeyError::UnsupportedAlgorithm) => Err(BadKeyError::UnsupportedAlgorithm),
            // Not a PrivateKeyInfo; a bare SEC1 structure still names its
            // curve, so try that before giving up.
            Err(_) => {
                let mut scalar = pkcs8::parse_sec1_private_key(data)?;
                let key = EcdsaPrivateKey::from_bytes_raw(&scalar);
                scalar.zeroize();
                Ok(PrivateKey::Ecdsa(key?))
            }
        }
    }

    /// Explicit-curve raw/DER decode.
    pub fn from_bytes_ed25519(data: &[u8]) -> Result<Self, BadKeyError> {
        let key = match data.len() {
            47 | 48 => Ed25519PrivateKey::from_bytes_der(data)?,
            _ => Ed25519PrivateKey::from_bytes_raw(data)?,
        };
        Ok(PrivateKey::Ed25519(key))
    }

    /// Explicit-curve raw/DER decode.
    pub fn from_bytes_ecdsa(data: &[u8]) -> Result<Self, BadKeyError> {
        Ok(PrivateKey::Ecdsa(EcdsaPrivateKey::from_bytes(data)?))
    }

    /// Hex string (optional `0x` prefix) through [`PrivateKey::from_bytes`].
    pub fn from_string(s: &str) -> Result<Self, BadKeyError> {
        let mut bytes = decode_hex(s)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Hex-encoded DER through [`PrivateKey::from_bytes_der`].
    pub fn from_string_der(s: &str) -> Result<Self, BadKeyError> {
        let mut bytes = decode_hex(s)?;
        let key = Self::from_bytes_der(&bytes);
        bytes.zeroize();
        key
    }

    /// Hex-encoded raw key material; same Ed25519 default as raw bytes.
    pub fn from_string_raw(s: &str) -> Result<Self, BadKeyError> {
        let mut bytes = decode_hex(s)?;
        let key = Ed25519PrivateKey::from_bytes_raw(&bytes).map(PrivateKey::Ed25519);
        bytes.zeroize();
        key
    }

    /// Root Ed25519 key from a master seed.
    pub fn from_seed_ed25519(seed: &[u8]) -> Self {
        PrivateKey::Ed25519(Ed25519PrivateKey::from_seed(seed))
    }

    /// Root ECDSA key from a master seed.
    pub fn from_seed_ecdsa(seed: &[u8]) -> Result<Self, BadKeyError> {
        Ok(PrivateKey::Ecdsa(EcdsaPrivateKey::from_seed(seed)?))
    }

    /// Root Ed25519 key from a mnemonic.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Self {
        PrivateKey::Ed25519(Ed25519PrivateKey::from_mnemonic(mnemonic, passphrase))
    }

    /// Root ECDSA key from a mnemonic.
    pub fn from_mnemonic_ecdsa(
        mnemonic: &Mnemonic,
        passphrase: &str,
    ) -> Result<Self, BadKeyError> {
        Ok(PrivateKey::Ecdsa(EcdsaPrivateKey::from_mnemonic(
            mnemonic, passphrase,
        )?))
    }

    /// Import from PEM text, decrypting when a passphrase is given.
    pub fn from_pem(text: &str, passphrase: Option<&str>) -> Result<Self, BadKeyError> {
        pem::decode_private_key(text, passphrase)
    }

    /// Import from a JSON keystore.
    pub fn from_keystore(json: &[u8], passphrase: &str) -> Result<Self, BadKeyError> {
        let der = keystore::decrypt(json, passphrase)?;
        Self::from_bytes_der(&der)
    }

    /// Export as a JSON keystore encrypted under `passphrase`.
    pub fn to_keystore(&self, passphrase: &str) -> Result<Vec<u8>, BadKeyError> {
        keystore::encrypt(&self.to_bytes_der(), passphrase)
    }

    /// Export as PEM armor (unencrypted).
    pub fn to_pem(&self) -> String {
        pem::encode_private_key(self)
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(key) => key.sign(message).to_vec(),
            PrivateKey::Ecdsa(key) => key.sign(message).to_vec(),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Ed25519(key) => PublicKey::Ed25519(key.public_key()),
            PrivateKey::Ecdsa(key) => PublicKey::Ecdsa(key.public_key()),
        }
    }

    /// Child key at `index`. Requires a chain code; SLIP-0010 (Ed25519)
    /// additionally rejects pre-hardened indices.
    pub fn derive(&self, index: u32) -> Result<Self, DeriveError> {
        match self {
            PrivateKey::Ed25519(key) => Ok(PrivateKey::Ed25519(key.derive(index)?)),
            PrivateKey::Ecdsa(key) => Ok(PrivateKey::Ecdsa(key.derive(index)?)),
        }
    }

    /// Child key under the pre-HD PBKDF2 scheme.
    pub fn legacy_derive(&self, index: i64) -> Result<Self, BadKeyError> {
        match self {
            PrivateKey::Ed25519(key) => Ok(PrivateKey::Ed25519(key.legacy_derive(index))),
            PrivateKey::Ecdsa(key) => Ok(PrivateKey::Ecdsa(key.legacy_derive(index)?)),
        }
    }

    pub fn chain_code(&self) -> Option<&[u8; 32]> {
        match self {
            PrivateKey::Ed25519(key) => key.chain_code(),
            PrivateKey::Ecdsa(key) => key.chain_code(),
        }
    }

    pub fn is_ed25519(&self) -> bool {
        matches!(self, PrivateKey::Ed25519(_))
    }

    pub fn is_ecdsa(&self) -> bool {
        matches!(self, PrivateKey::Ecdsa(_))
    }

    pub fn to_bytes_raw(&self) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(key) => key.to_bytes_raw().to_vec(),
            PrivateKey::Ecdsa(key) => key.to_bytes_raw().to_vec(),
        }
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(key) => key.to_bytes_der(),
            PrivateKey::Ecdsa(key) => key.to_bytes_der(),
        }
    }

    pub fn to_string_raw(&self) -> String {
        hex::encode(self.to_bytes_raw())
    }

    pub fn to_string_der(&self) -> String {
        hex::encode(self.to_bytes_der())
    }
}

impl FromStr for PrivateKey {
    type Err = BadKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKey::from_string(s)
    }
}

/// Hex of the DER encoding, matching what `from_string` accepts back.
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_der())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivateKey::Ed25519(key) => key.fmt(f),
            PrivateKey::Ecdsa(key) => key.fmt(f),
        }
    }
}
