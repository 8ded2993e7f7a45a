//! ECDSA keys on secp256k1.
//!
//! Signing hashes the message with Keccak-256 and produces the 64-byte
//! compact `r ‖ s` form with a normalized (low) `s` and no recovery byte;
//! the recovery id is computed separately when a caller needs it.
//! Private keys carry an optional chain code for BIP-32 derivation.

use keyforge_der::{oid, Writer};
use rand::rngs::OsRng;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use secp256k1::{Message, PublicKey as Point, Secp256k1, SecretKey};
use std::fmt;
use zeroize::Zeroize;

use crate::bip32;
use crate::error::{BadKeyError, DeriveError};
use crate::hashing::keccak256;
use crate::mnemonic::Mnemonic;
use crate::pkcs8;

pub const SIGNATURE_LENGTH: usize = 64;

/// SubjectPublicKeyInfo prefix (id-ecPublicKey + secp256k1) for a 33-byte
/// compressed point. 56 bytes total.
pub(crate) const DER_PREFIX_PUBLIC: [u8; 23] = [
    0x30, 0x36, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];

/// Older public-key prefix naming only the curve OID. 47 bytes total;
/// accepted on decode, never emitted.
pub(crate) const DER_PREFIX_PUBLIC_LEGACY: [u8; 14] = [
    0x30, 0x2d, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];

pub struct EcdsaPrivateKey {
    secret: SecretKey,
    chain_code: Option<[u8; 32]>,
}

impl EcdsaPrivateKey {
    /// Generate a random scalar. Generated ECDSA keys carry no chain
    /// code; use [`EcdsaPrivateKey::from_seed`] when derivation matters.
    pub fn generate() -> Self {
        EcdsaPrivateKey {
            secret: SecretKey::new(&mut OsRng),
            chain_code: None,
        }
    }

    fn from_scalar(secret: SecretKey, chain_code: Option<[u8; 32]>) -> Self {
        EcdsaPrivateKey { secret, chain_code }
    }

    /// Exactly 32 bytes of scalar.
    pub fn from_bytes_raw(data: &[u8]) -> Result<Self, BadKeyError> {
        if data.len() != 32 {
            return Err(BadKeyError::InvalidPrivateKeyLength(data.len()));
        }
        let secret = SecretKey::from_slice(data)
            .map_err(|e| BadKeyError::InvalidPoint(e.to_string()))?;
        Ok(Self::from_scalar(secret, None))
    }

    /// PKCS#8 PrivateKeyInfo or SEC1 ECPrivateKey.
    pub fn from_bytes_der(data: &[u8]) -> Result<Self, BadKeyError> {
        let mut scalar = match pkcs8::parse_private_key_info(data) {
            Ok(pkcs8::ParsedPrivateKey::Ecdsa { scalar }) => scalar,
            Ok(pkcs8::ParsedPrivateKey::Ed25519 { .. }) => {
                return Err(BadKeyError::UnsupportedAlgorithm)
            }
            Err(_) => pkcs8::parse_sec1_private_key(data)?,
        };
        let key = Self::from_bytes_raw(&scalar);
        scalar.zeroize();
        key
    }

    /// Raw scalar or DER, by length.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BadKeyError> {
        match data.len() {
            32 => Self::from_bytes_raw(data),
            _ => Self::from_bytes_der(data),
        }
    }

    /// Root key from a master seed (BIP-32 `"Bitcoin seed"` step).
    pub fn from_seed(seed: &[u8]) -> Result<Self, BadKeyError> {
        let (secret, chain_code) = bip32::master_from_seed(seed)?;
        Ok(Self::from_scalar(secret, Some(chain_code)))
    }

    /// Root key from a mnemonic and passphrase.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Result<Self, BadKeyError> {
        let seed = mnemonic.to_seed(passphrase);
        Self::from_seed(&seed[..])
    }

    /// BIP-32 child at `index` (hardened or not). Fails without a chain
    /// code.
    pub fn derive(&self, index: u32) -> Result<Self, DeriveError> {
        let chain_code = self.chain_code.ok_or(DeriveError::MissingChainCode)?;
        let (child, child_chain) = bip32::derive_child(&self.secret, &chain_code, index)?;
        Ok(Self::from_scalar(child, Some(child_chain)))
    }

    /// Child at `index` under the pre-HD PBKDF2 scheme.
    pub fn legacy_derive(&self, index: i64) -> Result<Self, BadKeyError> {
        let mut parent_scalar = self.secret.secret_bytes();
        let mut child_scalar = crate::legacy::derive(&parent_scalar, index);
        parent_scalar.zeroize();
        let key = Self::from_bytes_raw(&child_scalar);
        child_scalar.zeroize();
        key
    }

    /// Keccak-256 digest of the message, signed; compact `r ‖ s`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        let secp = Secp256k1::new();
        let digest = Message::from_digest(keccak256(message));
        secp.sign_ecdsa(&digest, &self.secret).serialize_compact()
    }

    /// Recovery id (0..=3) of `signature` over `message`: the first id
    /// whose recovered point matches this key's public key.
    pub fn recovery_id(&self, signature: &[u8], message: &[u8]) -> Result<u8, BadKeyError> {
        if signature.len() != SIGNATURE_LENGTH {
            return Err(BadKeyError::NoRecoveryId);
        }
        let secp = Secp256k1::new();
        let digest = Message::from_digest(keccak256(message));
        let expected = Point::from_secret_key(&secp, &self.secret).serialize_uncompressed();

        for id in 0..=3i32 {
            let Ok(recovery_id) = RecoveryId::from_i32(id) else {
                continue;
            };
            let Ok(recoverable) = RecoverableSignature::from_compact(signature, recovery_id)
            else {
                continue;
            };
            if let Ok(recovered) = secp.recover_ecdsa(&digest, &recoverable) {
                if recovered.serialize_uncompressed() == expected {
                    return Ok(id as u8);
                }
            }
        }
        Err(BadKeyError::NoRecoveryId)
    }

    pub fn public_key(&self) -> EcdsaPublicKey {
        let secp = Secp256k1::new();
        EcdsaPublicKey {
            point: Point::from_secret_key(&secp, &self.secret),
        }
    }

    pub fn chain_code(&self) -> Option<&[u8; 32]> {
        self.chain_code.as_ref()
    }

    pub fn to_bytes_raw(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// PKCS#8 PrivateKeyInfo naming the curve OID, scalar nested in an
    /// OCTET STRING. 50 bytes.
    pub fn to_bytes_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|seq| {
            seq.write_small_integer(0);
            seq.write_sequence(|alg| alg.write_oid(oid::SECP256K1));
            let mut inner = Writer::new();
            inner.write_octet_string(&self.secret.secret_bytes());
            seq.write_octet_string(&inner.into_bytes());
        });
        writer.into_bytes()
    }
}

impl Clone for EcdsaPrivateKey {
    fn clone(&self) -> Self {
        EcdsaPrivateKey {
            secret: self.secret,
            chain_code: self.chain_code,
        }
    }
}

impl Drop for EcdsaPrivateKey {
    fn drop(&mut self) {
        self.secret.non_secure_erase();
        if let Some(chain_code) = self.chain_code.as_mut() {
            chain_code.zeroize();
        }
    }
}

impl PartialEq for EcdsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.secret == other.secret && self.chain_code == other.chain_code
    }
}

impl Eq for EcdsaPrivateKey {}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("public_key", &self.public_key())
            .field("has_chain_code", &self.chain_code.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    point: Point,
}

impl EcdsaPublicKey {
    /// Exactly 33 bytes of compressed point.
    pub fn from_bytes_raw(data: &[u8]) -> Result<Self, BadKeyError> {
        if data.len() != 33 {
            return Err(BadKeyError::InvalidPublicKeyLength(data.len()));
        }
        let point =
            Point::from_slice(data).map_err(|e| BadKeyError::InvalidPoint(e.to_string()))?;
        Ok(EcdsaPublicKey { point })
    }

    /// 47-byte legacy form, 56-byte SubjectPublicKeyInfo form, or any
    /// other length carrying an uncompressed point after the standard
    /// prefix (re-encoded to compressed).
    pub fn from_bytes_der(data: &[u8]) -> Result<Self, BadKeyError> {
        match data.len() {
            47 => {
                if data[..14] != DER_PREFIX_PUBLIC_LEGACY {
                    return Err(BadKeyError::UnrecognizedPrefix);
                }
                Self::from_bytes_raw(&data[14..])
            }
            56 => {
                if data[..23] != DER_PREFIX_PUBLIC {
                    return Err(BadKeyError::UnrecognizedPrefix);
                }
                Self::from_bytes_raw(&data[23..])
            }
            n if n > 23 => {
                let point = Point::from_slice(&data[23..])
                    .map_err(|e| BadKeyError::InvalidPoint(e.to_string()))?;
                Ok(EcdsaPublicKey { point })
            }
            n => Err(BadKeyError::InvalidPublicKeyLength(n)),
        }
    }

    /// Compressed point or DER, by length.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BadKeyError> {
        match data.len() {
            33 => Self::from_bytes_raw(data),
            _ => Self::from_bytes_der(data),
        }
    }

    /// Keccak-256 digest of the message, standard ECDSA verification.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_compact(signature) else {
            return false;
        };
        let secp = Secp256k1::new();
        let digest = Message::from_digest(keccak256(message));
        secp.verify_ecdsa(&digest, &signature, &self.point).is_ok()
    }

    /// Lowercase hex of the last 20 bytes of the Keccak-256 hash of the
    /// uncompressed point (without the 0x04 marker).
    pub fn to_ethereum_address(&self) -> String {
        let uncompressed = self.point.serialize_uncompressed();
        let digest = keccak256(&uncompressed[1..]);
        hex::encode(&digest[12..])
    }

    pub fn to_bytes_raw(&self) -> [u8; 33] {
        self.point.serialize()
    }

    /// SubjectPublicKeyInfo form, 56 bytes. Legacy input normalizes to
    /// this on re-encode.
    pub fn to_bytes_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|seq| {
            seq.write_sequence(|alg| {
                alg.write_oid(oid::EC_PUBLIC_KEY);
                alg.write_oid(oid::SECP256K1);
            });
            seq.write_bit_string(&self.point.serialize());
        });
        writer.into_bytes()
    }
}

impl fmt::Debug for EcdsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcdsaPublicKey({})", hex::encode(self.to_bytes_raw()))
    }
}
