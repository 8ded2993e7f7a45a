//! Curve-agnostic public key.
//!
//! Decoding tries Ed25519 first and falls back to ECDSA; when both fail,
//! the error carries both messages so the caller sees why each curve said
//! no. The ordering is observable (byte lengths accepted by both parsers
//! resolve as Ed25519) and is part of the wire contract.

use std::fmt;
use std::str::FromStr;

use crate::decode_hex;
use crate::ecdsa::EcdsaPublicKey;
use crate::ed25519::Ed25519PublicKey;
use crate::error::BadKeyError;

#[derive(Clone, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519(Ed25519PublicKey),
    Ecdsa(EcdsaPublicKey),
}

impl PublicKey {
    /// Decode raw or DER bytes, Ed25519 first, ECDSA on failure.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BadKeyError> {
        let ed25519_err = match Ed25519PublicKey::from_bytes(data) {
            Ok(key) => return Ok(PublicKey::Ed25519(key)),
            Err(e) => e,
        };
        match EcdsaPublicKey::from_bytes(data) {
            Ok(key) => Ok(PublicKey::Ecdsa(key)),
            Err(ecdsa_err) => Err(BadKeyError::AmbiguousBytes {
                ed25519: ed25519_err.to_string(),
                ecdsa: ecdsa_err.to_string(),
            }),
        }
    }

    /// DER-only decode with the same curve ordering.
    pub fn from_bytes_der(data: &[u8]) -> Result<Self, BadKeyError> {
        let ed25519_err = match Ed25519PublicKey::from_bytes_der(data) {
            Ok(key) => return Ok(PublicKey::Ed25519(key)),
            Err(e) => e,
        };
        match EcdsaPublicKey::from_bytes_der(data) {
            Ok(key) => Ok(PublicKey::Ecdsa(key)),
            Err(ecdsa_err) => Err(BadKeyError::AmbiguousBytes {
                ed25519: ed25519_err.to_string(),
                ecdsa: ecdsa_err.to_string(),
            }),
        }
    }

    /// Hex string (optional `0x` prefix) through [`PublicKey::from_bytes`].
    pub fn from_string(s: &str) -> Result<Self, BadKeyError> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Hex-encoded DER through [`PublicKey::from_bytes_der`].
    pub fn from_string_der(s: &str) -> Result<Self, BadKeyError> {
        Self::from_bytes_der(&decode_hex(s)?)
    }

    /// Hex-encoded raw point bytes, Ed25519 first, ECDSA on failure.
    pub fn from_string_raw(s: &str) -> Result<Self, BadKeyError> {
        let bytes = decode_hex(s)?;
        let ed25519_err = match Ed25519PublicKey::from_bytes_raw(&bytes) {
            Ok(key) => return Ok(PublicKey::Ed25519(key)),
            Err(e) => e,
        };
        match EcdsaPublicKey::from_bytes_raw(&bytes) {
            Ok(key) => Ok(PublicKey::Ecdsa(key)),
            Err(ecdsa_err) => Err(BadKeyError::AmbiguousBytes {
                ed25519: ed25519_err.to_string(),
                ecdsa: ecdsa_err.to_string(),
            }),
        }
    }

    /// Verify a detached signature; `false` on any mismatch, including a
    /// malformed signature.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            PublicKey::Ed25519(key) => key.verify(message, signature),
            PublicKey::Ecdsa(key) => key.verify(message, signature),
        }
    }

    /// Ethereum-style address of an ECDSA key; Ed25519 keys have none.
    pub fn to_ethereum_address(&self) -> Result<String, BadKeyError> {
        match self {
            PublicKey::Ed25519(_) => Err(BadKeyError::NotEcdsa),
            PublicKey::Ecdsa(key) => Ok(key.to_ethereum_address()),
        }
    }

    pub fn is_ed25519(&self) -> bool {
        matches!(self, PublicKey::Ed25519(_))
    }

    pub fn is_ecdsa(&self) -> bool {
        matches!(self, PublicKey::Ecdsa(_))
    }

    pub fn to_bytes_raw(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(key) => key.to_bytes_raw().to_vec(),
            PublicKey::Ecdsa(key) => key.to_bytes_raw().to_vec(),
        }
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(key) => key.to_bytes_der(),
            PublicKey::Ecdsa(key) => key.to_bytes_der(),
        }
    }

    pub fn to_string_raw(&self) -> String {
        hex::encode(self.to_bytes_raw())
    }

    pub fn to_string_der(&self) -> String {
        hex::encode(self.to_bytes_der())
    }
}

impl FromStr for PublicKey {
    type Err = BadKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicKey::from_string(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_der())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::Ed25519(key) => key.fmt(f),
            PublicKey::Ecdsa(key) => key.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::private_key::PrivateKey;

    #[test]
    fn test_curve_detection_by_shape() {
        let ed = PrivateKey::generate_ed25519().public_key();
        assert!(PublicKey::from_bytes(&ed.to_bytes_raw()).unwrap().is_ed25519());
        assert!(PublicKey::from_bytes(&ed.to_bytes_der()).unwrap().is_ed25519());

        let ec = PrivateKey::generate_ecdsa().public_key();
        assert!(PublicKey::from_bytes(&ec.to_bytes_raw()).unwrap().is_ecdsa());
        assert!(PublicKey::from_bytes(&ec.to_bytes_der()).unwrap().is_ecdsa());
    }

    #[test]
    fn test_unparsable_bytes_aggregate_both_errors() {
        let err = PublicKey::from_bytes(&[0u8; 40]).unwrap_err();
        match err {
            BadKeyError::AmbiguousBytes { ed25519, ecdsa } => {
                assert!(!ed25519.is_empty());
                assert!(!ecdsa.is_empty());
            }
            other => panic!("expected aggregate error, got {other}"),
        }
    }

    #[test]
    fn test_string_roundtrip() {
        let public = PrivateKey::generate_ecdsa().public_key();
        let reparsed: PublicKey = public.to_string().parse().unwrap();
        assert_eq!(reparsed, public);

        let raw = PublicKey::from_string(&format!("0x{}", public.to_string_raw())).unwrap();
        assert_eq!(raw, public);

        let der = PublicKey::from_string_der(&public.to_string_der()).unwrap();
        assert_eq!(der, public);
        let raw_only = PublicKey::from_string_raw(&public.to_string_raw()).unwrap();
        assert_eq!(raw_only, public);
        assert!(PublicKey::from_string_raw(&public.to_string_der()).is_err());
    }

    #[test]
    fn test_verify_dispatches_per_curve() {
        let message = b"dispatch check";
        for private in [PrivateKey::generate_ed25519(), PrivateKey::generate_ecdsa()] {
            let signature = private.sign(message);
            let public = private.public_key();
            assert!(public.verify(message, &signature));
            assert!(!public.verify(b"different message", &signature));
            assert!(!public.verify(message, &signature[1..]));
        }
    }

    #[test]
    fn test_cross_curve_equality_is_false() {
        let ed = PrivateKey::generate_ed25519().public_key();
        let ec = PrivateKey::generate_ecdsa().public_key();
        assert_ne!(ed, ec);
    }

    #[test]
    fn test_ethereum_address_only_for_ecdsa() {
        let ec = PrivateKey::generate_ecdsa().public_key();
        let address = ec.to_ethereum_address().unwrap();
        assert_eq!(address.len(), 40);
        assert_eq!(address, address.to_lowercase());

        let ed = PrivateKey::generate_ed25519().public_key();
        assert!(matches!(
            ed.to_ethereum_address(),
            Err(BadKeyError::NotEcdsa)
        ));
    }
}
