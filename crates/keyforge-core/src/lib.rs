//! keyforge core
//!
//! Multi-curve key management: generation, encoding, hierarchical
//! derivation, signing and verification on Ed25519 and secp256k1.
//!
//! # Entry points
//!
//! [`PrivateKey`] and [`PublicKey`] are tagged unions over the two curve
//! implementations and the API most callers want: construct or import a
//! key (random, raw/DER bytes, seed, mnemonic, PEM, keystore), derive
//! children by index, sign byte buffers, verify signatures, and serialize
//! for transport. The curve-specific types underneath are public for
//! callers that know which curve they hold.
//!
//! # Derivation
//!
//! Ed25519 keys derive children via SLIP-0010 (hardened-only); secp256k1
//! keys via BIP-32 (hardened and non-hardened). Both require the key to
//! carry a chain code: generated Ed25519 keys and seed-derived keys do,
//! keys built from bare bytes do not. A separate PBKDF2-based legacy
//! scheme keeps old accounts reachable.
//!
//! # Secret hygiene
//!
//! Every operation is a bounded, CPU-only call with no internal locking
//! or shared state; keys are immutable once built. Secret buffers (seeds,
//! scalars, chain codes, KDF intermediates) are zeroed on drop.

pub mod bip32;
pub mod cipher;
pub mod ecdsa;
pub mod ed25519;
pub mod error;
pub mod hashing;
pub mod keystore;
pub mod legacy;
pub mod mnemonic;
pub mod pem;
pub mod pkcs8;
pub mod private_key;
pub mod public_key;
pub mod slip10;

pub use ecdsa::{EcdsaPrivateKey, EcdsaPublicKey};
pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
pub use error::{BadKeyError, DeriveError};
pub use mnemonic::Mnemonic;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;

/// Decode a hex string, tolerating an optional `0x` prefix and mixed
/// case. Output hex elsewhere in this crate is always lowercase and
/// unprefixed.
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, BadKeyError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| BadKeyError::Hex(e.to_string()))
}
