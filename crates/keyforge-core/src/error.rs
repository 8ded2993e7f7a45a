//! Error types for key handling and derivation.
//!
//! Every parse/import failure funnels into [`BadKeyError`]: the caller gave
//! us bytes (or a passphrase) that cannot become a key. These are terminal,
//! user-correctable conditions; nothing in this crate retries them.
//! Child-key derivation has its own small error set ([`DeriveError`])
//! because its failure modes are about key *state*, not input bytes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadKeyError {
    #[error("invalid private key length: {0} bytes")]
    InvalidPrivateKeyLength(usize),
    #[error("invalid public key length: {0} bytes")]
    InvalidPublicKeyLength(usize),
    #[error("unrecognized key prefix")]
    UnrecognizedPrefix,
    #[error("malformed DER: {0}")]
    Der(String),
    #[error("unsupported key algorithm identifier")]
    UnsupportedAlgorithm,
    #[error("invalid curve point: {0}")]
    InvalidPoint(String),
    #[error("malformed PEM: {0}")]
    Pem(String),
    #[error("malformed keystore: {0}")]
    Keystore(String),
    #[error("decryption failed: {0}")]
    Decrypt(String),
    #[error("invalid mnemonic: {0}")]
    Mnemonic(String),
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("no recovery id reproduces the signing key")]
    NoRecoveryId,
    #[error("key is not an ECDSA key")]
    NotEcdsa,
    #[error("bytes decode as neither Ed25519 ({ed25519}) nor ECDSA ({ecdsa})")]
    AmbiguousBytes { ed25519: String, ecdsa: String },
}

impl From<keyforge_der::Asn1Error> for BadKeyError {
    fn from(e: keyforge_der::Asn1Error) -> Self {
        BadKeyError::Der(e.to_string())
    }
}

impl From<keyforge_der::PemError> for BadKeyError {
    fn from(e: keyforge_der::PemError) -> Self {
        BadKeyError::Pem(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error("key has no chain code; cannot derive child keys")]
    MissingChainCode,
    #[error("index {0:#010x} already has the hardened bit set")]
    AlreadyHardened(u32),
    #[error("no valid child scalar within {0} consecutive indices")]
    RetriesExhausted(u32),
}
