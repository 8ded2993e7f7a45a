//! Object identifiers appearing in key envelopes, pre-encoded.
//!
//! Stored as the DER content bytes (what follows the 0x06 tag and length)
//! so parsers can compare slices directly instead of decoding arc values.

/// 1.3.101.112: Ed25519 (RFC 8410)
pub const ED25519: &[u8] = &[0x2b, 0x65, 0x70];

/// 1.3.132.0.10: secp256k1 named curve
pub const SECP256K1: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x0a];

/// 1.2.840.10045.2.1: id-ecPublicKey
pub const EC_PUBLIC_KEY: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];

/// 1.2.840.113549.1.5.13: PBES2
pub const PBES2: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x05, 0x0d];

/// 1.2.840.113549.1.5.12: PBKDF2
pub const PBKDF2: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x05, 0x0c];

/// 1.2.840.113549.2.9: hmacWithSHA256
pub const HMAC_WITH_SHA256: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x09];

/// 2.16.840.1.101.3.4.1.2: aes128-CBC
pub const AES_128_CBC: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x02];
