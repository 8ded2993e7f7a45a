//! BIP-32 child-key derivation for secp256k1.
//!
//! Supports both hardened and non-hardened indices. The child scalar is
//! `parent + parse256(IL) mod n`; when `IL` falls outside the curve order
//! or the sum lands on zero, derivation moves to the next index instead of
//! failing; the walk is a bounded loop, not recursion.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use zeroize::Zeroize;

use crate::error::{BadKeyError, DeriveError};
use crate::hashing::hmac_sha512;

/// Top bit of a derivation index; set means hardened.
pub const HARDENED_BIT: u32 = 1 << 31;

/// HMAC key for master-key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Consecutive indices tried before giving up. A single skip has
/// probability around 2^-128; two in a row is not a realistic event.
const MAX_ATTEMPTS: u32 = 8;

/// Derive the root (scalar, chain code) pair from a master seed.
pub fn master_from_seed(seed: &[u8]) -> Result<(SecretKey, [u8; 32]), BadKeyError> {
    let mut i = hmac_sha512(MASTER_HMAC_KEY, seed);
    let key = SecretKey::from_slice(&i[..32])
        .map_err(|_| BadKeyError::InvalidPoint("master scalar outside curve order".to_string()));
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&i[32..]);
    i.zeroize();
    Ok((key?, chain_code))
}

/// Derive the child (scalar, chain code) at `index` from a parent.
///
/// Hardened indices hash `0x00 || parent_scalar || ser32(index)`;
/// non-hardened hash `ser_P(parent_public) || ser32(index)`.
pub fn derive_child(
    parent: &SecretKey,
    chain_code: &[u8; 32],
    index: u32,
) -> Result<(SecretKey, [u8; 32]), DeriveError> {
    let secp = Secp256k1::new();
    let mut index = index;

    for _ in 0..MAX_ATTEMPTS {
        let mut data = [0u8; 37];
        if index & HARDENED_BIT != 0 {
            data[1..33].copy_from_slice(&parent.secret_bytes());
        } else {
            let parent_public = PublicKey::from_secret_key(&secp, parent);
            data[..33].copy_from_slice(&parent_public.serialize());
        }
        data[33..].copy_from_slice(&index.to_be_bytes());

        let mut i = hmac_sha512(chain_code, &data);
        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);

        let child = Scalar::from_be_bytes(il)
            .ok()
            .and_then(|tweak| (*parent).add_tweak(&tweak).ok());

        il.zeroize();
        data.zeroize();

        match child {
            Some(child_key) => {
                let mut child_chain = [0u8; 32];
                child_chain.copy_from_slice(&i[32..]);
                i.zeroize();
                return Ok((child_key, child_chain));
            }
            None => {
                i.zeroize();
                log::warn!(
                    "child scalar at index {index:#010x} is invalid, trying next index"
                );
                index = index.wrapping_add(1);
            }
        }
    }

    Err(DeriveError::RetriesExhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    /// BIP-32 test vector 1, chain m.
    #[test]
    fn test_master_vector() {
        let seed = hex::decode(VECTOR_1_SEED).unwrap();
        let (key, chain_code) = master_from_seed(&seed).unwrap();
        assert_eq!(
            hex::encode(key.secret_bytes()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(chain_code),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }

    /// BIP-32 test vector 1, chain m/0'.
    #[test]
    fn test_hardened_child_vector() {
        let seed = hex::decode(VECTOR_1_SEED).unwrap();
        let (master, chain_code) = master_from_seed(&seed).unwrap();
        let (child, child_chain) =
            derive_child(&master, &chain_code, HARDENED_BIT).unwrap();
        assert_eq!(
            hex::encode(child.secret_bytes()),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            hex::encode(child_chain),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
    }

    /// BIP-32 test vector 1, chain m/0'/1 (non-hardened step).
    #[test]
    fn test_normal_child_vector() {
        let seed = hex::decode(VECTOR_1_SEED).unwrap();
        let (master, chain_code) = master_from_seed(&seed).unwrap();
        let (child0h, chain0h) = derive_child(&master, &chain_code, HARDENED_BIT).unwrap();
        let (child1, _) = derive_child(&child0h, &chain0h, 1).unwrap();
        assert_eq!(
            hex::encode(child1.secret_bytes()),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = [11u8; 64];
        let (master, chain_code) = master_from_seed(&seed).unwrap();
        let a = derive_child(&master, &chain_code, 5).unwrap();
        let b = derive_child(&master, &chain_code, 5).unwrap();
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_hardened_and_normal_children_differ() {
        let seed = [11u8; 64];
        let (master, chain_code) = master_from_seed(&seed).unwrap();
        let normal = derive_child(&master, &chain_code, 3).unwrap();
        let hardened = derive_child(&master, &chain_code, 3 | HARDENED_BIT).unwrap();
        assert_ne!(normal.0, hardened.0);
    }
}
