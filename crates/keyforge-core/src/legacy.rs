//! Legacy PBKDF2 account derivation.
//!
//! Predates the SLIP-0010/BIP-32 paths and survives only so that accounts
//! created under the old scheme keep resolving to the same keys: the seed
//! is concatenated with an 8-byte big-endian index and stretched with
//! PBKDF2-HMAC-SHA512 over a fixed one-byte salt. Do not change any
//! constant here: the output is the account key.

use zeroize::Zeroizing;

use crate::hashing::pbkdf2_sha512;

/// Index value that is written as eight 0xff bytes instead of its
/// big-endian encoding (two all-ones 32-bit words).
pub const SENTINEL_INDEX: i64 = 0xff_ffff_ffff;

const SALT: [u8; 1] = [0xff];
const ROUNDS: u32 = 2048;

/// Derive the 32-byte child key for `index` from `seed`.
pub fn derive(seed: &[u8], index: i64) -> [u8; 32] {
    let mut password = Zeroizing::new(Vec::with_capacity(seed.len() + 8));
    password.extend_from_slice(seed);
    if index == SENTINEL_INDEX {
        password.extend_from_slice(&[0xff; 8]);
    } else {
        password.extend_from_slice(&index.to_be_bytes());
    }

    let mut out = [0u8; 32];
    pbkdf2_sha512(&password, &SALT, ROUNDS, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let seed = [0x5au8; 32];
        assert_eq!(derive(&seed, 0), derive(&seed, 0));
        assert_eq!(derive(&seed, SENTINEL_INDEX), derive(&seed, SENTINEL_INDEX));
    }

    #[test]
    fn test_indices_produce_distinct_keys() {
        let seed = [0x5au8; 32];
        let k0 = derive(&seed, 0);
        let k1 = derive(&seed, 1);
        let ks = derive(&seed, SENTINEL_INDEX);
        assert_ne!(k0, k1);
        assert_ne!(k0, ks);
        assert_ne!(k1, ks);
    }

    #[test]
    fn test_sentinel_is_not_plain_encoding() {
        // The sentinel writes 0xffffffffffffffff, which is also the
        // big-endian encoding of -1; the two inputs must collide by
        // construction while the sentinel's own encoding (0x000000ffffffffff)
        // must not be used.
        let seed = [0x5au8; 32];
        assert_eq!(derive(&seed, SENTINEL_INDEX), derive(&seed, -1));
    }
}
