//! Hash, HMAC and PBKDF2 adapters.
//!
//! Thin fixed-output wrappers over the RustCrypto primitives so the rest
//! of the crate deals in plain arrays instead of generic-array plumbing.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use tiny_keccak::{Hasher, Keccak};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("hmac accepts keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

pub fn hmac_sha384(key: &[u8], data: &[u8]) -> [u8; 48] {
    let mut mac =
        HmacSha384::new_from_slice(key).expect("hmac accepts keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac =
        HmacSha512::new_from_slice(key).expect("hmac accepts keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, out);
}

pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_known_digests() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex::encode(keccak256(b"abc")),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    /// RFC 4231 test case 1.
    #[test]
    fn test_hmac_sha512_rfc4231() {
        let key = [0x0bu8; 20];
        let mac = hmac_sha512(&key, b"Hi There");
        assert_eq!(
            hex::encode(mac),
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
    }

    #[test]
    fn test_hmac_outputs_differ_by_key() {
        let a = hmac_sha256(b"key-a", b"data");
        let b = hmac_sha256(b"key-b", b"data");
        assert_ne!(a, b);
        assert_ne!(hmac_sha384(b"key-a", b"data"), hmac_sha384(b"key-b", b"data"));
    }

    #[test]
    fn test_pbkdf2_deterministic_and_round_sensitive() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        let mut c = [0u8; 32];
        pbkdf2_sha512(b"passphrase", b"salt", 2048, &mut a);
        pbkdf2_sha512(b"passphrase", b"salt", 2048, &mut b);
        pbkdf2_sha512(b"passphrase", b"salt", 4096, &mut c);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
