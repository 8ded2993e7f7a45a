//! Passphrase-protected JSON keystore.
//!
//! Envelope layout: PBKDF2-HMAC-SHA256 stretches the passphrase into 32
//! bytes; the first half keys AES-128-CBC over the DER-encoded private
//! key, the second half keys an HMAC-SHA384 integrity tag over the
//! ciphertext. A wrong passphrase trips the tag check before any
//! plaintext is produced. All parameters ride in the envelope, so stored
//! keystores keep opening if the write-side defaults ever move.

use rand::rngs::OsRng;
use rand::RngCore as _;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::cipher::{aes128_cbc_decrypt, aes128_cbc_encrypt};
use crate::error::BadKeyError;
use crate::hashing::{hmac_sha384, pbkdf2_sha256};

const KEYSTORE_VERSION: u32 = 1;
const CIPHER: &str = "aes-128-cbc";
const KDF: &str = "pbkdf2";
const PRF: &str = "hmac-sha256";
const DK_LEN: u32 = 32;
const ROUNDS: u32 = 2048;

#[derive(Serialize, Deserialize)]
struct Keystore {
    version: u32,
    crypto: Crypto,
}

#[derive(Serialize, Deserialize)]
struct Crypto {
    cipher: String,
    cipherparams: CipherParams,
    ciphertext: String,
    kdf: String,
    kdfparams: KdfParams,
    mac: String,
}

#[derive(Serialize, Deserialize)]
struct CipherParams {
    iv: String,
}

#[derive(Serialize, Deserialize)]
struct KdfParams {
    #[serde(rename = "dkLen")]
    dk_len: u32,
    salt: String,
    c: u32,
    prf: String,
}

fn derive_keys(passphrase: &str, salt: &[u8], rounds: u32) -> Zeroizing<[u8; 32]> {
    let mut dk = Zeroizing::new([0u8; 32]);
    pbkdf2_sha256(passphrase.as_bytes(), salt, rounds, &mut dk[..]);
    dk
}

/// Wrap a DER-encoded private key in an encrypted keystore document.
pub fn encrypt(der_key: &[u8], passphrase: &str) -> Result<Vec<u8>, BadKeyError> {
    let mut salt = [0u8; 32];
    let mut iv = [0u8; 16];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let dk = derive_keys(passphrase, &salt, ROUNDS);
    let mut cipher_key = [0u8; 16];
    cipher_key.copy_from_slice(&dk[..16]);

    let ciphertext = aes128_cbc_encrypt(&cipher_key, &iv, der_key);
    cipher_key.zeroize();
    let mac = hmac_sha384(&dk[16..], &ciphertext);

    let keystore = Keystore {
        version: KEYSTORE_VERSION,
        crypto: Crypto {
            cipher: CIPHER.to_string(),
            cipherparams: CipherParams {
                iv: hex::encode(iv),
            },
            ciphertext: hex::encode(&ciphertext),
            kdf: KDF.to_string(),
            kdfparams: KdfParams {
                dk_len: DK_LEN,
                salt: hex::encode(salt),
                c: ROUNDS,
                prf: PRF.to_string(),
            },
            mac: hex::encode(mac),
        },
    };

    serde_json::to_vec(&keystore).map_err(|e| BadKeyError::Keystore(e.to_string()))
}

/// Unwrap an encrypted keystore document back into DER key bytes.
pub fn decrypt(json: &[u8], passphrase: &str) -> Result<Zeroizing<Vec<u8>>, BadKeyError> {
    let keystore: Keystore =
        serde_json::from_slice(json).map_err(|e| BadKeyError::Keystore(e.to_string()))?;

    if keystore.version != KEYSTORE_VERSION {
        return Err(BadKeyError::Keystore(format!(
            "unsupported keystore version {}",
            keystore.version
        )));
    }
    let crypto = &keystore.crypto;
    if crypto.kdf != KDF || crypto.kdfparams.prf != PRF {
        return Err(BadKeyError::Keystore(format!(
            "unsupported kdf {}/{}",
            crypto.kdf, crypto.kdfparams.prf
        )));
    }
    if crypto.cipher != CIPHER {
        return Err(BadKeyError::Keystore(format!(
            "unsupported cipher {}",
            crypto.cipher
        )));
    }
    if crypto.kdfparams.dk_len != DK_LEN {
        return Err(BadKeyError::Keystore(format!(
            "unsupported dkLen {}",
            crypto.kdfparams.dk_len
        )));
    }
    if crypto.kdfparams.c < 1024 {
        log::warn!(
            "keystore uses a low pbkdf2 round count ({})",
            crypto.kdfparams.c
        );
    }

    let salt = decode_field(&crypto.kdfparams.salt, "salt")?;
    let iv: [u8; 16] = decode_field(&crypto.cipherparams.iv, "iv")?
        .try_into()
        .map_err(|_| BadKeyError::Keystore("iv must be 16 bytes".to_string()))?;
    let ciphertext = decode_field(&crypto.ciphertext, "ciphertext")?;
    let mac = decode_field(&crypto.mac, "mac")?;

    let dk = derive_keys(passphrase, &salt, crypto.kdfparams.c);
    let expected_mac = hmac_sha384(&dk[16..], &ciphertext);
    if mac != expected_mac {
        return Err(BadKeyError::Decrypt(
            "keystore mac mismatch (wrong passphrase?)".to_string(),
        ));
    }

    let mut cipher_key = [0u8; 16];
    cipher_key.copy_from_slice(&dk[..16]);
    let plaintext = aes128_cbc_decrypt(&cipher_key, &iv, &ciphertext);
    cipher_key.zeroize();
    plaintext
}

fn decode_field(hex_value: &str, name: &str) -> Result<Vec<u8>, BadKeyError> {
    hex::decode(hex_value)
        .map_err(|e| BadKeyError::Keystore(format!("invalid {name} hex: {e}")))
}
