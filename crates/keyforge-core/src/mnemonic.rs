//! BIP-39 mnemonic handling.
//!
//! Word order is significant; the word list is English. Seed reduction is
//! PBKDF2-HMAC-SHA512 with 2048 rounds, salt `"mnemonic" + passphrase`,
//! NFKD-normalized, exactly what the `bip39` crate implements.

use std::fmt;
use std::str::FromStr;

use bip39::Language;
use zeroize::Zeroizing;

use crate::error::BadKeyError;

/// A validated BIP-39 mnemonic.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Generate a fresh 24-word mnemonic from the CSPRNG.
    pub fn generate() -> Result<Self, BadKeyError> {
        Self::generate_with_word_count(24)
    }

    /// Generate a fresh 12-word mnemonic from the CSPRNG.
    pub fn generate_12() -> Result<Self, BadKeyError> {
        Self::generate_with_word_count(12)
    }

    fn generate_with_word_count(words: usize) -> Result<Self, BadKeyError> {
        let inner = bip39::Mnemonic::generate_in(Language::English, words)
            .map_err(|e| BadKeyError::Mnemonic(e.to_string()))?;
        Ok(Mnemonic { inner })
    }

    /// Parse a whitespace-separated word string, validating the checksum.
    pub fn from_words(words: &str) -> Result<Self, BadKeyError> {
        let inner = bip39::Mnemonic::parse_in(Language::English, words)
            .map_err(|e| BadKeyError::Mnemonic(e.to_string()))?;
        Ok(Mnemonic { inner })
    }

    /// Reduce to the 64-byte master seed.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.inner.to_seed(passphrase))
    }

    /// The entropy the words encode (without the checksum bits).
    pub fn to_entropy(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.inner.to_entropy())
    }

    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.words()
    }
}

impl FromStr for Mnemonic {
    type Err = BadKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::from_words(s)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

// The words are the key; keep them out of debug logs.
impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .finish_non_exhaustive()
    }
}
