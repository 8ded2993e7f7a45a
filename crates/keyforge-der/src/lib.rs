//! Minimal DER and PEM encoding layer for keyforge.
//!
//! Key material crosses process boundaries in two shapes: bare DER
//! (algorithm-identifier prefix + raw key bytes) and PEM armor wrapping
//! that DER in base64. This crate owns both and nothing else (no curve
//! arithmetic, no hashing, no randomness), so the parsers can be reasoned
//! about (and fuzzed) in isolation from key handling.
//!
//! The reader is deliberately small: definite lengths only, the handful of
//! universal tags that appear in private/public key envelopes, and hard
//! errors on anything truncated or overlong. Adversarial input must fail
//! with a typed error, never panic.

pub mod asn1;
pub mod oid;
pub mod pem;

pub use asn1::{Asn1Error, Reader, Writer};
pub use pem::{PemDocument, PemError};
