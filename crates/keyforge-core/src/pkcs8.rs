//! PKCS#8 PrivateKeyInfo and SEC1 ECPrivateKey envelopes.
//!
//! The fixed-prefix decode paths in `ed25519`/`ecdsa` handle the exact
//! byte shapes this library emits. This module is the general parser
//! behind them: it walks the ASN.1 structure, reads the algorithm OID and
//! digs the 32-byte key material out of whichever nesting the producer
//! chose. Used by the facade to decide which curve a DER blob belongs to.

use keyforge_der::{asn1::tag, oid, Reader};

use crate::error::BadKeyError;

/// Key material recovered from a PrivateKeyInfo, tagged by algorithm.
pub enum ParsedPrivateKey {
    Ed25519 { seed: [u8; 32] },
    Ecdsa { scalar: [u8; 32] },
}

/// True when `data` parses as a single self-contained DER element;
/// this is the probe that separates DER input from raw key bytes.
pub fn looks_like_der(data: &[u8]) -> bool {
    let mut reader = Reader::new(data);
    reader.read_sequence().is_ok() && reader.finish().is_ok()
}

/// Parse a PrivateKeyInfo: `SEQUENCE { version, AlgorithmIdentifier,
/// privateKey }` where the key material may sit in an OCTET STRING, a
/// nested OCTET STRING, or (older Ed25519 producers) a BIT STRING.
pub fn parse_private_key_info(data: &[u8]) -> Result<ParsedPrivateKey, BadKeyError> {
    let mut reader = Reader::new(data);
    let mut info = reader.read_sequence()?;
    reader.finish()?;

    info.read_integer()?;
    let mut algorithm = info.read_sequence()?;
    let algorithm_oid = algorithm.read_oid()?;

    let key_bytes = match info.peek_tag() {
        Some(tag::BIT_STRING) => info.read_bit_string()?,
        _ => info.read_octet_string()?,
    };

    if algorithm_oid == oid::ED25519 {
        let seed = unwrap_key_material(key_bytes)?;
        Ok(ParsedPrivateKey::Ed25519 { seed })
    } else if algorithm_oid == oid::SECP256K1
        || (algorithm_oid == oid::EC_PUBLIC_KEY && ec_parameters_are_secp256k1(&mut algorithm))
    {
        // id-ecPublicKey producers nest a full SEC1 structure; curve-OID
        // producers store the bare scalar.
        let scalar = match unwrap_key_material(key_bytes) {
            Ok(scalar) => scalar,
            Err(_) => parse_sec1_private_key(key_bytes)?,
        };
        Ok(ParsedPrivateKey::Ecdsa { scalar })
    } else {
        Err(BadKeyError::UnsupportedAlgorithm)
    }
}

fn ec_parameters_are_secp256k1(algorithm: &mut Reader<'_>) -> bool {
    matches!(algorithm.read_oid(), Ok(params) if params == oid::SECP256K1)
}

/// 32 key bytes, either bare or wrapped in one more OCTET STRING.
fn unwrap_key_material(content: &[u8]) -> Result<[u8; 32], BadKeyError> {
    if let Ok(key) = <[u8; 32]>::try_from(content) {
        return Ok(key);
    }
    let mut reader = Reader::new(content);
    let inner = reader.read_octet_string()?;
    reader.finish()?;
    <[u8; 32]>::try_from(inner)
        .map_err(|_| BadKeyError::InvalidPrivateKeyLength(inner.len()))
}

/// Parse a SEC1 ECPrivateKey (RFC 5915): `SEQUENCE { version 1,
/// privateKey OCTET STRING, [0] curve OID OPTIONAL, [1] publicKey
/// OPTIONAL }`. The curve, when named, must be secp256k1.
pub fn parse_sec1_private_key(data: &[u8]) -> Result<[u8; 32], BadKeyError> {
    let mut reader = Reader::new(data);
    let mut key = reader.read_sequence()?;
    reader.finish()?;

    let version = key.read_integer()?;
    if version != [0x01] {
        return Err(BadKeyError::Der(format!(
            "unsupported ECPrivateKey version {version:02x?}"
        )));
    }
    let scalar_bytes = key.read_octet_string()?;
    let scalar = <[u8; 32]>::try_from(scalar_bytes)
        .map_err(|_| BadKeyError::InvalidPrivateKeyLength(scalar_bytes.len()))?;

    if key.peek_tag() == Some(tag::context(0)) {
        let mut params = key.read_context(0)?;
        let curve = params.read_oid()?;
        if curve != oid::SECP256K1 {
            return Err(BadKeyError::UnsupportedAlgorithm);
        }
    }

    Ok(scalar)
}

/// Algorithm OID of a PrivateKeyInfo without recovering the key, enough
/// for the facade's curve dispatch when a full parse is not needed.
pub fn private_key_algorithm(data: &[u8]) -> Result<Vec<u8>, BadKeyError> {
    let mut reader = Reader::new(data);
    let mut info = reader.read_sequence()?;
    info.read_integer()?;
    let mut algorithm = info.read_sequence()?;
    Ok(algorithm.read_oid()?.to_vec())
}
