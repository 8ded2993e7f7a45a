//! End-to-end flows through the public facade.

use keyforge_core::{BadKeyError, Mnemonic, PrivateKey, PublicKey};

#[test]
fn generate_sign_verify_transport_roundtrip() {
    for private in [PrivateKey::generate_ed25519(), PrivateKey::generate_ecdsa()] {
        let message = b"settle invoice 1209";
        let signature = private.sign(message);

        // Ship the public key as raw bytes and as DER; both verify.
        let from_raw = PublicKey::from_bytes(&private.public_key().to_bytes_raw()).unwrap();
        let from_der = PublicKey::from_bytes(&private.public_key().to_bytes_der()).unwrap();
        assert_eq!(from_raw, from_der);
        assert!(from_raw.verify(message, &signature));
        assert!(!from_raw.verify(message, &PrivateKey::generate_ed25519().sign(message)));
    }
}

#[test]
fn mnemonic_to_account_chain() {
    let mnemonic = Mnemonic::generate().unwrap();

    // Ed25519: root -> m/0' -> m/0'/1' (hardening applied internally)
    let root = PrivateKey::from_mnemonic(&mnemonic, "");
    let account = root.derive(0).unwrap().derive(1).unwrap();
    assert!(account.chain_code().is_some());

    // Same mnemonic, same chain, independently recomputed
    let again = PrivateKey::from_mnemonic(&mnemonic, "")
        .derive(0)
        .unwrap()
        .derive(1)
        .unwrap();
    assert_eq!(account, again);

    // ECDSA side derives its own tree from the same words
    let ec_root = PrivateKey::from_mnemonic_ecdsa(&mnemonic, "").unwrap();
    let ec_account = ec_root.derive(0x8000_002c).unwrap().derive(0).unwrap();
    assert!(ec_account.is_ecdsa());
    assert_ne!(ec_account.to_bytes_raw(), account.to_bytes_raw());
}

#[test]
fn keystore_roundtrip_through_facade() {
    for key in [PrivateKey::generate_ed25519(), PrivateKey::generate_ecdsa()] {
        let json = key.to_keystore("a strong passphrase").unwrap();
        let restored = PrivateKey::from_keystore(&json, "a strong passphrase").unwrap();
        assert_eq!(restored.to_bytes_raw(), key.to_bytes_raw());
        assert_eq!(restored.is_ecdsa(), key.is_ecdsa());

        assert!(matches!(
            PrivateKey::from_keystore(&json, "the wrong passphrase"),
            Err(BadKeyError::Decrypt(_))
        ));
    }
}

#[test]
fn pem_roundtrip_through_facade() {
    for key in [PrivateKey::generate_ed25519(), PrivateKey::generate_ecdsa()] {
        let pem = key.to_pem();
        let restored = PrivateKey::from_pem(&pem, None).unwrap();
        assert_eq!(restored.to_bytes_raw(), key.to_bytes_raw());
        assert_eq!(restored.is_ed25519(), key.is_ed25519());
    }
}

#[test]
fn der_export_reimports_across_entry_points() {
    let key = PrivateKey::generate_ecdsa();
    let der = key.to_bytes_der();

    let via_bytes = PrivateKey::from_bytes(&der).unwrap();
    let via_der = PrivateKey::from_bytes_der(&der).unwrap();
    let via_string = PrivateKey::from_string(&hex::encode(&der)).unwrap();
    assert_eq!(via_bytes.to_bytes_raw(), key.to_bytes_raw());
    assert_eq!(via_der.to_bytes_raw(), key.to_bytes_raw());
    assert_eq!(via_string.to_bytes_raw(), key.to_bytes_raw());
}

#[test]
fn signatures_survive_key_transport() {
    // Sign before export, verify after reimport from every format.
    let key = PrivateKey::generate_ed25519();
    let message = b"minutes of the last meeting";
    let signature = key.sign(message);

    let json = key.to_keystore("pw").unwrap();
    let from_keystore = PrivateKey::from_keystore(&json, "pw").unwrap();
    let from_pem = PrivateKey::from_pem(&key.to_pem(), None).unwrap();

    for restored in [from_keystore, from_pem] {
        assert_eq!(restored.sign(message).as_slice(), signature.as_slice());
        assert!(restored.public_key().verify(message, &signature));
    }
}

#[test]
fn ethereum_address_via_facade() {
    let key = PrivateKey::from_bytes_ecdsa(
        &hex::decode("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        key.public_key().to_ethereum_address().unwrap(),
        "f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );
}
