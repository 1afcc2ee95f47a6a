// Copyright (C) Microsoft Corporation. All rights reserved.

use test_log::test;

use super::*;

const CURVES: [EccCurve; 2] = [EccCurve::P256, EccCurve::Secp256k1];

fn sign(key: &EccPrivateKey, msg: &[u8]) -> Vec<u8> {
    let mut ctx = EcdsaSignContext::new(key).expect("sign init");
    ctx.update(msg).expect("sign update");
    ctx.finish().expect("sign finish")
}

fn verify(key: &EccPublicKey, msg: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let mut ctx = EcdsaVerifyContext::new(key).expect("verify init");
    ctx.update(msg)?;
    ctx.finish(sig)
}

#[test]
fn test_ecdsa_sign_verify() {
    for curve in CURVES {
        let key = EccPrivateKey::generate(curve).expect("generate");
        let public = key.public_key().expect("public");

        let sig = sign(&key, b"testtest");
        assert_eq!(sig.len(), 64);
        assert!(verify(&public, b"testtest", &sig).is_ok());
        assert_eq!(
            verify(&public, b"tampered", &sig),
            Err(CryptoError::SignatureVerificationFailed)
        );
    }
}

#[test]
fn test_ecdsa_context_rejects_reuse() {
    let key = EccPrivateKey::generate(EccCurve::P256).expect("generate");
    let mut ctx = EcdsaSignContext::new(&key).expect("init");
    ctx.update(b"data").expect("update");
    ctx.finish().expect("finish");
    assert_eq!(
        ctx.update(b"more").unwrap_err(),
        CryptoError::SignatureContextFinalized
    );
    assert_eq!(
        ctx.finish().unwrap_err(),
        CryptoError::SignatureContextFinalized
    );
}

#[test]
fn test_signature_der_conversion_k256() {
    let raw = hex::decode("9D92E9FDCA3DDF2E1DDCA1E3B7A79A250B6E4AFFCABF5F9FF4D960B152AB8300E9EB978BD3DA89C42BBFE5A2C2AEB0AF1DD178FB4BCD0833B587D118F59BBB4D").unwrap();
    let der = hex::decode("30460221009d92e9fdca3ddf2e1ddca1e3b7a79a250b6e4affcabf5f9ff4d960b152ab8300022100e9eb978bd3da89c42bbfe5a2c2aeb0af1dd178fb4bcd0833b587d118f59bbb4d").unwrap();

    assert_eq!(
        ecdsa_signature_to_der(EccCurve::Secp256k1, &raw).expect("to der"),
        der
    );
    assert_eq!(
        ecdsa_signature_from_der(EccCurve::Secp256k1, &der).expect("from der"),
        raw
    );
}

#[test]
fn test_signature_der_conversion_p256() {
    let raw = hex::decode("80D5D4769AE4F3998DD6B8B01177DE855204122A361F2189F9567C806DE2673E2FBFD3FF018338875B1D144F583EB6E8DC16CF6EEB2BB5C19A3202464ABB58BD").unwrap();
    let der = hex::decode("304502210080d5d4769ae4f3998dd6b8b01177de855204122a361f2189f9567c806de2673e02202fbfd3ff018338875b1d144f583eb6e8dc16cf6eeb2bb5c19a3202464abb58bd").unwrap();

    assert_eq!(ecdsa_signature_to_der(EccCurve::P256, &raw).expect("to der"), der);
    assert_eq!(ecdsa_signature_from_der(EccCurve::P256, &der).expect("from der"), raw);
}

#[test]
fn test_signature_malformed() {
    assert_eq!(
        ecdsa_signature_to_der(EccCurve::P256, &[1u8; 63]),
        Err(CryptoError::EcdsaInvalidSignature)
    );
    assert_eq!(
        ecdsa_signature_from_der(EccCurve::P256, &[0x30, 0x01, 0x00]),
        Err(CryptoError::EcdsaInvalidSignature)
    );
}

#[test]
fn test_private_key_encodings() {
    for curve in CURVES {
        let key = EccPrivateKey::generate(curve).expect("generate");
        let public = key.public_key().expect("public");

        let scalar = key.to_scalar().expect("scalar");
        assert_eq!(scalar.len(), 32);
        let from_scalar = EccPrivateKey::from_scalar(curve, &scalar).expect("from scalar");
        assert!(from_scalar.matches(&public));

        let pkcs8 = key.to_pkcs8_der().expect("pkcs8");
        let from_pkcs8 = EccPrivateKey::from_pkcs8_der(curve, &pkcs8).expect("from pkcs8");
        assert_eq!(*from_pkcs8.to_scalar().expect("scalar"), *scalar);

        let pem = key.to_pem().expect("pem");
        let from_pem = EccPrivateKey::from_pem(curve, &pem).expect("from pem");
        assert_eq!(*from_pem.to_scalar().expect("scalar"), *scalar);

        let sec1 = key.to_sec1_der().expect("sec1");
        let from_sec1 = EccPrivateKey::from_sec1_der(curve, &sec1).expect("from sec1");
        assert_eq!(*from_sec1.to_scalar().expect("scalar"), *scalar);
    }
}

#[test]
fn test_private_key_wrong_curve_rejected() {
    let key = EccPrivateKey::generate(EccCurve::P256).expect("generate");
    let pkcs8 = key.to_pkcs8_der().expect("pkcs8");
    assert_eq!(
        EccPrivateKey::from_pkcs8_der(EccCurve::Secp256k1, &pkcs8).unwrap_err(),
        CryptoError::EccKeyImportError
    );
}

#[test]
fn test_scalar_out_of_range_rejected() {
    assert!(EccPrivateKey::from_scalar(EccCurve::P256, &[0u8; 32]).is_err());
    assert!(EccPrivateKey::from_scalar(EccCurve::P256, &[0xffu8; 32]).is_err());
    assert!(EccPrivateKey::from_scalar(EccCurve::P256, &[1u8; 31]).is_err());
}

#[test]
fn test_public_key_encodings() {
    for curve in CURVES {
        let key = EccPrivateKey::generate(curve).expect("generate");
        let public = key.public_key().expect("public");

        let uncompressed = public.to_sec1_point(false).expect("uncompressed");
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);

        let compressed = public.to_sec1_point(true).expect("compressed");
        assert_eq!(compressed.len(), 33);

        let from_compressed = EccPublicKey::from_sec1_point(curve, &compressed).expect("import");
        assert_eq!(from_compressed.to_sec1_point(false).expect("export"), uncompressed);

        let spki = public.to_spki_der().expect("spki");
        let from_spki = EccPublicKey::from_spki_der(curve, &spki).expect("from spki");
        assert!(key.matches(&from_spki));

        let pem = public.to_pem().expect("pem");
        let from_pem = EccPublicKey::from_pem(curve, &pem).expect("from pem");
        assert!(key.matches(&from_pem));
        assert!(from_pem.validate().is_ok());
    }
}

#[test]
fn test_point_not_on_curve_rejected() {
    let mut bogus = vec![0x04u8];
    bogus.extend([0x01u8; 64]);
    assert!(EccPublicKey::from_sec1_point(EccCurve::P256, &bogus).is_err());
}

#[test]
fn test_mismatched_keys() {
    let a = EccPrivateKey::generate(EccCurve::P256).expect("generate");
    let b = EccPrivateKey::generate(EccCurve::P256).expect("generate");
    assert!(!a.matches(&b.public_key().expect("public")));
}
