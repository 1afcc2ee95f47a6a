// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::Ed25519PrivateKey;
use guestcrypto_crypto::Ed25519PublicKey;
use guestcrypto_crypto::ED25519_SIGNATURE_SIZE;
use zeroize::Zeroizing;

use super::*;

pub(super) fn import_public(encoded: &[u8], encoding: KeyEncoding) -> CryptoResult<Ed25519PublicKey> {
    let key = match encoding {
        KeyEncoding::Raw => Ed25519PublicKey::from_raw(encoded)?,
        KeyEncoding::Der => Ed25519PublicKey::from_spki_der(encoded)?,
        KeyEncoding::Pem => Ed25519PublicKey::from_pem(encoded)?,
        KeyEncoding::Pkcs8 | KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(key)
}

pub(super) fn export_public(key: &Ed25519PublicKey, encoding: KeyEncoding) -> CryptoResult<Vec<u8>> {
    let encoded = match encoding {
        KeyEncoding::Raw => key.to_raw()?,
        KeyEncoding::Der => key.to_spki_der()?,
        KeyEncoding::Pem => key.to_pem()?,
        KeyEncoding::Pkcs8 | KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(encoded)
}

/// Raw secret keys are the 32-byte seed.
pub(super) fn import_secret(encoded: &[u8], encoding: KeyEncoding) -> CryptoResult<Ed25519PrivateKey> {
    match encoding {
        KeyEncoding::Raw => Ok(Ed25519PrivateKey::from_seed(encoded)?),
        other => import_pkcs8(encoded, other),
    }
}

/// Raw key pairs are `seed || public key`, checked for consistency.
pub(super) fn import_keypair(encoded: &[u8], encoding: KeyEncoding) -> CryptoResult<Ed25519PrivateKey> {
    match encoding {
        KeyEncoding::Raw => Ok(Ed25519PrivateKey::from_keypair_bytes(encoded)?),
        other => import_pkcs8(encoded, other),
    }
}

fn import_pkcs8(encoded: &[u8], encoding: KeyEncoding) -> CryptoResult<Ed25519PrivateKey> {
    let key = match encoding {
        KeyEncoding::Pkcs8 => Ed25519PrivateKey::from_pkcs8_der(encoded)?,
        KeyEncoding::Pem => Ed25519PrivateKey::from_pem(encoded)?,
        KeyEncoding::Raw
        | KeyEncoding::Der
        | KeyEncoding::Sec
        | KeyEncoding::CompressedSec
        | KeyEncoding::Local => return Err(CryptoErrno::UnsupportedEncoding),
    };
    Ok(key)
}

pub(super) fn export_secret(
    key: &Ed25519PrivateKey,
    encoding: KeyEncoding,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    match encoding {
        KeyEncoding::Raw => Ok(key.to_seed()?),
        other => export_pkcs8(key, other),
    }
}

pub(super) fn export_keypair(
    key: &Ed25519PrivateKey,
    encoding: KeyEncoding,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    match encoding {
        KeyEncoding::Raw => Ok(key.to_keypair_bytes()?),
        other => export_pkcs8(key, other),
    }
}

fn export_pkcs8(key: &Ed25519PrivateKey, encoding: KeyEncoding) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let encoded = match encoding {
        KeyEncoding::Pkcs8 => key.to_pkcs8_der()?,
        KeyEncoding::Pem => key.to_pem()?,
        KeyEncoding::Raw
        | KeyEncoding::Der
        | KeyEncoding::Sec
        | KeyEncoding::CompressedSec
        | KeyEncoding::Local => return Err(CryptoErrno::UnsupportedEncoding),
    };
    Ok(encoded)
}

pub(super) fn import_signature(encoded: &[u8], encoding: SignatureEncoding) -> CryptoResult<Vec<u8>> {
    match encoding {
        SignatureEncoding::Raw if encoded.len() == ED25519_SIGNATURE_SIZE => Ok(encoded.to_vec()),
        SignatureEncoding::Raw => Err(CryptoErrno::InvalidSignature),
        SignatureEncoding::Der => Err(CryptoErrno::UnsupportedEncoding),
    }
}

pub(super) fn export_signature(raw: &[u8], encoding: SignatureEncoding) -> CryptoResult<Vec<u8>> {
    match encoding {
        SignatureEncoding::Raw => Ok(raw.to_vec()),
        SignatureEncoding::Der => Err(CryptoErrno::UnsupportedEncoding),
    }
}
