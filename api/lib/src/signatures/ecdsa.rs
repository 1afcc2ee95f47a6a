// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::ecdsa_signature_from_der;
use guestcrypto_crypto::ecdsa_signature_to_der;
use guestcrypto_crypto::EccCurve;
use guestcrypto_crypto::EccPrivateKey;
use guestcrypto_crypto::EccPublicKey;
use zeroize::Zeroizing;

use super::*;

pub(super) fn import_public(
    curve: EccCurve,
    encoded: &[u8],
    encoding: KeyEncoding,
) -> CryptoResult<EccPublicKey> {
    let key = match encoding {
        KeyEncoding::Raw | KeyEncoding::Sec | KeyEncoding::CompressedSec => {
            EccPublicKey::from_sec1_point(curve, encoded)?
        }
        KeyEncoding::Der => EccPublicKey::from_spki_der(curve, encoded)?,
        KeyEncoding::Pem => EccPublicKey::from_pem(curve, encoded)?,
        KeyEncoding::Pkcs8 | KeyEncoding::Local => return Err(CryptoErrno::UnsupportedEncoding),
    };
    Ok(key)
}

pub(super) fn export_public(key: &EccPublicKey, encoding: KeyEncoding) -> CryptoResult<Vec<u8>> {
    let encoded = match encoding {
        KeyEncoding::Raw | KeyEncoding::Sec => key.to_sec1_point(false)?,
        KeyEncoding::CompressedSec => key.to_sec1_point(true)?,
        KeyEncoding::Der => key.to_spki_der()?,
        KeyEncoding::Pem => key.to_pem()?,
        KeyEncoding::Pkcs8 | KeyEncoding::Local => return Err(CryptoErrno::UnsupportedEncoding),
    };
    Ok(encoded)
}

/// Secret keys and key pairs share one set of encodings.
pub(super) fn import_secret(
    curve: EccCurve,
    encoded: &[u8],
    encoding: KeyEncoding,
) -> CryptoResult<EccPrivateKey> {
    let key = match encoding {
        KeyEncoding::Raw => EccPrivateKey::from_scalar(curve, encoded)?,
        KeyEncoding::Pkcs8 => EccPrivateKey::from_pkcs8_der(curve, encoded)?,
        KeyEncoding::Pem => EccPrivateKey::from_pem(curve, encoded)?,
        KeyEncoding::Der => EccPrivateKey::from_sec1_der(curve, encoded)?,
        KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(key)
}

pub(super) fn export_secret(
    key: &EccPrivateKey,
    encoding: KeyEncoding,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let encoded = match encoding {
        KeyEncoding::Raw => key.to_scalar()?,
        KeyEncoding::Pkcs8 => key.to_pkcs8_der()?,
        KeyEncoding::Pem => key.to_pem()?,
        KeyEncoding::Der => key.to_sec1_der()?,
        KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(encoded)
}

/// Normalizes an encoded signature to raw `r || s`.
pub(super) fn import_signature(
    curve: EccCurve,
    encoded: &[u8],
    encoding: SignatureEncoding,
) -> CryptoResult<Vec<u8>> {
    match encoding {
        SignatureEncoding::Raw => {
            if encoded.len() != 2 * curve.scalar_size() {
                return Err(CryptoErrno::InvalidSignature);
            }
            Ok(encoded.to_vec())
        }
        SignatureEncoding::Der => Ok(ecdsa_signature_from_der(curve, encoded)?),
    }
}

pub(super) fn export_signature(
    curve: EccCurve,
    raw: &[u8],
    encoding: SignatureEncoding,
) -> CryptoResult<Vec<u8>> {
    match encoding {
        SignatureEncoding::Raw => Ok(raw.to_vec()),
        SignatureEncoding::Der => Ok(ecdsa_signature_to_der(curve, raw)?),
    }
}
