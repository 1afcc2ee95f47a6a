// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::RsaPrivateKey;
use guestcrypto_crypto::RsaPublicKey;
use zeroize::Zeroizing;

use super::*;

pub(super) fn import_public(
    scheme: RsaScheme,
    encoded: &[u8],
    encoding: KeyEncoding,
) -> CryptoResult<RsaPublicKey> {
    let key = match encoding {
        KeyEncoding::Raw => RsaPublicKey::from_pkcs1_der(scheme.bits, encoded)?,
        KeyEncoding::Der => RsaPublicKey::from_spki_der(scheme.bits, encoded)?,
        KeyEncoding::Pem => RsaPublicKey::from_pem(scheme.bits, encoded)?,
        KeyEncoding::Pkcs8 | KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(key)
}

pub(super) fn export_public(key: &RsaPublicKey, encoding: KeyEncoding) -> CryptoResult<Vec<u8>> {
    let encoded = match encoding {
        KeyEncoding::Raw => key.to_pkcs1_der()?,
        KeyEncoding::Der => key.to_spki_der()?,
        KeyEncoding::Pem => key.to_pem()?,
        KeyEncoding::Pkcs8 | KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(encoded)
}

/// Raw private keys are PKCS#1 RSAPrivateKey DER.
pub(super) fn import_secret(
    scheme: RsaScheme,
    encoded: &[u8],
    encoding: KeyEncoding,
) -> CryptoResult<RsaPrivateKey> {
    let key = match encoding {
        KeyEncoding::Raw => RsaPrivateKey::from_pkcs1_der(scheme.bits, encoded)?,
        KeyEncoding::Pkcs8 => RsaPrivateKey::from_pkcs8_der(scheme.bits, encoded)?,
        KeyEncoding::Pem => RsaPrivateKey::from_pem(scheme.bits, encoded)?,
        KeyEncoding::Der | KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(key)
}

pub(super) fn export_secret(
    key: &RsaPrivateKey,
    encoding: KeyEncoding,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let encoded = match encoding {
        KeyEncoding::Raw => key.to_pkcs1_der()?,
        KeyEncoding::Pkcs8 => key.to_pkcs8_der()?,
        KeyEncoding::Pem => key.to_pem()?,
        KeyEncoding::Der | KeyEncoding::Sec | KeyEncoding::CompressedSec | KeyEncoding::Local => {
            return Err(CryptoErrno::UnsupportedEncoding)
        }
    };
    Ok(encoded)
}

/// Signatures are always the width of the modulus.
pub(super) fn import_signature(
    scheme: RsaScheme,
    encoded: &[u8],
    encoding: SignatureEncoding,
) -> CryptoResult<Vec<u8>> {
    match encoding {
        SignatureEncoding::Raw if encoded.len() * 8 == scheme.bits as usize => {
            Ok(encoded.to_vec())
        }
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

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use guestcrypto_crypto::PrivateKey;

    use super::*;

    fn scheme() -> RsaScheme {
        match SignatureAlgorithm::RsaPkcs1_2048Sha256.family() {
            SignatureFamily::Rsa(scheme) => scheme,
            SignatureFamily::Ecdsa(_) | SignatureFamily::Ed25519 => panic!("not RSA"),
        }
    }

    fn key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| RsaPrivateKey::generate(2048).unwrap())
    }

    #[test]
    fn test_secret_encodings() {
        for encoding in [KeyEncoding::Raw, KeyEncoding::Pkcs8, KeyEncoding::Pem] {
            let encoded = export_secret(key(), encoding).unwrap();
            let imported = import_secret(scheme(), &encoded, encoding).unwrap();
            assert_eq!(
                *imported.to_pkcs1_der().unwrap(),
                *key().to_pkcs1_der().unwrap()
            );
        }
        assert_eq!(
            export_secret(key(), KeyEncoding::Der).unwrap_err(),
            CryptoErrno::UnsupportedEncoding
        );
    }

    #[test]
    fn test_public_encodings() {
        let public = key().public_key().unwrap();
        for encoding in [KeyEncoding::Raw, KeyEncoding::Der, KeyEncoding::Pem] {
            let encoded = export_public(&public, encoding).unwrap();
            let imported = import_public(scheme(), &encoded, encoding).unwrap();
            assert_eq!(
                imported.to_spki_der().unwrap(),
                public.to_spki_der().unwrap()
            );
        }
    }

    #[test]
    fn test_modulus_size_checked() {
        let der = export_secret(key(), KeyEncoding::Pkcs8).unwrap();
        let SignatureFamily::Rsa(scheme_3072) = SignatureAlgorithm::RsaPss3072Sha384.family()
        else {
            panic!("not RSA");
        };
        assert_eq!(
            import_secret(scheme_3072, &der, KeyEncoding::Pkcs8).unwrap_err(),
            CryptoErrno::InvalidKey
        );
        assert_eq!(
            import_signature(scheme(), &[0u8; 255], SignatureEncoding::Raw),
            Err(CryptoErrno::InvalidSignature)
        );
    }
}
