// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::EccPrivateKey;
use guestcrypto_crypto::EccPublicKey;
use guestcrypto_crypto::Ed25519PrivateKey;
use guestcrypto_crypto::Ed25519PublicKey;
use guestcrypto_crypto::PrivateKey;
use guestcrypto_crypto::RsaPrivateKey;
use guestcrypto_crypto::RsaPublicKey;
use zeroize::Zeroizing;

use super::*;

/// Public half of a signature key pair.
#[derive(Debug, Clone)]
pub(crate) enum SignaturePublicKey {
    Ecdsa(EccPublicKey),
    Ed25519(Ed25519PublicKey),
    Rsa(RsaScheme, RsaPublicKey),
}

impl SignaturePublicKey {
    pub(crate) fn import(
        alg: SignatureAlgorithm,
        encoded: &[u8],
        encoding: KeyEncoding,
    ) -> CryptoResult<Self> {
        let key = match alg.family() {
            SignatureFamily::Ecdsa(curve) => {
                SignaturePublicKey::Ecdsa(ecdsa::import_public(curve, encoded, encoding)?)
            }
            SignatureFamily::Ed25519 => {
                SignaturePublicKey::Ed25519(eddsa::import_public(encoded, encoding)?)
            }
            SignatureFamily::Rsa(scheme) => {
                SignaturePublicKey::Rsa(scheme, rsa::import_public(scheme, encoded, encoding)?)
            }
        };
        Ok(key)
    }

    pub(crate) fn alg(&self) -> SignatureAlgorithm {
        match self {
            SignaturePublicKey::Ecdsa(key) => SignatureAlgorithm::ecdsa(key.curve()),
            SignaturePublicKey::Ed25519(_) => SignatureAlgorithm::Ed25519,
            SignaturePublicKey::Rsa(scheme, _) => scheme.alg,
        }
    }

    pub(crate) fn export(&self, encoding: KeyEncoding) -> CryptoResult<Vec<u8>> {
        match self {
            SignaturePublicKey::Ecdsa(key) => ecdsa::export_public(key, encoding),
            SignaturePublicKey::Ed25519(key) => eddsa::export_public(key, encoding),
            SignaturePublicKey::Rsa(_, key) => rsa::export_public(key, encoding),
        }
    }

    /// Re-checks the key material.
    pub(crate) fn verify(&self) -> CryptoResult<()> {
        match self {
            SignaturePublicKey::Ecdsa(key) => key.validate()?,
            // Raw import already rejects anything that is not a valid encoding.
            SignaturePublicKey::Ed25519(_) => {}
            SignaturePublicKey::Rsa(_, key) => key.validate()?,
        }
        Ok(())
    }
}

/// Private half of a signature key pair.
#[derive(Debug, Clone)]
pub(crate) enum SignatureSecretKey {
    Ecdsa(EccPrivateKey),
    Ed25519(Ed25519PrivateKey),
    Rsa(RsaScheme, RsaPrivateKey),
}

impl SignatureSecretKey {
    pub(crate) fn import(
        alg: SignatureAlgorithm,
        encoded: &[u8],
        encoding: KeyEncoding,
    ) -> CryptoResult<Self> {
        let key = match alg.family() {
            SignatureFamily::Ecdsa(curve) => {
                SignatureSecretKey::Ecdsa(ecdsa::import_secret(curve, encoded, encoding)?)
            }
            SignatureFamily::Ed25519 => {
                SignatureSecretKey::Ed25519(eddsa::import_secret(encoded, encoding)?)
            }
            SignatureFamily::Rsa(scheme) => {
                SignatureSecretKey::Rsa(scheme, rsa::import_secret(scheme, encoded, encoding)?)
            }
        };
        Ok(key)
    }

    pub(crate) fn alg(&self) -> SignatureAlgorithm {
        match self {
            SignatureSecretKey::Ecdsa(key) => SignatureAlgorithm::ecdsa(key.curve()),
            SignatureSecretKey::Ed25519(_) => SignatureAlgorithm::Ed25519,
            SignatureSecretKey::Rsa(scheme, _) => scheme.alg,
        }
    }

    pub(crate) fn export(&self, encoding: KeyEncoding) -> CryptoResult<Zeroizing<Vec<u8>>> {
        match self {
            SignatureSecretKey::Ecdsa(key) => ecdsa::export_secret(key, encoding),
            SignatureSecretKey::Ed25519(key) => eddsa::export_secret(key, encoding),
            SignatureSecretKey::Rsa(_, key) => rsa::export_secret(key, encoding),
        }
    }

    pub(crate) fn public_key(&self) -> CryptoResult<SignaturePublicKey> {
        let key = match self {
            SignatureSecretKey::Ecdsa(key) => SignaturePublicKey::Ecdsa(key.public_key()?),
            SignatureSecretKey::Ed25519(key) => SignaturePublicKey::Ed25519(key.public_key()?),
            SignatureSecretKey::Rsa(scheme, key) => {
                SignaturePublicKey::Rsa(*scheme, key.public_key()?)
            }
        };
        Ok(key)
    }

    /// Returns `true` if `public_key` is this key's public half under the same algorithm.
    fn matches(&self, public_key: &SignaturePublicKey) -> bool {
        match (self, public_key) {
            (SignatureSecretKey::Ecdsa(sk), SignaturePublicKey::Ecdsa(pk)) => sk.matches(pk),
            (SignatureSecretKey::Ed25519(sk), SignaturePublicKey::Ed25519(pk)) => sk.matches(pk),
            (SignatureSecretKey::Rsa(sk_scheme, sk), SignaturePublicKey::Rsa(pk_scheme, pk)) => {
                sk_scheme == pk_scheme && sk.matches(pk)
            }
            (SignatureSecretKey::Ecdsa(_), _)
            | (SignatureSecretKey::Ed25519(_), _)
            | (SignatureSecretKey::Rsa(..), _) => false,
        }
    }
}

/// Signing key pair. The public half is derived on demand.
#[derive(Debug, Clone)]
pub(crate) struct SignatureKeyPair {
    secret: SignatureSecretKey,
}

impl SignatureKeyPair {
    #[tracing::instrument(skip_all, fields(alg = %alg), err(level = "debug"))]
    pub(crate) fn generate(alg: SignatureAlgorithm) -> CryptoResult<Self> {
        let secret = match alg.family() {
            SignatureFamily::Ecdsa(curve) => {
                SignatureSecretKey::Ecdsa(EccPrivateKey::generate(curve)?)
            }
            SignatureFamily::Ed25519 => SignatureSecretKey::Ed25519(Ed25519PrivateKey::generate()?),
            SignatureFamily::Rsa(scheme) => {
                SignatureSecretKey::Rsa(scheme, RsaPrivateKey::generate(scheme.bits)?)
            }
        };
        Ok(Self { secret })
    }

    pub(crate) fn import(
        alg: SignatureAlgorithm,
        encoded: &[u8],
        encoding: KeyEncoding,
    ) -> CryptoResult<Self> {
        let secret = match alg.family() {
            SignatureFamily::Ed25519 => {
                SignatureSecretKey::Ed25519(eddsa::import_keypair(encoded, encoding)?)
            }
            SignatureFamily::Ecdsa(_) | SignatureFamily::Rsa(_) => {
                SignatureSecretKey::import(alg, encoded, encoding)?
            }
        };
        Ok(Self { secret })
    }

    /// Joins two halves after checking they belong together.
    pub(crate) fn from_parts(
        public_key: &SignaturePublicKey,
        secret: SignatureSecretKey,
    ) -> CryptoResult<Self> {
        if !secret.matches(public_key) {
            tracing::debug!(
                secret_alg = %secret.alg(),
                public_alg = %public_key.alg(),
                "public and secret keys do not match"
            );
            return Err(CryptoErrno::InvalidHandle);
        }
        Ok(Self { secret })
    }

    pub(crate) fn alg(&self) -> SignatureAlgorithm {
        self.secret.alg()
    }

    pub(crate) fn export(&self, encoding: KeyEncoding) -> CryptoResult<Zeroizing<Vec<u8>>> {
        match &self.secret {
            SignatureSecretKey::Ed25519(key) => eddsa::export_keypair(key, encoding),
            SignatureSecretKey::Ecdsa(_) | SignatureSecretKey::Rsa(..) => {
                self.secret.export(encoding)
            }
        }
    }

    pub(crate) fn public_key(&self) -> CryptoResult<SignaturePublicKey> {
        self.secret.public_key()
    }

    pub(crate) fn secret_key(&self) -> SignatureSecretKey {
        self.secret.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_halves_rejoin() {
        let keypair = SignatureKeyPair::generate(SignatureAlgorithm::EcdsaP256Sha256).unwrap();
        let public = keypair.public_key().unwrap();
        let secret = keypair.secret_key();
        assert_eq!(public.alg(), SignatureAlgorithm::EcdsaP256Sha256);
        assert_eq!(secret.alg(), SignatureAlgorithm::EcdsaP256Sha256);

        let rejoined = SignatureKeyPair::from_parts(&public, secret).unwrap();
        assert_eq!(
            *rejoined.export(KeyEncoding::Raw).unwrap(),
            *keypair.export(KeyEncoding::Raw).unwrap()
        );
    }

    #[test]
    fn test_mismatched_halves() {
        let a = SignatureKeyPair::generate(SignatureAlgorithm::Ed25519).unwrap();
        let b = SignatureKeyPair::generate(SignatureAlgorithm::Ed25519).unwrap();
        let p256 = SignatureKeyPair::generate(SignatureAlgorithm::EcdsaP256Sha256).unwrap();

        assert_eq!(
            SignatureKeyPair::from_parts(&b.public_key().unwrap(), a.secret_key()).unwrap_err(),
            CryptoErrno::InvalidHandle
        );
        assert_eq!(
            SignatureKeyPair::from_parts(&p256.public_key().unwrap(), a.secret_key()).unwrap_err(),
            CryptoErrno::InvalidHandle
        );
    }

    #[test]
    fn test_public_key_verify() {
        let keypair = SignatureKeyPair::generate(SignatureAlgorithm::EcdsaK256Sha256).unwrap();
        let raw = keypair
            .public_key()
            .unwrap()
            .export(KeyEncoding::Raw)
            .unwrap();
        let public =
            SignaturePublicKey::import(SignatureAlgorithm::EcdsaK256Sha256, &raw, KeyEncoding::Raw)
                .unwrap();
        assert!(public.verify().is_ok());
    }

    #[test]
    fn test_malformed_point_rejected() {
        let mut raw = vec![0x04];
        raw.extend_from_slice(&[0x11; 64]);
        assert_eq!(
            SignaturePublicKey::import(SignatureAlgorithm::EcdsaP256Sha256, &raw, KeyEncoding::Raw)
                .unwrap_err(),
            CryptoErrno::InvalidKey
        );
    }
}
