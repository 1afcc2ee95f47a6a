// Copyright (C) Microsoft Corporation. All rights reserved.

//! Signature keys, signatures and their streaming states.
//!
//! Key objects are closed enums over the algorithm families. Each family
//! module owns the encodings it accepts; any other encoding is rejected with
//! `UnsupportedEncoding`.

mod ecdsa;
mod eddsa;
mod encoding;
mod keys;
mod rsa;
mod signature;
mod state;

use std::fmt;
use std::str::FromStr;

pub use encoding::KeyEncoding;
pub use encoding::SignatureEncoding;
use guestcrypto_crypto::EccCurve;
use guestcrypto_crypto::HashKind;
use guestcrypto_crypto::RsaPadding;
pub(crate) use keys::SignatureKeyPair;
pub(crate) use keys::SignaturePublicKey;
pub(crate) use keys::SignatureSecretKey;
pub(crate) use signature::Signature;
pub(crate) use state::SignatureState;
pub(crate) use state::VerificationState;

use super::*;

/// Signature algorithms offered to guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// ECDSA over P-256 with SHA-256
    EcdsaP256Sha256,
    /// ECDSA over secp256k1 with SHA-256
    EcdsaK256Sha256,
    /// Pure Ed25519
    Ed25519,
    /// RSA-2048 PKCS#1 v1.5 with SHA-256
    RsaPkcs1_2048Sha256,
    /// RSA-2048 PKCS#1 v1.5 with SHA-384
    RsaPkcs1_2048Sha384,
    /// RSA-2048 PKCS#1 v1.5 with SHA-512
    RsaPkcs1_2048Sha512,
    /// RSA-3072 PKCS#1 v1.5 with SHA-384
    RsaPkcs1_3072Sha384,
    /// RSA-3072 PKCS#1 v1.5 with SHA-512
    RsaPkcs1_3072Sha512,
    /// RSA-4096 PKCS#1 v1.5 with SHA-512
    RsaPkcs1_4096Sha512,
    /// RSA-2048 PSS with SHA-256
    RsaPss2048Sha256,
    /// RSA-2048 PSS with SHA-384
    RsaPss2048Sha384,
    /// RSA-2048 PSS with SHA-512
    RsaPss2048Sha512,
    /// RSA-3072 PSS with SHA-384
    RsaPss3072Sha384,
    /// RSA-3072 PSS with SHA-512
    RsaPss3072Sha512,
    /// RSA-4096 PSS with SHA-512
    RsaPss4096Sha512,
}

const SIGNATURE_ALGORITHMS: [SignatureAlgorithm; 15] = [
    SignatureAlgorithm::EcdsaP256Sha256,
    SignatureAlgorithm::EcdsaK256Sha256,
    SignatureAlgorithm::Ed25519,
    SignatureAlgorithm::RsaPkcs1_2048Sha256,
    SignatureAlgorithm::RsaPkcs1_2048Sha384,
    SignatureAlgorithm::RsaPkcs1_2048Sha512,
    SignatureAlgorithm::RsaPkcs1_3072Sha384,
    SignatureAlgorithm::RsaPkcs1_3072Sha512,
    SignatureAlgorithm::RsaPkcs1_4096Sha512,
    SignatureAlgorithm::RsaPss2048Sha256,
    SignatureAlgorithm::RsaPss2048Sha384,
    SignatureAlgorithm::RsaPss2048Sha512,
    SignatureAlgorithm::RsaPss3072Sha384,
    SignatureAlgorithm::RsaPss3072Sha512,
    SignatureAlgorithm::RsaPss4096Sha512,
];

impl SignatureAlgorithm {
    /// Every algorithm this crate offers.
    pub const ALL: &'static [SignatureAlgorithm] = &SIGNATURE_ALGORITHMS;

    /// Canonical algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 => "ECDSA_P256_SHA256",
            SignatureAlgorithm::EcdsaK256Sha256 => "ECDSA_K256_SHA256",
            SignatureAlgorithm::Ed25519 => "Ed25519",
            SignatureAlgorithm::RsaPkcs1_2048Sha256 => "RSA_PKCS1_2048_SHA256",
            SignatureAlgorithm::RsaPkcs1_2048Sha384 => "RSA_PKCS1_2048_SHA384",
            SignatureAlgorithm::RsaPkcs1_2048Sha512 => "RSA_PKCS1_2048_SHA512",
            SignatureAlgorithm::RsaPkcs1_3072Sha384 => "RSA_PKCS1_3072_SHA384",
            SignatureAlgorithm::RsaPkcs1_3072Sha512 => "RSA_PKCS1_3072_SHA512",
            SignatureAlgorithm::RsaPkcs1_4096Sha512 => "RSA_PKCS1_4096_SHA512",
            SignatureAlgorithm::RsaPss2048Sha256 => "RSA_PSS_2048_SHA256",
            SignatureAlgorithm::RsaPss2048Sha384 => "RSA_PSS_2048_SHA384",
            SignatureAlgorithm::RsaPss2048Sha512 => "RSA_PSS_2048_SHA512",
            SignatureAlgorithm::RsaPss3072Sha384 => "RSA_PSS_3072_SHA384",
            SignatureAlgorithm::RsaPss3072Sha512 => "RSA_PSS_3072_SHA512",
            SignatureAlgorithm::RsaPss4096Sha512 => "RSA_PSS_4096_SHA512",
        }
    }

    pub(crate) fn family(self) -> SignatureFamily {
        let rsa = |padding, bits, hash| {
            SignatureFamily::Rsa(RsaScheme {
                alg: self,
                padding,
                bits,
                hash,
            })
        };
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 => SignatureFamily::Ecdsa(EccCurve::P256),
            SignatureAlgorithm::EcdsaK256Sha256 => SignatureFamily::Ecdsa(EccCurve::Secp256k1),
            SignatureAlgorithm::Ed25519 => SignatureFamily::Ed25519,
            SignatureAlgorithm::RsaPkcs1_2048Sha256 => rsa(RsaPadding::Pkcs1, 2048, HashKind::Sha256),
            SignatureAlgorithm::RsaPkcs1_2048Sha384 => rsa(RsaPadding::Pkcs1, 2048, HashKind::Sha384),
            SignatureAlgorithm::RsaPkcs1_2048Sha512 => rsa(RsaPadding::Pkcs1, 2048, HashKind::Sha512),
            SignatureAlgorithm::RsaPkcs1_3072Sha384 => rsa(RsaPadding::Pkcs1, 3072, HashKind::Sha384),
            SignatureAlgorithm::RsaPkcs1_3072Sha512 => rsa(RsaPadding::Pkcs1, 3072, HashKind::Sha512),
            SignatureAlgorithm::RsaPkcs1_4096Sha512 => rsa(RsaPadding::Pkcs1, 4096, HashKind::Sha512),
            SignatureAlgorithm::RsaPss2048Sha256 => rsa(RsaPadding::Pss, 2048, HashKind::Sha256),
            SignatureAlgorithm::RsaPss2048Sha384 => rsa(RsaPadding::Pss, 2048, HashKind::Sha384),
            SignatureAlgorithm::RsaPss2048Sha512 => rsa(RsaPadding::Pss, 2048, HashKind::Sha512),
            SignatureAlgorithm::RsaPss3072Sha384 => rsa(RsaPadding::Pss, 3072, HashKind::Sha384),
            SignatureAlgorithm::RsaPss3072Sha512 => rsa(RsaPadding::Pss, 3072, HashKind::Sha512),
            SignatureAlgorithm::RsaPss4096Sha512 => rsa(RsaPadding::Pss, 4096, HashKind::Sha512),
        }
    }

    fn ecdsa(curve: EccCurve) -> Self {
        match curve {
            EccCurve::P256 => SignatureAlgorithm::EcdsaP256Sha256,
            EccCurve::Secp256k1 => SignatureAlgorithm::EcdsaK256Sha256,
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoErrno;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SIGNATURE_ALGORITHMS
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
            .ok_or(CryptoErrno::AlgorithmNotSupported)
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignatureFamily {
    Ecdsa(EccCurve),
    Ed25519,
    Rsa(RsaScheme),
}

/// Full parameter set of one RSA signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RsaScheme {
    pub(crate) alg: SignatureAlgorithm,
    pub(crate) padding: RsaPadding,
    pub(crate) bits: u32,
    pub(crate) hash: HashKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for alg in SIGNATURE_ALGORITHMS {
            assert_eq!(alg.name().parse::<SignatureAlgorithm>(), Ok(alg));
        }
        assert_eq!(
            "ed25519".parse::<SignatureAlgorithm>(),
            Ok(SignatureAlgorithm::Ed25519)
        );
        assert_eq!(
            "RSA_PSS_1024_SHA256".parse::<SignatureAlgorithm>(),
            Err(CryptoErrno::AlgorithmNotSupported)
        );
    }

    #[test]
    fn test_rsa_parameters() {
        let SignatureFamily::Rsa(scheme) = SignatureAlgorithm::RsaPss3072Sha384.family() else {
            panic!("not RSA");
        };
        assert_eq!(scheme.alg, SignatureAlgorithm::RsaPss3072Sha384);
        assert_eq!(scheme.padding, RsaPadding::Pss);
        assert_eq!(scheme.bits, 3072);
        assert_eq!(scheme.hash, HashKind::Sha384);
    }

    #[test]
    fn test_ecdsa_curve_mapping() {
        for curve in [EccCurve::P256, EccCurve::Secp256k1] {
            assert_eq!(
                SignatureAlgorithm::ecdsa(curve).family(),
                SignatureFamily::Ecdsa(curve)
            );
        }
    }
}
