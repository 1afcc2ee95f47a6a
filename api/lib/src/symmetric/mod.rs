// Copyright (C) Microsoft Corporation. All rights reserved.

//! Symmetric algorithms: hashes, MACs, HKDF and AEAD ciphers.
//!
//! Every algorithm belongs to a [`Category`] whose [`Capabilities`] decide
//! which state operations are legal. The table is checked once per call in
//! [`SymmetricState`] before dispatching to the algorithm.

mod aead;
mod hash;
mod hkdf;
mod hmac;
mod key;
mod state;
mod tag;

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use guestcrypto_crypto::AeadKind;
use guestcrypto_crypto::HashKind;
pub(crate) use key::SymmetricKey;
pub(crate) use state::SymmetricState;
pub(crate) use tag::SymmetricTag;

use super::*;

/// Symmetric algorithms offered to guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetricAlgorithm {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA-512/256
    Sha512_256,
    /// HMAC/SHA-256
    HmacSha256,
    /// HMAC/SHA-384
    HmacSha384,
    /// HMAC/SHA-512
    HmacSha512,
    /// HKDF-EXTRACT/SHA-256
    HkdfExtractSha256,
    /// HKDF-EXTRACT/SHA-512
    HkdfExtractSha512,
    /// HKDF-EXPAND/SHA-256
    HkdfExpandSha256,
    /// HKDF-EXPAND/SHA-512
    HkdfExpandSha512,
    /// AES-128-GCM
    Aes128Gcm,
    /// AES-256-GCM
    Aes256Gcm,
    /// CHACHA20-POLY1305
    ChaCha20Poly1305,
}

const SYMMETRIC_ALGORITHMS: [SymmetricAlgorithm; 14] = [
    SymmetricAlgorithm::Sha256,
    SymmetricAlgorithm::Sha384,
    SymmetricAlgorithm::Sha512,
    SymmetricAlgorithm::Sha512_256,
    SymmetricAlgorithm::HmacSha256,
    SymmetricAlgorithm::HmacSha384,
    SymmetricAlgorithm::HmacSha512,
    SymmetricAlgorithm::HkdfExtractSha256,
    SymmetricAlgorithm::HkdfExtractSha512,
    SymmetricAlgorithm::HkdfExpandSha256,
    SymmetricAlgorithm::HkdfExpandSha512,
    SymmetricAlgorithm::Aes128Gcm,
    SymmetricAlgorithm::Aes256Gcm,
    SymmetricAlgorithm::ChaCha20Poly1305,
];

impl SymmetricAlgorithm {
    /// Every algorithm this crate offers.
    pub const ALL: &'static [SymmetricAlgorithm] = &SYMMETRIC_ALGORITHMS;

    /// Canonical algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            SymmetricAlgorithm::Sha256 => "SHA-256",
            SymmetricAlgorithm::Sha384 => "SHA-384",
            SymmetricAlgorithm::Sha512 => "SHA-512",
            SymmetricAlgorithm::Sha512_256 => "SHA-512/256",
            SymmetricAlgorithm::HmacSha256 => "HMAC/SHA-256",
            SymmetricAlgorithm::HmacSha384 => "HMAC/SHA-384",
            SymmetricAlgorithm::HmacSha512 => "HMAC/SHA-512",
            SymmetricAlgorithm::HkdfExtractSha256 => "HKDF-EXTRACT/SHA-256",
            SymmetricAlgorithm::HkdfExtractSha512 => "HKDF-EXTRACT/SHA-512",
            SymmetricAlgorithm::HkdfExpandSha256 => "HKDF-EXPAND/SHA-256",
            SymmetricAlgorithm::HkdfExpandSha512 => "HKDF-EXPAND/SHA-512",
            SymmetricAlgorithm::Aes128Gcm => "AES-128-GCM",
            SymmetricAlgorithm::Aes256Gcm => "AES-256-GCM",
            SymmetricAlgorithm::ChaCha20Poly1305 => "CHACHA20-POLY1305",
        }
    }

    pub(crate) fn family(self) -> SymmetricFamily {
        match self {
            SymmetricAlgorithm::Sha256 => SymmetricFamily::Hash(HashKind::Sha256),
            SymmetricAlgorithm::Sha384 => SymmetricFamily::Hash(HashKind::Sha384),
            SymmetricAlgorithm::Sha512 => SymmetricFamily::Hash(HashKind::Sha512),
            SymmetricAlgorithm::Sha512_256 => SymmetricFamily::Hash(HashKind::Sha512_256),
            SymmetricAlgorithm::HmacSha256 => SymmetricFamily::Hmac(HashKind::Sha256),
            SymmetricAlgorithm::HmacSha384 => SymmetricFamily::Hmac(HashKind::Sha384),
            SymmetricAlgorithm::HmacSha512 => SymmetricFamily::Hmac(HashKind::Sha512),
            SymmetricAlgorithm::HkdfExtractSha256 => SymmetricFamily::HkdfExtract(HashKind::Sha256),
            SymmetricAlgorithm::HkdfExtractSha512 => SymmetricFamily::HkdfExtract(HashKind::Sha512),
            SymmetricAlgorithm::HkdfExpandSha256 => SymmetricFamily::HkdfExpand(HashKind::Sha256),
            SymmetricAlgorithm::HkdfExpandSha512 => SymmetricFamily::HkdfExpand(HashKind::Sha512),
            SymmetricAlgorithm::Aes128Gcm => SymmetricFamily::Aead(AeadKind::Aes128Gcm),
            SymmetricAlgorithm::Aes256Gcm => SymmetricFamily::Aead(AeadKind::Aes256Gcm),
            SymmetricAlgorithm::ChaCha20Poly1305 => {
                SymmetricFamily::Aead(AeadKind::ChaCha20Poly1305)
            }
        }
    }

    /// Length of a freshly generated or derived key, if the algorithm takes one.
    pub(crate) fn key_len(self) -> CryptoResult<usize> {
        match self.family() {
            SymmetricFamily::Hash(_) => Err(CryptoErrno::KeyNotSupported),
            SymmetricFamily::Hmac(kind)
            | SymmetricFamily::HkdfExtract(kind)
            | SymmetricFamily::HkdfExpand(kind) => Ok(kind.size()),
            SymmetricFamily::Aead(kind) => Ok(kind.key_size()),
        }
    }
}

impl FromStr for SymmetricAlgorithm {
    type Err = CryptoErrno;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SYMMETRIC_ALGORITHMS
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
            .ok_or(CryptoErrno::AlgorithmNotSupported)
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithm family with the primitive parameters it runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymmetricFamily {
    Hash(HashKind),
    Hmac(HashKind),
    HkdfExtract(HashKind),
    HkdfExpand(HashKind),
    Aead(AeadKind),
}

impl SymmetricFamily {
    pub(crate) fn category(self) -> Category {
        match self {
            SymmetricFamily::Hash(_) => Category::Hash,
            SymmetricFamily::Hmac(_) => Category::Mac,
            SymmetricFamily::HkdfExtract(_) | SymmetricFamily::HkdfExpand(_) => Category::Kdf,
            SymmetricFamily::Aead(_) => Category::Aead,
        }
    }
}

/// Operation-legality class of a symmetric algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Hash,
    Mac,
    Kdf,
    Aead,
}

bitflags! {
    /// State operations a category permits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct Capabilities: u16 {
        const ABSORB = 1 << 0;
        const SQUEEZE = 1 << 1;
        const SQUEEZE_TAG = 1 << 2;
        const SQUEEZE_KEY = 1 << 3;
        const MAX_TAG_LEN = 1 << 4;
        const ENCRYPT = 1 << 5;
        const DECRYPT = 1 << 6;
        const RATCHET = 1 << 7;
    }
}

impl Category {
    pub(crate) fn capabilities(self) -> Capabilities {
        match self {
            Category::Hash => Capabilities::ABSORB | Capabilities::SQUEEZE,
            Category::Mac => Capabilities::ABSORB | Capabilities::SQUEEZE_TAG,
            Category::Kdf => {
                Capabilities::ABSORB | Capabilities::SQUEEZE | Capabilities::SQUEEZE_KEY
            }
            Category::Aead => {
                Capabilities::ABSORB
                    | Capabilities::MAX_TAG_LEN
                    | Capabilities::ENCRYPT
                    | Capabilities::DECRYPT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for alg in SYMMETRIC_ALGORITHMS {
            assert_eq!(alg.name().parse::<SymmetricAlgorithm>(), Ok(alg));
        }
        assert_eq!(
            "sha-256".parse::<SymmetricAlgorithm>(),
            Ok(SymmetricAlgorithm::Sha256)
        );
        assert_eq!(
            "SHA-3".parse::<SymmetricAlgorithm>(),
            Err(CryptoErrno::AlgorithmNotSupported)
        );
    }

    #[test]
    fn test_legality_matrix() {
        let hash = Category::Hash.capabilities();
        assert!(hash.contains(Capabilities::SQUEEZE));
        assert!(!hash.contains(Capabilities::SQUEEZE_TAG));

        let mac = Category::Mac.capabilities();
        assert!(mac.contains(Capabilities::SQUEEZE_TAG));
        assert!(!mac.contains(Capabilities::SQUEEZE));

        let kdf = Category::Kdf.capabilities();
        assert!(kdf.contains(Capabilities::SQUEEZE_KEY));
        assert!(!kdf.contains(Capabilities::ENCRYPT));

        let aead = Category::Aead.capabilities();
        assert!(aead.contains(Capabilities::ENCRYPT | Capabilities::DECRYPT));
        assert!(!aead.contains(Capabilities::SQUEEZE));

        for category in [Category::Hash, Category::Mac, Category::Kdf, Category::Aead] {
            assert!(!category.capabilities().contains(Capabilities::RATCHET));
        }
    }

    #[test]
    fn test_key_lengths() {
        assert_eq!(
            SymmetricAlgorithm::Sha256.key_len(),
            Err(CryptoErrno::KeyNotSupported)
        );
        assert_eq!(SymmetricAlgorithm::HmacSha512.key_len(), Ok(64));
        assert_eq!(SymmetricAlgorithm::Aes128Gcm.key_len(), Ok(16));
        assert_eq!(SymmetricAlgorithm::ChaCha20Poly1305.key_len(), Ok(32));
    }
}
