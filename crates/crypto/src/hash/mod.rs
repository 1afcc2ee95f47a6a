// Copyright (C) Microsoft Corporation. All rights reserved.

//! SHA-2 hash functions.
//!
//! Besides the usual one-shot and streaming interfaces, [`HashContext`]
//! supports [`HashContext::snapshot`], which produces the digest of everything
//! absorbed so far while leaving the context open for more input. The guest
//! facing hash states rely on this to allow repeated squeezes.
//!
//! # Supported Hash Functions
//!
//! - **SHA-256**: 32-byte digest
//! - **SHA-384**: 48-byte digest
//! - **SHA-512**: 64-byte digest
//! - **SHA-512/256**: 32-byte digest, truncated SHA-512 with distinct IVs

use openssl::hash::Hasher;
use openssl::hash::MessageDigest;
use openssl::md::Md;
use openssl::md::MdRef;

use super::*;

/// SHA-2 digest selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// SHA-512/256.
    Sha512_256,
}

impl HashKind {
    /// Digest size in bytes.
    pub fn size(self) -> usize {
        match self {
            HashKind::Sha256 | HashKind::Sha512_256 => 32,
            HashKind::Sha384 => 48,
            HashKind::Sha512 => 64,
        }
    }

    pub(crate) fn message_digest(self) -> Result<MessageDigest, CryptoError> {
        match self {
            HashKind::Sha256 => Ok(MessageDigest::sha256()),
            HashKind::Sha384 => Ok(MessageDigest::sha384()),
            HashKind::Sha512 => Ok(MessageDigest::sha512()),
            HashKind::Sha512_256 => {
                MessageDigest::from_name("sha512-256").ok_or(CryptoError::HashUnavailable)
            }
        }
    }

    pub(crate) fn md(self) -> Result<&'static MdRef, CryptoError> {
        match self {
            HashKind::Sha256 => Ok(Md::sha256()),
            HashKind::Sha384 => Ok(Md::sha384()),
            HashKind::Sha512 => Ok(Md::sha512()),
            HashKind::Sha512_256 => {
                Md::from_nid(self.message_digest()?.type_()).ok_or(CryptoError::HashUnavailable)
            }
        }
    }
}

/// Computes the digest of `data` in a single call.
pub fn digest(kind: HashKind, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let digest = openssl::hash::hash(kind.message_digest()?, data)
        .map_err(|_| CryptoError::HashFinishError)?;
    Ok(digest.to_vec())
}

/// Streaming hash computation.
pub struct HashContext {
    hasher: Hasher,
}

impl HashContext {
    /// Creates a context for the given digest.
    pub fn new(kind: HashKind) -> Result<Self, CryptoError> {
        let hasher = Hasher::new(kind.message_digest()?).map_err(|_| CryptoError::HashInitError)?;
        Ok(Self { hasher })
    }

    /// Absorbs more input.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.hasher
            .update(data)
            .map_err(|_| CryptoError::HashUpdateError)
    }

    /// Returns the digest of all input absorbed so far.
    ///
    /// The running state is copied before finalization, so later calls to
    /// [`HashContext::update`] continue from where the context left off.
    pub fn snapshot(&self) -> Result<Vec<u8>, CryptoError> {
        let mut copy = self.hasher.clone();
        let digest = copy.finish().map_err(|_| CryptoError::HashFinishError)?;
        Ok(digest.to_vec())
    }

    /// Consumes the context and returns the final digest.
    pub fn finish(mut self) -> Result<Vec<u8>, CryptoError> {
        let digest = self
            .hasher
            .finish()
            .map_err(|_| CryptoError::HashFinishError)?;
        Ok(digest.to_vec())
    }
}

#[cfg(test)]
mod tests;
