// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits shared by the asymmetric key types and their streaming contexts.
//!
//! - [`PrivateKey`] and [`PublicKey`] link a private key to its public half.
//! - [`SignContext`] and [`VerifyContext`] give every signature scheme the
//!   same streaming shape: any number of `update` calls followed by a single
//!   `finish`. A finished context rejects further use.

use super::*;

/// Private half of a key pair.
pub trait PrivateKey {
    /// Matching public key type.
    type PublicKey: PublicKey;

    /// Derives the public key.
    fn public_key(&self) -> Result<Self::PublicKey, CryptoError>;

    /// Returns `true` if `public_key` belongs to this private key.
    fn matches(&self, public_key: &Self::PublicKey) -> bool;
}

/// Public half of a key pair.
pub trait PublicKey {}

/// Streaming signature generation.
pub trait SignContext {
    /// Absorbs message data.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Produces the signature in the scheme's raw encoding.
    fn finish(&mut self) -> Result<Vec<u8>, CryptoError>;
}

/// Streaming signature verification.
pub trait VerifyContext {
    /// Absorbs message data.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Checks `signature` (raw encoding) against the absorbed message.
    ///
    /// Returns [`CryptoError::SignatureVerificationFailed`] for any signature
    /// that does not verify, including malformed ones.
    fn finish(&mut self, signature: &[u8]) -> Result<(), CryptoError>;
}
