// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL-backed cryptographic primitives for the guest crypto services layer.
//!
//! This crate wraps the primitive library behind small, strongly typed
//! contexts. It has no notion of handles, options or guest memory; those
//! live in `guestcrypto_api`. The crate provides:
//!
//! - **Hash**: SHA-256, SHA-384, SHA-512 and SHA-512/256 with non-destructive
//!   digest snapshots
//! - **HMAC**: keyed MACs over the SHA-2 family
//! - **HKDF**: separate extract and expand steps (RFC 5869)
//! - **AEAD**: AES-128-GCM, AES-256-GCM and ChaCha20-Poly1305
//! - **ECC**: P-256 and secp256k1 keys with ECDSA over SHA-256
//! - **Ed25519**: pure EdDSA keys and signatures
//! - **RSA**: PKCS#1 v1.5 and PSS signatures
//! - **RNG**: cryptographically secure random bytes
//!
//! Every fallible call returns [`CryptoError`]. Variants are specific to the
//! step that failed so callers can map them to coarser error kinds.

mod aead;
mod ecc;
mod eddsa;
mod hash;
mod hmac;
mod kdf;
mod rand;
mod rsa;
mod traits;

pub use aead::*;
pub use ecc::*;
pub use eddsa::*;
pub use hash::*;
pub use hmac::*;
pub use kdf::*;
pub use rand::*;
pub use rsa::*;
use thiserror::Error;
pub use traits::*;

/// Error type for all primitive operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    // Hash errors
    /// The digest algorithm is not available in the linked library.
    #[error("hash algorithm unavailable")]
    HashUnavailable,
    /// Hash context initialization failed.
    #[error("hash initialization failed")]
    HashInitError,
    /// Absorbing data into the hash context failed.
    #[error("hash update failed")]
    HashUpdateError,
    /// Producing the digest failed.
    #[error("hash finalization failed")]
    HashFinishError,

    // HMAC errors
    /// HMAC key is empty or could not be loaded.
    #[error("HMAC invalid key")]
    HmacInvalidKey,
    /// HMAC context initialization failed.
    #[error("HMAC initialization failed")]
    HmacInitError,
    /// Absorbing data into the HMAC context failed.
    #[error("HMAC update failed")]
    HmacUpdateError,
    /// Producing the HMAC tag failed.
    #[error("HMAC finalization failed")]
    HmacFinishError,

    // HKDF errors
    /// HKDF context creation or parameter setup failed.
    #[error("HKDF setup failed")]
    HkdfSetupError,
    /// Requested HKDF output length is out of range.
    #[error("HKDF invalid output length")]
    HkdfInvalidLength,
    /// HKDF derivation failed.
    #[error("HKDF derivation failed")]
    HkdfDeriveError,

    // AEAD errors
    /// AEAD key length does not match the cipher.
    #[error("AEAD invalid key size")]
    AeadInvalidKeySize,
    /// AEAD nonce length does not match the cipher.
    #[error("AEAD invalid nonce size")]
    AeadInvalidNonceSize,
    /// AEAD tag length is not the cipher tag length.
    #[error("AEAD invalid tag size")]
    AeadInvalidTagSize,
    /// Output buffer length does not match the input length.
    #[error("AEAD buffer size mismatch")]
    AeadBufferSizeMismatch,
    /// Input exceeds the length the primitive library accepts in one call.
    #[error("AEAD input too large")]
    AeadInputTooLarge,
    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    AeadEncryptError,
    /// AEAD decryption setup or processing failed.
    #[error("AEAD decryption failed")]
    AeadDecryptError,
    /// Authentication tag did not verify.
    #[error("AEAD tag mismatch")]
    AeadTagMismatch,

    // RNG errors
    /// The random generator failed.
    #[error("RNG failure")]
    RngError,

    // ECC errors
    /// Curve is not supported or group creation failed.
    #[error("ECC unsupported curve")]
    EccUnsupportedCurve,
    /// ECC key generation failed.
    #[error("ECC key generation failed")]
    EccKeyGenError,
    /// ECC key could not be imported or failed validation.
    #[error("ECC key import failed")]
    EccKeyImportError,
    /// ECC key could not be exported.
    #[error("ECC key export failed")]
    EccKeyExportError,
    /// ECDSA signing failed.
    #[error("ECDSA sign failed")]
    EcdsaSignError,
    /// ECDSA verification setup failed.
    #[error("ECDSA verify failed")]
    EcdsaVerifyError,
    /// ECDSA signature encoding is malformed.
    #[error("ECDSA invalid signature encoding")]
    EcdsaInvalidSignature,

    // Ed25519 errors
    /// Ed25519 key generation failed.
    #[error("Ed25519 key generation failed")]
    Ed25519KeyGenError,
    /// Ed25519 key could not be imported.
    #[error("Ed25519 key import failed")]
    Ed25519KeyImportError,
    /// Ed25519 key could not be exported.
    #[error("Ed25519 key export failed")]
    Ed25519KeyExportError,
    /// Ed25519 signing failed.
    #[error("Ed25519 sign failed")]
    Ed25519SignError,
    /// Ed25519 verification setup failed.
    #[error("Ed25519 verify failed")]
    Ed25519VerifyError,
    /// Buffered Ed25519 message exceeds the configured limit.
    #[error("Ed25519 message too long")]
    Ed25519MessageTooLong,

    // RSA errors
    /// RSA modulus size is not supported.
    #[error("RSA invalid key size")]
    RsaInvalidKeySize,
    /// RSA key generation failed.
    #[error("RSA key generation failed")]
    RsaKeyGenError,
    /// RSA key could not be imported or failed validation.
    #[error("RSA key import failed")]
    RsaKeyImportError,
    /// RSA key could not be exported.
    #[error("RSA key export failed")]
    RsaKeyExportError,
    /// RSA signing failed.
    #[error("RSA sign failed")]
    RsaSignError,
    /// RSA verification setup failed.
    #[error("RSA verify failed")]
    RsaVerifyError,

    // Common signature errors
    /// Signature did not verify.
    #[error("signature verification failed")]
    SignatureVerificationFailed,
    /// Signing or verification context was already finalized.
    #[error("signature context finalized")]
    SignatureContextFinalized,
    /// Public and private key do not belong together.
    #[error("key mismatch")]
    KeyMismatch,
}
