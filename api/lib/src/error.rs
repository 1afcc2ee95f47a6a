// Copyright (C) Microsoft Corporation. All rights reserved.

use std::panic::catch_unwind;
use std::panic::UnwindSafe;

use guestcrypto_crypto::CryptoError;
use open_enum::open_enum;
use thiserror::Error;

/// Numeric error code reported across the guest boundary.
///
/// Values follow the wasi-crypto `crypto_errno` numbering so guests built
/// against that interface interpret them unchanged.
#[open_enum]
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Errno {
    /// Operation succeeded.
    Success = 0,
    /// Guest memory could not be accessed.
    GuestError = 1,
    /// Operation is reserved but not implemented.
    NotImplemented = 2,
    /// Feature is not supported.
    UnsupportedFeature = 3,
    /// Operation is prohibited.
    ProhibitedOperation = 4,
    /// Encoding is not supported for this object.
    UnsupportedEncoding = 5,
    /// Algorithm name is not recognized.
    UnsupportedAlgorithm = 6,
    /// Option name is not recognized.
    UnsupportedOption = 7,
    /// Key material is malformed or inconsistent.
    InvalidKey = 8,
    /// Length is out of range.
    InvalidLength = 9,
    /// Signature did not verify.
    VerificationFailed = 10,
    /// Random generator failed.
    RngError = 11,
    /// Primitive library failed.
    AlgorithmFailure = 12,
    /// Signature encoding is malformed.
    InvalidSignature = 13,
    /// Object is closed.
    Closed = 14,
    /// Handle is unknown, closed or of another category.
    InvalidHandle = 15,
    /// Destination buffer is too small.
    Overflow = 16,
    /// Unexpected host failure.
    InternalError = 17,
    /// Handle table is full.
    TooManyHandles = 18,
    /// Algorithm does not take a key.
    KeyNotSupported = 19,
    /// Algorithm requires a key.
    KeyRequired = 20,
    /// Authentication tag did not verify.
    InvalidTag = 21,
    /// Operation is not legal for this state.
    InvalidOperation = 22,
    /// Nonce option is missing.
    NonceRequired = 23,
    /// Nonce option has the wrong length.
    InvalidNonce = 24,
    /// Option was never set.
    OptionNotSet = 25,
    /// Object was not found.
    NotFound = 26,
    /// Required parameters are missing.
    ParametersMissing = 27,
    /// Operation is still in progress.
    InProgress = 28,
    /// Keys are not compatible.
    IncompatibleKeys = 29,
    /// Object has expired.
    Expired = 30,
}

/// Errors returned by every `CryptoCtx` operation.
#[derive(Clone, Copy, Error, Debug, PartialEq, Eq)]
pub enum CryptoErrno {
    /// Operation is reserved but not implemented
    #[error("not implemented")]
    NotImplemented,

    /// Feature is not supported
    #[error("unsupported feature")]
    UnsupportedFeature,

    /// Operation is prohibited
    #[error("prohibited operation")]
    ProhibitedOperation,

    /// Encoding not supported for this object kind
    #[error("unsupported encoding")]
    UnsupportedEncoding,

    /// Unknown algorithm name or wrong algorithm type
    #[error("algorithm not supported")]
    AlgorithmNotSupported,

    /// Unknown option name
    #[error("unsupported option")]
    UnsupportedOption,

    /// Malformed or inconsistent key material
    #[error("invalid key")]
    InvalidKey,

    /// Requested length out of range
    #[error("invalid length")]
    InvalidLength,

    /// Signature did not verify
    #[error("verification failed")]
    VerificationFailed,

    /// Random generator failure
    #[error("rng error")]
    RngError,

    /// Primitive library failure
    #[error("algorithm failure")]
    AlgorithmFailure,

    /// Malformed signature encoding
    #[error("invalid signature")]
    InvalidSignature,

    /// Unknown, closed or foreign-category handle
    #[error("invalid handle")]
    InvalidHandle,

    /// Destination buffer too small
    #[error("overflow")]
    Overflow,

    /// Unexpected host failure
    #[error("internal error")]
    InternalError,

    /// Handle table is full
    #[error("too many handles")]
    TooManyHandles,

    /// Key supplied to or requested for a keyless algorithm
    #[error("key not supported")]
    KeyNotSupported,

    /// Keyed algorithm used without a key
    #[error("key required")]
    KeyRequired,

    /// Authentication tag did not verify
    #[error("invalid tag")]
    InvalidTag,

    /// Operation not legal for the state's algorithm or phase
    #[error("invalid operation")]
    InvalidOperation,

    /// AEAD opened without a nonce
    #[error("nonce required")]
    NonceRequired,

    /// AEAD nonce has the wrong length
    #[error("invalid nonce")]
    InvalidNonce,

    /// Option was never set
    #[error("option not set")]
    OptionNotSet,
}

impl CryptoErrno {
    /// Wire code for this error.
    pub fn errno(self) -> Errno {
        match self {
            CryptoErrno::NotImplemented => Errno::NotImplemented,
            CryptoErrno::UnsupportedFeature => Errno::UnsupportedFeature,
            CryptoErrno::ProhibitedOperation => Errno::ProhibitedOperation,
            CryptoErrno::UnsupportedEncoding => Errno::UnsupportedEncoding,
            CryptoErrno::AlgorithmNotSupported => Errno::UnsupportedAlgorithm,
            CryptoErrno::UnsupportedOption => Errno::UnsupportedOption,
            CryptoErrno::InvalidKey => Errno::InvalidKey,
            CryptoErrno::InvalidLength => Errno::InvalidLength,
            CryptoErrno::VerificationFailed => Errno::VerificationFailed,
            CryptoErrno::RngError => Errno::RngError,
            CryptoErrno::AlgorithmFailure => Errno::AlgorithmFailure,
            CryptoErrno::InvalidSignature => Errno::InvalidSignature,
            CryptoErrno::InvalidHandle => Errno::InvalidHandle,
            CryptoErrno::Overflow => Errno::Overflow,
            CryptoErrno::InternalError => Errno::InternalError,
            CryptoErrno::TooManyHandles => Errno::TooManyHandles,
            CryptoErrno::KeyNotSupported => Errno::KeyNotSupported,
            CryptoErrno::KeyRequired => Errno::KeyRequired,
            CryptoErrno::InvalidTag => Errno::InvalidTag,
            CryptoErrno::InvalidOperation => Errno::InvalidOperation,
            CryptoErrno::NonceRequired => Errno::NonceRequired,
            CryptoErrno::InvalidNonce => Errno::InvalidNonce,
            CryptoErrno::OptionNotSet => Errno::OptionNotSet,
        }
    }
}

impl From<CryptoError> for CryptoErrno {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::AeadTagMismatch => CryptoErrno::InvalidTag,

            CryptoError::HmacInvalidKey
            | CryptoError::EccKeyImportError
            | CryptoError::EccUnsupportedCurve
            | CryptoError::Ed25519KeyImportError
            | CryptoError::RsaKeyImportError
            | CryptoError::RsaInvalidKeySize
            | CryptoError::KeyMismatch => CryptoErrno::InvalidKey,

            CryptoError::EcdsaInvalidSignature => CryptoErrno::InvalidSignature,
            CryptoError::SignatureVerificationFailed => CryptoErrno::VerificationFailed,
            CryptoError::SignatureContextFinalized => CryptoErrno::InvalidOperation,
            CryptoError::Ed25519MessageTooLong => CryptoErrno::Overflow,
            CryptoError::HkdfInvalidLength => CryptoErrno::InvalidLength,
            CryptoError::RngError => CryptoErrno::RngError,

            other => {
                tracing::warn!(error = %other, "primitive library failure");
                CryptoErrno::AlgorithmFailure
            }
        }
    }
}

/// Result type of every `CryptoCtx` operation.
pub type CryptoResult<T> = Result<T, CryptoErrno>;

/// Runs `f` and converts its outcome into a wire code.
///
/// A panic inside `f` is contained and reported as [`Errno::InternalError`].
pub fn abi_boundary<F: FnOnce() -> CryptoResult<()> + UnwindSafe>(f: F) -> Errno {
    match catch_unwind(f) {
        Ok(result) => match result {
            Ok(()) => Errno::Success,
            Err(err) => err.errno(),
        },
        Err(_) => {
            tracing::warn!("panic contained at the guest boundary");
            Errno::InternalError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_values() {
        assert_eq!(CryptoErrno::InvalidHandle.errno(), Errno(15));
        assert_eq!(CryptoErrno::AlgorithmNotSupported.errno(), Errno(6));
        assert_eq!(CryptoErrno::NonceRequired.errno(), Errno(23));
        assert_eq!(CryptoErrno::InvalidNonce.errno(), Errno(24));
        assert_eq!(CryptoErrno::InvalidTag.errno(), Errno(21));
    }

    #[test]
    fn test_primitive_error_mapping() {
        assert_eq!(
            CryptoErrno::from(CryptoError::AeadTagMismatch),
            CryptoErrno::InvalidTag
        );
        assert_eq!(
            CryptoErrno::from(CryptoError::EccKeyImportError),
            CryptoErrno::InvalidKey
        );
        assert_eq!(
            CryptoErrno::from(CryptoError::SignatureVerificationFailed),
            CryptoErrno::VerificationFailed
        );
        assert_eq!(
            CryptoErrno::from(CryptoError::HashInitError),
            CryptoErrno::AlgorithmFailure
        );
    }

    #[test]
    fn test_abi_boundary() {
        assert_eq!(abi_boundary(|| Ok(())), Errno::Success);
        assert_eq!(
            abi_boundary(|| Err(CryptoErrno::Overflow)),
            Errno::Overflow
        );
        assert_eq!(
            abi_boundary(|| -> CryptoResult<()> { panic!("boom") }),
            Errno::InternalError
        );
    }
}
