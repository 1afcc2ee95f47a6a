// Copyright (C) Microsoft Corporation. All rights reserved.

//! Authenticated encryption with associated data.
//!
//! Supports AES-GCM with 128 and 256-bit keys and ChaCha20-Poly1305. All
//! ciphers use a 12-byte nonce and a 16-byte tag. Operations are one-shot:
//! the associated data, nonce and key are handed over together with the
//! message, and the tag is produced or checked in the same call.
//!
//! On a failed tag check the output buffer is overwritten with zeros before
//! the error is returned, so no unauthenticated plaintext escapes.

use openssl::cipher::Cipher;
use openssl::cipher::CipherRef;
use openssl::cipher_ctx::CipherCtx;

use super::*;

/// Length in bytes of every supported AEAD tag.
pub const AEAD_TAG_SIZE: usize = 16;

/// Largest input accepted in a single AEAD call.
pub const AEAD_MAX_INPUT_LEN: usize = i32::MAX as usize;

/// AEAD cipher selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadKind {
    /// AES-GCM with a 128-bit key.
    Aes128Gcm,
    /// AES-GCM with a 256-bit key.
    Aes256Gcm,
    /// ChaCha20-Poly1305 (RFC 8439).
    ChaCha20Poly1305,
}

impl AeadKind {
    /// Key length in bytes.
    pub fn key_size(self) -> usize {
        match self {
            AeadKind::Aes128Gcm => 16,
            AeadKind::Aes256Gcm | AeadKind::ChaCha20Poly1305 => 32,
        }
    }

    /// Nonce length in bytes.
    pub fn nonce_size(self) -> usize {
        12
    }

    /// Tag length in bytes.
    pub fn tag_size(self) -> usize {
        AEAD_TAG_SIZE
    }

    fn cipher(self) -> &'static CipherRef {
        match self {
            AeadKind::Aes128Gcm => Cipher::aes_128_gcm(),
            AeadKind::Aes256Gcm => Cipher::aes_256_gcm(),
            AeadKind::ChaCha20Poly1305 => Cipher::chacha20_poly1305(),
        }
    }

    fn check_params(self, key: &[u8], nonce: &[u8], aad: &[u8]) -> Result<(), CryptoError> {
        if key.len() != self.key_size() {
            return Err(CryptoError::AeadInvalidKeySize);
        }
        if nonce.len() != self.nonce_size() {
            return Err(CryptoError::AeadInvalidNonceSize);
        }
        if aad.len() > AEAD_MAX_INPUT_LEN {
            return Err(CryptoError::AeadInputTooLarge);
        }
        Ok(())
    }
}

/// Encrypts `plaintext` into `ciphertext` and writes the tag into `tag`.
///
/// `ciphertext` must be exactly as long as `plaintext` and `tag` exactly
/// [`AEAD_TAG_SIZE`] bytes.
#[tracing::instrument(skip_all, fields(kind = ?kind, len = plaintext.len()))]
pub fn aead_seal(
    kind: AeadKind,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    ciphertext: &mut [u8],
    tag: &mut [u8],
) -> Result<(), CryptoError> {
    kind.check_params(key, nonce, aad)?;
    if plaintext.len() > AEAD_MAX_INPUT_LEN {
        return Err(CryptoError::AeadInputTooLarge);
    }
    if ciphertext.len() != plaintext.len() {
        return Err(CryptoError::AeadBufferSizeMismatch);
    }
    if tag.len() != AEAD_TAG_SIZE {
        return Err(CryptoError::AeadInvalidTagSize);
    }

    let mut ctx = CipherCtx::new().map_err(|_| CryptoError::AeadEncryptError)?;
    ctx.encrypt_init(Some(kind.cipher()), Some(key), Some(nonce))
        .map_err(|_| CryptoError::AeadEncryptError)?;
    if !aad.is_empty() {
        ctx.cipher_update(aad, None)
            .map_err(|_| CryptoError::AeadEncryptError)?;
    }
    if !plaintext.is_empty() {
        ctx.cipher_update(plaintext, Some(ciphertext))
            .map_err(|_| CryptoError::AeadEncryptError)?;
    }

    let mut final_block = [0u8; AEAD_TAG_SIZE];
    ctx.cipher_final(&mut final_block)
        .map_err(|_| CryptoError::AeadEncryptError)?;
    ctx.tag(tag).map_err(|_| CryptoError::AeadEncryptError)?;
    Ok(())
}

/// Decrypts `ciphertext` into `plaintext` after checking `tag`.
///
/// # Errors
///
/// * [`CryptoError::AeadTagMismatch`] - authentication failed; `plaintext`
///   has been zero-filled
#[tracing::instrument(skip_all, fields(kind = ?kind, len = ciphertext.len()))]
pub fn aead_open(
    kind: AeadKind,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    plaintext: &mut [u8],
) -> Result<(), CryptoError> {
    kind.check_params(key, nonce, aad)?;
    if ciphertext.len() > AEAD_MAX_INPUT_LEN {
        return Err(CryptoError::AeadInputTooLarge);
    }
    if plaintext.len() != ciphertext.len() {
        return Err(CryptoError::AeadBufferSizeMismatch);
    }
    if tag.len() != AEAD_TAG_SIZE {
        return Err(CryptoError::AeadInvalidTagSize);
    }

    let mut ctx = CipherCtx::new().map_err(|_| CryptoError::AeadDecryptError)?;
    ctx.decrypt_init(Some(kind.cipher()), Some(key), Some(nonce))
        .map_err(|_| CryptoError::AeadDecryptError)?;
    ctx.set_tag(tag).map_err(|_| CryptoError::AeadDecryptError)?;
    if !aad.is_empty() {
        ctx.cipher_update(aad, None)
            .map_err(|_| CryptoError::AeadDecryptError)?;
    }
    if !ciphertext.is_empty() {
        ctx.cipher_update(ciphertext, Some(&mut *plaintext))
            .map_err(|_| CryptoError::AeadDecryptError)?;
    }

    let mut final_block = [0u8; AEAD_TAG_SIZE];
    if ctx.cipher_final(&mut final_block).is_err() {
        plaintext.fill(0);
        tracing::debug!("AEAD tag mismatch");
        return Err(CryptoError::AeadTagMismatch);
    }
    Ok(())
}
