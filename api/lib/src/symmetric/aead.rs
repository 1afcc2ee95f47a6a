// Copyright (C) Microsoft Corporation. All rights reserved.

//! Single-use AEAD state.
//!
//! The key and nonce are bound at open time and the nonce is kept here so
//! `optionsGet("nonce")` can return it. The first encryption or decryption
//! consumes the binding; the state then rejects further absorb, encrypt and
//! decrypt calls, so one nonce can never protect two messages.

use guestcrypto_crypto::aead_open;
use guestcrypto_crypto::aead_seal;
use guestcrypto_crypto::AeadKind;
use guestcrypto_crypto::AEAD_MAX_INPUT_LEN;
use guestcrypto_crypto::AEAD_TAG_SIZE;
use zeroize::Zeroizing;

use super::*;

pub(crate) struct AeadState {
    kind: AeadKind,
    key: SymmetricKey,
    nonce: Zeroizing<Vec<u8>>,
    aad: Vec<u8>,
    consumed: bool,
}

impl AeadState {
    /// # Errors
    ///
    /// * `NonceRequired` - no options, or options without a nonce
    /// * `InvalidNonce` - nonce length differs from the algorithm's
    /// * `InvalidHandle` - key length differs from the algorithm's
    pub(crate) fn open(
        kind: AeadKind,
        key: SymmetricKey,
        options: Option<&SymmetricOptions>,
    ) -> CryptoResult<Self> {
        let nonce = options
            .and_then(SymmetricOptions::nonce)
            .ok_or(CryptoErrno::NonceRequired)?;
        if nonce.len() != kind.nonce_size() {
            return Err(CryptoErrno::InvalidNonce);
        }
        if key.raw().len() != kind.key_size() {
            tracing::debug!(len = key.raw().len(), "AEAD key length mismatch");
            return Err(CryptoErrno::InvalidHandle);
        }

        Ok(Self {
            kind,
            key,
            nonce: Zeroizing::new(nonce.to_vec()),
            aad: Vec::new(),
            consumed: false,
        })
    }

    pub(crate) fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub(crate) fn max_tag_len(&self) -> usize {
        self.kind.tag_size()
    }

    fn ensure_fresh(&self) -> CryptoResult<()> {
        if self.consumed {
            tracing::debug!("AEAD state already used");
            return Err(CryptoErrno::InvalidOperation);
        }
        Ok(())
    }

    /// Appends associated data.
    pub(crate) fn absorb(&mut self, data: &[u8]) -> CryptoResult<()> {
        self.ensure_fresh()?;
        if self.aad.len().saturating_add(data.len()) > AEAD_MAX_INPUT_LEN {
            return Err(CryptoErrno::AlgorithmFailure);
        }
        self.aad.extend_from_slice(data);
        Ok(())
    }

    fn seal(&mut self, data: &[u8], ciphertext: &mut [u8], tag: &mut [u8]) -> CryptoResult<()> {
        self.consumed = true;
        aead_seal(
            self.kind,
            self.key.raw(),
            &self.nonce,
            &self.aad,
            data,
            ciphertext,
            tag,
        )?;
        Ok(())
    }

    fn unseal(&mut self, data: &[u8], tag: &[u8], plaintext: &mut [u8]) -> CryptoResult<()> {
        self.consumed = true;
        aead_open(
            self.kind,
            self.key.raw(),
            &self.nonce,
            &self.aad,
            data,
            tag,
            plaintext,
        )?;
        Ok(())
    }

    /// Writes ciphertext followed by the tag; `out` must be `data.len() + 16`.
    pub(crate) fn encrypt(&mut self, out: &mut [u8], data: &[u8]) -> CryptoResult<usize> {
        self.ensure_fresh()?;
        if out.len() != data.len().saturating_add(AEAD_TAG_SIZE) {
            return Err(CryptoErrno::InvalidLength);
        }
        let (ciphertext, tag) = out.split_at_mut(data.len());
        self.seal(data, ciphertext, tag)?;
        Ok(out.len())
    }

    pub(crate) fn encrypt_detached(
        &mut self,
        out: &mut [u8],
        data: &[u8],
    ) -> CryptoResult<SymmetricTag> {
        self.ensure_fresh()?;
        if out.len() != data.len() {
            return Err(CryptoErrno::InvalidLength);
        }
        let mut tag = vec![0u8; AEAD_TAG_SIZE];
        self.seal(data, out, &mut tag)?;
        Ok(SymmetricTag::new(tag))
    }

    /// Splits the trailing tag off `data` and decrypts the rest into `out`.
    pub(crate) fn decrypt(&mut self, out: &mut [u8], data: &[u8]) -> CryptoResult<usize> {
        self.ensure_fresh()?;
        let Some(ciphertext_len) = data.len().checked_sub(AEAD_TAG_SIZE) else {
            return Err(CryptoErrno::InvalidLength);
        };
        if out.len() != ciphertext_len {
            return Err(CryptoErrno::InvalidLength);
        }
        let (ciphertext, tag) = data.split_at(ciphertext_len);
        self.unseal(ciphertext, tag, out)?;
        Ok(out.len())
    }

    pub(crate) fn decrypt_detached(
        &mut self,
        out: &mut [u8],
        data: &[u8],
        raw_tag: &[u8],
    ) -> CryptoResult<usize> {
        self.ensure_fresh()?;
        if out.len() != data.len() {
            return Err(CryptoErrno::InvalidLength);
        }
        if raw_tag.len() != AEAD_TAG_SIZE {
            return Err(CryptoErrno::InvalidTag);
        }
        self.unseal(data, raw_tag, out)?;
        Ok(out.len())
    }
}
