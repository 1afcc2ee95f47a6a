// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HMAC over the SHA-2 family.
//!
//! [`HmacContext`] streams input into an OpenSSL digest-sign context keyed
//! with an HMAC key. Producing a tag works on a duplicate of the running
//! context, so a tag can be taken at any point and more input absorbed
//! afterwards.

use openssl::md_ctx::MdCtx;
use openssl::pkey::PKey;

use super::*;

/// Streaming HMAC computation.
pub struct HmacContext {
    kind: HashKind,
    ctx: MdCtx,
}

impl HmacContext {
    /// Creates an HMAC context keyed with `key`.
    ///
    /// # Errors
    ///
    /// * [`CryptoError::HmacInvalidKey`] - the key is empty or rejected
    /// * [`CryptoError::HmacInitError`] - the digest-sign context could not be set up
    pub fn new(kind: HashKind, key: &[u8]) -> Result<Self, CryptoError> {
        if key.is_empty() {
            return Err(CryptoError::HmacInvalidKey);
        }

        let pkey = PKey::hmac(key).map_err(|_| CryptoError::HmacInvalidKey)?;
        let md = kind.md()?;
        let mut ctx = MdCtx::new().map_err(|_| CryptoError::HmacInitError)?;
        ctx.digest_sign_init(Some(md), &pkey)
            .map_err(|_| CryptoError::HmacInitError)?;

        Ok(Self { kind, ctx })
    }

    /// Absorbs more input.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.ctx
            .digest_sign_update(data)
            .map_err(|_| CryptoError::HmacUpdateError)
    }

    /// Returns the tag over all input absorbed so far.
    pub fn tag(&mut self) -> Result<Vec<u8>, CryptoError> {
        let mut tag = vec![0u8; self.kind.size()];
        let len = self
            .ctx
            .digest_sign_final(Some(&mut tag))
            .map_err(|_| CryptoError::HmacFinishError)?;
        tag.truncate(len);
        Ok(tag)
    }
}

/// Compares two tags in constant time. Slices of different length never match.
pub fn tags_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && openssl::memcmp::eq(a, b)
}
