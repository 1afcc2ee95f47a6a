// Copyright (C) Microsoft Corporation. All rights reserved.

use super::aead::AeadState;
use super::hash::HashState;
use super::hkdf::HkdfExpandState;
use super::hkdf::HkdfExtractState;
use super::hmac::HmacState;
use super::*;

enum StateKind {
    Hash(HashState),
    Hmac(HmacState),
    HkdfExtract(HkdfExtractState),
    HkdfExpand(HkdfExpandState),
    Aead(AeadState),
}

/// Open symmetric state.
///
/// The capability set is fixed when the state opens. Every operation checks
/// it first and only then dispatches to the algorithm, so an operation
/// outside the category's set fails with `InvalidOperation` without touching
/// the algorithm state.
pub(crate) struct SymmetricState {
    alg: SymmetricAlgorithm,
    capabilities: Capabilities,
    kind: StateKind,
}

impl SymmetricState {
    #[tracing::instrument(skip_all, fields(alg = %alg), err(level = "debug"))]
    pub(crate) fn open(
        alg: SymmetricAlgorithm,
        key: Option<SymmetricKey>,
        options: Option<&SymmetricOptions>,
    ) -> CryptoResult<Self> {
        let family = alg.family();
        let kind = match family {
            SymmetricFamily::Hash(hash) => {
                if key.is_some() {
                    return Err(CryptoErrno::KeyNotSupported);
                }
                StateKind::Hash(HashState::open(hash)?)
            }
            SymmetricFamily::Hmac(hash) => {
                let key = Self::bound_key(alg, key)?;
                StateKind::Hmac(HmacState::open(hash, &key)?)
            }
            SymmetricFamily::HkdfExtract(hash) => {
                StateKind::HkdfExtract(HkdfExtractState::open(hash, Self::bound_key(alg, key)?))
            }
            SymmetricFamily::HkdfExpand(hash) => {
                StateKind::HkdfExpand(HkdfExpandState::open(hash, Self::bound_key(alg, key)?))
            }
            SymmetricFamily::Aead(aead) => {
                StateKind::Aead(AeadState::open(aead, Self::bound_key(alg, key)?, options)?)
            }
        };

        Ok(Self {
            alg,
            capabilities: family.category().capabilities(),
            kind,
        })
    }

    fn bound_key(alg: SymmetricAlgorithm, key: Option<SymmetricKey>) -> CryptoResult<SymmetricKey> {
        let key = key.ok_or(CryptoErrno::KeyRequired)?;
        if key.alg() != alg {
            tracing::debug!(key_alg = %key.alg(), "key bound to another algorithm");
            return Err(CryptoErrno::InvalidHandle);
        }
        Ok(key)
    }

    fn require(&self, capability: Capabilities) -> CryptoResult<()> {
        if !self.capabilities.contains(capability) {
            tracing::debug!(alg = %self.alg, ?capability, "operation not permitted");
            return Err(CryptoErrno::InvalidOperation);
        }
        Ok(())
    }

    /// Copies a byte option into `buf`. Only AEAD states expose one: the nonce.
    pub(crate) fn options_get(&self, name: &str, buf: &mut [u8]) -> CryptoResult<usize> {
        match &self.kind {
            StateKind::Aead(state) if name.eq_ignore_ascii_case("nonce") => {
                let nonce = state.nonce();
                if buf.len() < nonce.len() {
                    return Err(CryptoErrno::Overflow);
                }
                buf[..nonce.len()].copy_from_slice(nonce);
                Ok(nonce.len())
            }
            StateKind::Aead(_)
            | StateKind::Hash(_)
            | StateKind::Hmac(_)
            | StateKind::HkdfExtract(_)
            | StateKind::HkdfExpand(_) => Err(CryptoErrno::UnsupportedOption),
        }
    }

    pub(crate) fn options_get_u64(&self, _name: &str) -> CryptoResult<u64> {
        Err(CryptoErrno::UnsupportedOption)
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) -> CryptoResult<()> {
        self.require(Capabilities::ABSORB)?;
        match &mut self.kind {
            StateKind::Hash(state) => state.absorb(data),
            StateKind::Hmac(state) => state.absorb(data),
            StateKind::HkdfExtract(state) => {
                state.absorb(data);
                Ok(())
            }
            StateKind::HkdfExpand(state) => {
                state.absorb(data);
                Ok(())
            }
            StateKind::Aead(state) => state.absorb(data),
        }
    }

    pub(crate) fn squeeze(&mut self, out: &mut [u8]) -> CryptoResult<()> {
        self.require(Capabilities::SQUEEZE)?;
        match &mut self.kind {
            StateKind::Hash(state) => state.squeeze(out),
            StateKind::HkdfExtract(state) => state.squeeze(out),
            StateKind::HkdfExpand(state) => state.squeeze(out),
            StateKind::Hmac(_) | StateKind::Aead(_) => Err(CryptoErrno::InvalidOperation),
        }
    }

    pub(crate) fn squeeze_tag(&mut self) -> CryptoResult<SymmetricTag> {
        self.require(Capabilities::SQUEEZE_TAG)?;
        match &mut self.kind {
            StateKind::Hmac(state) => state.squeeze_tag(),
            StateKind::Hash(_)
            | StateKind::HkdfExtract(_)
            | StateKind::HkdfExpand(_)
            | StateKind::Aead(_) => Err(CryptoErrno::InvalidOperation),
        }
    }

    pub(crate) fn squeeze_key(&mut self, target: SymmetricAlgorithm) -> CryptoResult<SymmetricKey> {
        self.require(Capabilities::SQUEEZE_KEY)?;
        match &mut self.kind {
            StateKind::HkdfExtract(state) => state.squeeze_key(target),
            StateKind::HkdfExpand(state) => state.squeeze_key(target),
            StateKind::Hash(_) | StateKind::Hmac(_) | StateKind::Aead(_) => {
                Err(CryptoErrno::InvalidOperation)
            }
        }
    }

    pub(crate) fn max_tag_len(&self) -> CryptoResult<usize> {
        self.require(Capabilities::MAX_TAG_LEN)?;
        match &self.kind {
            StateKind::Aead(state) => Ok(state.max_tag_len()),
            StateKind::Hash(_)
            | StateKind::Hmac(_)
            | StateKind::HkdfExtract(_)
            | StateKind::HkdfExpand(_) => Err(CryptoErrno::InvalidOperation),
        }
    }

    fn aead(&mut self, capability: Capabilities) -> CryptoResult<&mut AeadState> {
        self.require(capability)?;
        match &mut self.kind {
            StateKind::Aead(state) => Ok(state),
            StateKind::Hash(_)
            | StateKind::Hmac(_)
            | StateKind::HkdfExtract(_)
            | StateKind::HkdfExpand(_) => Err(CryptoErrno::InvalidOperation),
        }
    }

    pub(crate) fn encrypt(&mut self, out: &mut [u8], data: &[u8]) -> CryptoResult<usize> {
        self.aead(Capabilities::ENCRYPT)?.encrypt(out, data)
    }

    pub(crate) fn encrypt_detached(
        &mut self,
        out: &mut [u8],
        data: &[u8],
    ) -> CryptoResult<SymmetricTag> {
        self.aead(Capabilities::ENCRYPT)?.encrypt_detached(out, data)
    }

    pub(crate) fn decrypt(&mut self, out: &mut [u8], data: &[u8]) -> CryptoResult<usize> {
        self.aead(Capabilities::DECRYPT)?.decrypt(out, data)
    }

    pub(crate) fn decrypt_detached(
        &mut self,
        out: &mut [u8],
        data: &[u8],
        raw_tag: &[u8],
    ) -> CryptoResult<usize> {
        self.aead(Capabilities::DECRYPT)?
            .decrypt_detached(out, data, raw_tag)
    }

    /// None of the offered algorithms ratchet.
    pub(crate) fn ratchet(&mut self) -> CryptoResult<()> {
        self.require(Capabilities::RATCHET)?;
        Err(CryptoErrno::InvalidOperation)
    }
}
