// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl CryptoCtx {
    fn symmetric_options(&self, options: Option<Handle>) -> CryptoResult<Option<SymmetricOptions>> {
        self.options_snapshot(options, AlgorithmType::Symmetric)?
            .map(Options::into_symmetric)
            .transpose()
    }

    /// Generates a random key of `alg`'s natural length.
    #[tracing::instrument(skip_all, fields(alg = alg), err(level = "debug"))]
    pub fn symmetric_key_generate(&self, alg: &str, options: Option<Handle>) -> CryptoResult<Handle> {
        let alg: SymmetricAlgorithm = alg.parse()?;
        self.symmetric_options(options)?;
        let key = SymmetricKey::generate(alg)?;
        self.symmetric_keys.register(key)
    }

    #[tracing::instrument(skip_all, fields(alg = alg), err(level = "debug"))]
    pub fn symmetric_key_import(&self, alg: &str, raw: &[u8]) -> CryptoResult<Handle> {
        let alg: SymmetricAlgorithm = alg.parse()?;
        let key = SymmetricKey::import(alg, raw)?;
        self.symmetric_keys.register(key)
    }

    /// Exports the raw key bytes into a new array output.
    pub fn symmetric_key_export(&self, key: Handle) -> CryptoResult<Handle> {
        let key = self.symmetric_keys.get(key)?;
        self.register_output(key.raw().to_vec())
    }

    pub fn symmetric_key_close(&self, key: Handle) -> CryptoResult<()> {
        self.symmetric_keys.close(key)
    }

    /// Opens a state for `alg`, optionally bound to a key and options.
    ///
    /// Key and options are resolved before any algorithm check. Both are
    /// copied into the state, so closing them afterwards does not affect it.
    #[tracing::instrument(skip_all, fields(alg = alg), err(level = "debug"))]
    pub fn symmetric_state_open(
        &self,
        alg: &str,
        key: Option<Handle>,
        options: Option<Handle>,
    ) -> CryptoResult<Handle> {
        let alg: SymmetricAlgorithm = alg.parse()?;
        let key = key.map(|handle| self.symmetric_keys.get(handle)).transpose()?;
        let options = self.symmetric_options(options)?;
        let state = SymmetricState::open(alg, key, options.as_ref())?;
        self.symmetric_states.register(state)
    }

    pub fn symmetric_state_options_get(
        &self,
        state: Handle,
        name: &str,
        buf: &mut [u8],
    ) -> CryptoResult<usize> {
        self.symmetric_states
            .with(state, |obj| obj.options_get(name, buf))
    }

    pub fn symmetric_state_options_get_u64(&self, state: Handle, name: &str) -> CryptoResult<u64> {
        self.symmetric_states
            .with(state, |obj| obj.options_get_u64(name))
    }

    pub fn symmetric_state_close(&self, state: Handle) -> CryptoResult<()> {
        self.symmetric_states.close(state)
    }

    #[tracing::instrument(skip_all, fields(state = *state, len = data.len()), err(level = "debug"))]
    pub fn symmetric_state_absorb(&self, state: Handle, data: &[u8]) -> CryptoResult<()> {
        self.symmetric_states
            .with_mut(state, |obj| obj.absorb(data))
    }

    /// Fills `out` with output derived from everything absorbed so far.
    #[tracing::instrument(skip_all, fields(state = *state, len = out.len()), err(level = "debug"))]
    pub fn symmetric_state_squeeze(&self, state: Handle, out: &mut [u8]) -> CryptoResult<()> {
        self.symmetric_states
            .with_mut(state, |obj| obj.squeeze(out))
    }

    #[tracing::instrument(skip_all, fields(state = *state), err(level = "debug"))]
    pub fn symmetric_state_squeeze_tag(&self, state: Handle) -> CryptoResult<Handle> {
        let tag = self
            .symmetric_states
            .with_mut(state, |obj| obj.squeeze_tag())?;
        self.symmetric_tags.register(tag)
    }

    /// Derives a key for `alg` from the state.
    #[tracing::instrument(skip_all, fields(state = *state, alg = alg), err(level = "debug"))]
    pub fn symmetric_state_squeeze_key(&self, state: Handle, alg: &str) -> CryptoResult<Handle> {
        let target: SymmetricAlgorithm = alg.parse()?;
        let key = self
            .symmetric_states
            .with_mut(state, |obj| obj.squeeze_key(target))?;
        self.symmetric_keys.register(key)
    }

    pub fn symmetric_state_max_tag_len(&self, state: Handle) -> CryptoResult<usize> {
        self.symmetric_states.with(state, |obj| obj.max_tag_len())
    }

    /// Encrypts `data` into `out` as ciphertext followed by the tag.
    #[tracing::instrument(skip_all, fields(state = *state, len = data.len()), err(level = "debug"))]
    pub fn symmetric_state_encrypt(
        &self,
        state: Handle,
        out: &mut [u8],
        data: &[u8],
    ) -> CryptoResult<usize> {
        self.symmetric_states
            .with_mut(state, |obj| obj.encrypt(out, data))
    }

    /// Encrypts `data` into `out` and returns the tag as a separate object.
    #[tracing::instrument(skip_all, fields(state = *state, len = data.len()), err(level = "debug"))]
    pub fn symmetric_state_encrypt_detached(
        &self,
        state: Handle,
        out: &mut [u8],
        data: &[u8],
    ) -> CryptoResult<Handle> {
        let tag = self
            .symmetric_states
            .with_mut(state, |obj| obj.encrypt_detached(out, data))?;
        self.symmetric_tags.register(tag)
    }

    /// Decrypts ciphertext followed by its tag.
    ///
    /// On `InvalidTag`, `out` has been zero-filled.
    #[tracing::instrument(skip_all, fields(state = *state, len = data.len()), err(level = "debug"))]
    pub fn symmetric_state_decrypt(
        &self,
        state: Handle,
        out: &mut [u8],
        data: &[u8],
    ) -> CryptoResult<usize> {
        self.symmetric_states
            .with_mut(state, |obj| obj.decrypt(out, data))
    }

    #[tracing::instrument(skip_all, fields(state = *state, len = data.len()), err(level = "debug"))]
    pub fn symmetric_state_decrypt_detached(
        &self,
        state: Handle,
        out: &mut [u8],
        data: &[u8],
        raw_tag: &[u8],
    ) -> CryptoResult<usize> {
        self.symmetric_states
            .with_mut(state, |obj| obj.decrypt_detached(out, data, raw_tag))
    }

    pub fn symmetric_state_ratchet(&self, state: Handle) -> CryptoResult<()> {
        self.symmetric_states.with_mut(state, |obj| obj.ratchet())
    }

    pub fn symmetric_tag_len(&self, tag: Handle) -> CryptoResult<usize> {
        self.symmetric_tags.with(tag, |obj| Ok(obj.len()))
    }

    /// Copies the tag into `buf`, which must be exactly the tag length.
    pub fn symmetric_tag_pull(&self, tag: Handle, buf: &mut [u8]) -> CryptoResult<usize> {
        self.symmetric_tags.with(tag, |obj| obj.pull(buf))
    }

    /// Compares the tag with `expected` in constant time.
    #[tracing::instrument(skip_all, fields(tag = *tag), err(level = "debug"))]
    pub fn symmetric_tag_verify(&self, tag: Handle, expected: &[u8]) -> CryptoResult<()> {
        self.symmetric_tags.with(tag, |obj| obj.verify(expected))
    }

    pub fn symmetric_tag_close(&self, tag: Handle) -> CryptoResult<()> {
        self.symmetric_tags.close(tag)
    }
}
