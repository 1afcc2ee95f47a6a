// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

/// Resolves a signature algorithm name for an asymmetric call.
fn signature_alg(alg_type: AlgorithmType, alg: &str) -> CryptoResult<SignatureAlgorithm> {
    match alg_type {
        AlgorithmType::Signatures => alg.parse(),
        AlgorithmType::Symmetric | AlgorithmType::KeyExchange => {
            tracing::debug!(?alg_type, "only signature algorithms are offered for key pairs");
            Err(CryptoErrno::AlgorithmNotSupported)
        }
    }
}

impl CryptoCtx {
    #[tracing::instrument(skip_all, fields(alg = alg), err(level = "debug"))]
    pub fn keypair_generate(
        &self,
        alg_type: AlgorithmType,
        alg: &str,
        options: Option<Handle>,
    ) -> CryptoResult<Handle> {
        let alg = signature_alg(alg_type, alg)?;
        self.options_snapshot(options, alg_type)?;
        let keypair = SignatureKeyPair::generate(alg)?;
        self.keypairs.register(keypair)
    }

    #[tracing::instrument(skip_all, fields(alg = alg, ?encoding), err(level = "debug"))]
    pub fn keypair_import(
        &self,
        alg_type: AlgorithmType,
        alg: &str,
        encoded: &[u8],
        encoding: KeyEncoding,
    ) -> CryptoResult<Handle> {
        let alg = signature_alg(alg_type, alg)?;
        let keypair = SignatureKeyPair::import(alg, encoded, encoding)?;
        self.keypairs.register(keypair)
    }

    #[tracing::instrument(skip_all, fields(keypair = *keypair, ?encoding), err(level = "debug"))]
    pub fn keypair_export(&self, keypair: Handle, encoding: KeyEncoding) -> CryptoResult<Handle> {
        let encoded = self
            .keypairs
            .with(keypair, |obj| obj.export(encoding))?;
        self.register_output(encoded)
    }

    pub fn keypair_publickey(&self, keypair: Handle) -> CryptoResult<Handle> {
        let public_key = self.keypairs.with(keypair, |obj| obj.public_key())?;
        self.public_keys.register(public_key)
    }

    pub fn keypair_secretkey(&self, keypair: Handle) -> CryptoResult<Handle> {
        let secret_key = self.keypairs.with(keypair, |obj| Ok(obj.secret_key()))?;
        self.secret_keys.register(secret_key)
    }

    /// Joins a public and a secret key into a key pair.
    ///
    /// # Errors
    ///
    /// * `InvalidHandle` - the halves belong to different keys or algorithms
    #[tracing::instrument(skip_all, fields(publickey = *publickey, secretkey = *secretkey), err(level = "debug"))]
    pub fn keypair_from_pk_and_sk(&self, publickey: Handle, secretkey: Handle) -> CryptoResult<Handle> {
        let public_key = self.public_keys.get(publickey)?;
        let secret_key = self.secret_keys.get(secretkey)?;
        let keypair = SignatureKeyPair::from_parts(&public_key, secret_key)?;
        self.keypairs.register(keypair)
    }

    pub fn keypair_close(&self, keypair: Handle) -> CryptoResult<()> {
        self.keypairs.close(keypair)
    }

    #[tracing::instrument(skip_all, fields(alg = alg, ?encoding), err(level = "debug"))]
    pub fn publickey_import(
        &self,
        alg_type: AlgorithmType,
        alg: &str,
        encoded: &[u8],
        encoding: KeyEncoding,
    ) -> CryptoResult<Handle> {
        let alg = signature_alg(alg_type, alg)?;
        let public_key = SignaturePublicKey::import(alg, encoded, encoding)?;
        self.public_keys.register(public_key)
    }

    #[tracing::instrument(skip_all, fields(publickey = *publickey, ?encoding), err(level = "debug"))]
    pub fn publickey_export(&self, publickey: Handle, encoding: KeyEncoding) -> CryptoResult<Handle> {
        let encoded = self
            .public_keys
            .with(publickey, |obj| obj.export(encoding))?;
        self.register_output(encoded)
    }

    /// Re-validates the key material behind `publickey`.
    pub fn publickey_verify(&self, publickey: Handle) -> CryptoResult<()> {
        self.public_keys.with(publickey, |obj| obj.verify())
    }

    pub fn publickey_from_secretkey(&self, secretkey: Handle) -> CryptoResult<Handle> {
        let public_key = self.secret_keys.with(secretkey, |obj| obj.public_key())?;
        self.public_keys.register(public_key)
    }

    pub fn publickey_close(&self, publickey: Handle) -> CryptoResult<()> {
        self.public_keys.close(publickey)
    }

    #[tracing::instrument(skip_all, fields(alg = alg, ?encoding), err(level = "debug"))]
    pub fn secretkey_import(
        &self,
        alg_type: AlgorithmType,
        alg: &str,
        encoded: &[u8],
        encoding: KeyEncoding,
    ) -> CryptoResult<Handle> {
        let alg = signature_alg(alg_type, alg)?;
        let secret_key = SignatureSecretKey::import(alg, encoded, encoding)?;
        self.secret_keys.register(secret_key)
    }

    #[tracing::instrument(skip_all, fields(secretkey = *secretkey, ?encoding), err(level = "debug"))]
    pub fn secretkey_export(&self, secretkey: Handle, encoding: KeyEncoding) -> CryptoResult<Handle> {
        let encoded = self
            .secret_keys
            .with(secretkey, |obj| obj.export(encoding))?;
        self.register_output(encoded)
    }

    pub fn secretkey_close(&self, secretkey: Handle) -> CryptoResult<()> {
        self.secret_keys.close(secretkey)
    }

    #[tracing::instrument(skip_all, fields(alg = alg, ?encoding), err(level = "debug"))]
    pub fn signature_import(
        &self,
        alg: &str,
        encoded: &[u8],
        encoding: SignatureEncoding,
    ) -> CryptoResult<Handle> {
        let alg: SignatureAlgorithm = alg.parse()?;
        let signature = Signature::import(alg, encoded, encoding)?;
        self.signatures.register(signature)
    }

    pub fn signature_export(&self, signature: Handle, encoding: SignatureEncoding) -> CryptoResult<Handle> {
        let encoded = self
            .signatures
            .with(signature, |obj| obj.export(encoding))?;
        self.register_output(encoded)
    }

    pub fn signature_close(&self, signature: Handle) -> CryptoResult<()> {
        self.signatures.close(signature)
    }

    /// Opens a signing state bound to a copy of `keypair`.
    #[tracing::instrument(skip_all, fields(keypair = *keypair), err(level = "debug"))]
    pub fn signature_state_open(&self, keypair: Handle) -> CryptoResult<Handle> {
        let keypair = self.keypairs.get(keypair)?;
        let state = SignatureState::open(&keypair, self.config.max_buffered_message_len())?;
        self.signature_states.register(state)
    }

    pub fn signature_state_update(&self, state: Handle, data: &[u8]) -> CryptoResult<()> {
        self.signature_states
            .with_mut(state, |obj| obj.update(data))
    }

    /// Finalizes the state and returns the signature.
    #[tracing::instrument(skip_all, fields(state = *state), err(level = "debug"))]
    pub fn signature_state_sign(&self, state: Handle) -> CryptoResult<Handle> {
        let signature = self.signature_states.with_mut(state, |obj| obj.sign())?;
        self.signatures.register(signature)
    }

    pub fn signature_state_close(&self, state: Handle) -> CryptoResult<()> {
        self.signature_states.close(state)
    }

    #[tracing::instrument(skip_all, fields(publickey = *publickey), err(level = "debug"))]
    pub fn signature_verification_state_open(&self, publickey: Handle) -> CryptoResult<Handle> {
        let public_key = self.public_keys.get(publickey)?;
        let state =
            VerificationState::open(&public_key, self.config.max_buffered_message_len())?;
        self.verification_states.register(state)
    }

    pub fn signature_verification_state_update(&self, state: Handle, data: &[u8]) -> CryptoResult<()> {
        self.verification_states
            .with_mut(state, |obj| obj.update(data))
    }

    /// Checks `signature` against everything absorbed so far.
    ///
    /// # Errors
    ///
    /// * `VerificationFailed` - the signature does not match
    /// * `InvalidHandle` - the signature belongs to another algorithm
    #[tracing::instrument(skip_all, fields(state = *state, signature = *signature), err(level = "debug"))]
    pub fn signature_verification_state_verify(
        &self,
        state: Handle,
        signature: Handle,
    ) -> CryptoResult<()> {
        let signature = self.signatures.get(signature)?;
        self.verification_states
            .with_mut(state, |obj| obj.verify(&signature))
    }

    pub fn signature_verification_state_close(&self, state: Handle) -> CryptoResult<()> {
        self.verification_states.close(state)
    }
}
