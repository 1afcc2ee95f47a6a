// Copyright (C) Microsoft Corporation. All rights reserved.

//! The guest-facing facade.
//!
//! [`CryptoCtx`] owns one handle table per object category and translates
//! every call from handles to objects and back. It never upgrades an engine
//! error; whatever the engine returns is what the caller sees.
//!
//! Calls that read one table and write another (for example squeezing a
//! tag out of a state) finish with the first table before locking the
//! second, so no two table locks are ever held at once.

mod common;
mod managed;
mod signatures;
mod symmetric;

use super::*;

/// Cryptographic services context for one guest.
pub struct CryptoCtx {
    config: CryptoCtxConfig,
    array_outputs: HandleTable<ArrayOutput>,
    options: HandleTable<Options>,
    symmetric_keys: HandleTable<SymmetricKey>,
    symmetric_states: HandleTable<SymmetricState>,
    symmetric_tags: HandleTable<SymmetricTag>,
    public_keys: HandleTable<SignaturePublicKey>,
    secret_keys: HandleTable<SignatureSecretKey>,
    keypairs: HandleTable<SignatureKeyPair>,
    signatures: HandleTable<Signature>,
    signature_states: HandleTable<SignatureState>,
    verification_states: HandleTable<VerificationState>,
}

impl Default for CryptoCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoCtx {
    /// Creates a context with default limits.
    pub fn new() -> Self {
        Self::with_config(CryptoCtxConfig::default())
    }

    /// Creates a context with the given limits.
    pub fn with_config(config: CryptoCtxConfig) -> Self {
        let max = config.max_handles_per_table();
        Self {
            config,
            array_outputs: HandleTable::new(HandleType::ArrayOutput, max),
            options: HandleTable::new(HandleType::Options, max),
            symmetric_keys: HandleTable::new(HandleType::SymmetricKey, max),
            symmetric_states: HandleTable::new(HandleType::SymmetricState, max),
            symmetric_tags: HandleTable::new(HandleType::SymmetricTag, max),
            public_keys: HandleTable::new(HandleType::PublicKey, max),
            secret_keys: HandleTable::new(HandleType::SecretKey, max),
            keypairs: HandleTable::new(HandleType::KeyPair, max),
            signatures: HandleTable::new(HandleType::Signature, max),
            signature_states: HandleTable::new(HandleType::SignatureState, max),
            verification_states: HandleTable::new(HandleType::VerificationState, max),
        }
    }

    /// Limits this context was created with.
    pub fn config(&self) -> &CryptoCtxConfig {
        &self.config
    }

    fn register_output(&self, data: impl Into<zeroize::Zeroizing<Vec<u8>>>) -> CryptoResult<Handle> {
        self.array_outputs.register(ArrayOutput::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_ctx_is_send_sync() {
        assert_send_sync::<CryptoCtx>();
    }

    #[test]
    fn test_handle_categories_are_disjoint() {
        let ctx = CryptoCtx::new();
        let options = ctx.options_open(AlgorithmType::Symmetric).unwrap();
        let key = ctx.symmetric_key_generate("HMAC/SHA-256", None).unwrap();
        let output = ctx.symmetric_key_export(key).unwrap();

        assert_eq!(
            ctx.array_output_len(options),
            Err(CryptoErrno::InvalidHandle)
        );
        assert_eq!(
            ctx.options_set(output, "nonce", &[0u8; 12]),
            Err(CryptoErrno::InvalidHandle)
        );
        assert_eq!(ctx.array_output_len(output), Ok(32));
    }

    #[test]
    fn test_table_limit() {
        let ctx = CryptoCtx::with_config(CryptoCtxConfig::default().with_max_handles_per_table(2));
        let a = ctx.options_open(AlgorithmType::Symmetric).unwrap();
        ctx.options_open(AlgorithmType::Symmetric).unwrap();
        assert_eq!(
            ctx.options_open(AlgorithmType::Symmetric),
            Err(CryptoErrno::TooManyHandles)
        );
        ctx.options_close(a).unwrap();
        assert!(ctx.options_open(AlgorithmType::Symmetric).is_ok());
        assert_eq!(ctx.config().max_handles_per_table(), 2);
    }
}
