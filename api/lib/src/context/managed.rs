// Copyright (C) Microsoft Corporation. All rights reserved.

//! Managed secrets store entry points.
//!
//! No store backs this context, so every call fails with `NotImplemented`
//! after logging which entry point the guest tried.

use super::*;

fn not_implemented<T>(op: &'static str) -> CryptoResult<T> {
    tracing::debug!(op, "managed secrets are not available");
    Err(CryptoErrno::NotImplemented)
}

impl CryptoCtx {
    pub fn secrets_manager_open(&self, _options: Option<Handle>) -> CryptoResult<Handle> {
        not_implemented("secrets_manager_open")
    }

    pub fn secrets_manager_close(&self, _secrets_manager: Handle) -> CryptoResult<()> {
        not_implemented("secrets_manager_close")
    }

    pub fn secrets_manager_invalidate(
        &self,
        _secrets_manager: Handle,
        _key_id: &[u8],
        _key_version: u64,
    ) -> CryptoResult<()> {
        not_implemented("secrets_manager_invalidate")
    }

    pub fn symmetric_key_generate_managed(
        &self,
        _secrets_manager: Handle,
        _alg: &str,
        _options: Option<Handle>,
    ) -> CryptoResult<Handle> {
        not_implemented("symmetric_key_generate_managed")
    }

    pub fn symmetric_key_store_managed(
        &self,
        _secrets_manager: Handle,
        _key: Handle,
        _key_id: &mut [u8],
    ) -> CryptoResult<()> {
        not_implemented("symmetric_key_store_managed")
    }

    pub fn symmetric_key_replace_managed(
        &self,
        _secrets_manager: Handle,
        _old_key: Handle,
        _new_key: Handle,
    ) -> CryptoResult<u64> {
        not_implemented("symmetric_key_replace_managed")
    }

    /// Returns the id length written to `key_id` and the key version.
    pub fn symmetric_key_id(&self, _key: Handle, _key_id: &mut [u8]) -> CryptoResult<(usize, u64)> {
        not_implemented("symmetric_key_id")
    }

    pub fn symmetric_key_from_id(
        &self,
        _secrets_manager: Handle,
        _key_id: &[u8],
        _key_version: u64,
    ) -> CryptoResult<Handle> {
        not_implemented("symmetric_key_from_id")
    }

    pub fn keypair_generate_managed(
        &self,
        _secrets_manager: Handle,
        _alg_type: AlgorithmType,
        _alg: &str,
        _options: Option<Handle>,
    ) -> CryptoResult<Handle> {
        not_implemented("keypair_generate_managed")
    }

    pub fn keypair_store_managed(
        &self,
        _secrets_manager: Handle,
        _keypair: Handle,
        _key_id: &mut [u8],
    ) -> CryptoResult<()> {
        not_implemented("keypair_store_managed")
    }

    pub fn keypair_replace_managed(
        &self,
        _secrets_manager: Handle,
        _old_keypair: Handle,
        _new_keypair: Handle,
    ) -> CryptoResult<u64> {
        not_implemented("keypair_replace_managed")
    }

    /// Returns the id length written to `key_id` and the key version.
    pub fn keypair_id(&self, _keypair: Handle, _key_id: &mut [u8]) -> CryptoResult<(usize, u64)> {
        not_implemented("keypair_id")
    }

    pub fn keypair_from_id(
        &self,
        _secrets_manager: Handle,
        _key_id: &[u8],
        _key_version: u64,
    ) -> CryptoResult<Handle> {
        not_implemented("keypair_from_id")
    }
}
