// Copyright (C) Microsoft Corporation. All rights reserved.

use std::sync::Arc;

use guestcrypto_crypto::random_secret;
use zeroize::Zeroizing;

use super::*;

/// Raw symmetric key bound to one algorithm.
///
/// Clones share the bytes; they are zeroized when the last clone drops.
#[derive(Clone)]
pub(crate) struct SymmetricKey {
    alg: SymmetricAlgorithm,
    raw: Arc<Zeroizing<Vec<u8>>>,
}

impl SymmetricKey {
    pub(crate) fn new(alg: SymmetricAlgorithm, raw: Zeroizing<Vec<u8>>) -> Self {
        Self {
            alg,
            raw: Arc::new(raw),
        }
    }

    /// Fresh random key of the algorithm's natural length.
    pub(crate) fn generate(alg: SymmetricAlgorithm) -> CryptoResult<Self> {
        let len = alg.key_len()?;
        Ok(Self::new(alg, random_secret(len)?))
    }

    /// Copies `raw` into a new key.
    pub(crate) fn import(alg: SymmetricAlgorithm, raw: &[u8]) -> CryptoResult<Self> {
        alg.key_len()?;
        if raw.is_empty() {
            return Err(CryptoErrno::InvalidKey);
        }
        Ok(Self::new(alg, Zeroizing::new(raw.to_vec())))
    }

    pub(crate) fn alg(&self) -> SymmetricAlgorithm {
        self.alg
    }

    pub(crate) fn raw(&self) -> &[u8] {
        &self.raw
    }
}
