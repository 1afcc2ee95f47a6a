// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::HashContext;
use guestcrypto_crypto::HashKind;

use super::*;

/// Unkeyed digest state.
///
/// Squeezing reads a snapshot of the running digest, so absorbing may
/// continue afterwards and later squeezes cover all input so far.
pub(crate) struct HashState {
    kind: HashKind,
    ctx: HashContext,
}

impl HashState {
    pub(crate) fn open(kind: HashKind) -> CryptoResult<Self> {
        Ok(Self {
            kind,
            ctx: HashContext::new(kind)?,
        })
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) -> CryptoResult<()> {
        Ok(self.ctx.update(data)?)
    }

    /// Writes the first `out.len()` bytes of the digest.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) -> CryptoResult<()> {
        if out.len() > self.kind.size() {
            return Err(CryptoErrno::InvalidLength);
        }
        let digest = self.ctx.snapshot()?;
        out.copy_from_slice(&digest[..out.len()]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_squeeze_is_prefix() {
        let mut state = HashState::open(HashKind::Sha512).unwrap();
        state.absorb(b"abc").unwrap();

        let mut full = [0u8; 64];
        state.squeeze(&mut full).unwrap();
        let mut short = [0u8; 20];
        state.squeeze(&mut short).unwrap();
        assert_eq!(short[..], full[..20]);

        let mut long = [0u8; 65];
        assert_eq!(state.squeeze(&mut long), Err(CryptoErrno::InvalidLength));
    }
}
