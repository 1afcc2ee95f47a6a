// Copyright (C) Microsoft Corporation. All rights reserved.

use zeroize::Zeroizing;

use super::*;

/// Host-produced bytes awaiting retrieval by the guest.
///
/// Each byte is handed out at most once; `pull` advances a cursor.
pub(crate) struct ArrayOutput {
    data: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl ArrayOutput {
    pub(crate) fn new(data: impl Into<Zeroizing<Vec<u8>>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Bytes not yet pulled.
    pub(crate) fn len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Copies the remaining bytes into `buf` and returns how many were written.
    ///
    /// Fails with `Overflow` if `buf` cannot hold everything that remains.
    pub(crate) fn pull(&mut self, buf: &mut [u8]) -> CryptoResult<usize> {
        let remaining = &self.data[self.pos..];
        if buf.len() < remaining.len() {
            return Err(CryptoErrno::Overflow);
        }
        let written = remaining.len();
        buf[..written].copy_from_slice(remaining);
        self.pos += written;
        Ok(written)
    }
}
