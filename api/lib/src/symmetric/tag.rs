// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::tags_equal;
use zeroize::Zeroizing;

use super::*;

/// Authentication tag produced by a MAC or a detached AEAD encryption.
pub(crate) struct SymmetricTag {
    raw: Zeroizing<Vec<u8>>,
}

impl SymmetricTag {
    pub(crate) fn new(raw: Vec<u8>) -> Self {
        Self {
            raw: Zeroizing::new(raw),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.raw.len()
    }

    /// Copies the tag into `buf`, which must be exactly the tag length.
    pub(crate) fn pull(&self, buf: &mut [u8]) -> CryptoResult<usize> {
        if buf.len() < self.raw.len() {
            return Err(CryptoErrno::Overflow);
        }
        if buf.len() > self.raw.len() {
            return Err(CryptoErrno::InvalidLength);
        }
        buf.copy_from_slice(&self.raw);
        Ok(self.raw.len())
    }

    /// Constant-time comparison against a guest-supplied tag.
    ///
    /// Verifying does not consume the tag; it may be checked again.
    pub(crate) fn verify(&self, expected: &[u8]) -> CryptoResult<()> {
        if !tags_equal(&self.raw, expected) {
            return Err(CryptoErrno::InvalidTag);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_sizes() {
        let tag = SymmetricTag::new(vec![9u8; 16]);
        assert_eq!(tag.len(), 16);
        assert_eq!(tag.pull(&mut [0u8; 15]), Err(CryptoErrno::Overflow));
        assert_eq!(tag.pull(&mut [0u8; 17]), Err(CryptoErrno::InvalidLength));

        let mut buf = [0u8; 16];
        assert_eq!(tag.pull(&mut buf), Ok(16));
        assert_eq!(buf, [9u8; 16]);
    }

    #[test]
    fn test_verify() {
        let tag = SymmetricTag::new(vec![1, 2, 3, 4]);
        assert!(tag.verify(&[1, 2, 3, 4]).is_ok());
        assert_eq!(tag.verify(&[1, 2, 3, 5]), Err(CryptoErrno::InvalidTag));
        assert_eq!(tag.verify(&[1, 2, 3]), Err(CryptoErrno::InvalidTag));
    }

    #[test]
    fn test_verify_repeatable() {
        let tag = SymmetricTag::new(vec![7u8; 32]);
        assert_eq!(tag.verify(&[7u8; 32]), Ok(()));
        assert_eq!(tag.verify(&[0u8; 32]), Err(CryptoErrno::InvalidTag));
        assert_eq!(tag.verify(&[7u8; 32]), Ok(()));
        assert_eq!(tag.pull(&mut [0u8; 32]), Ok(32));
    }
}
