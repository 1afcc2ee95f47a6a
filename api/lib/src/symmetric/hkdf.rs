// Copyright (C) Microsoft Corporation. All rights reserved.

//! HKDF as two chained states.
//!
//! An extract state takes the input keying material as its key and absorbs
//! the salt. Its output, the PRK, becomes the key of an expand state, which
//! absorbs the context info and squeezes output keying material.

use guestcrypto_crypto::hkdf_expand;
use guestcrypto_crypto::hkdf_extract;
use guestcrypto_crypto::hkdf_max_output_len;
use guestcrypto_crypto::HashKind;
use zeroize::Zeroizing;

use super::*;

pub(crate) struct HkdfExtractState {
    kind: HashKind,
    ikm: SymmetricKey,
    salt: Vec<u8>,
}

impl HkdfExtractState {
    pub(crate) fn open(kind: HashKind, key: SymmetricKey) -> Self {
        Self {
            kind,
            ikm: key,
            salt: Vec::new(),
        }
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        self.salt.extend_from_slice(data);
    }

    fn prk(&self) -> CryptoResult<Zeroizing<Vec<u8>>> {
        Ok(hkdf_extract(self.kind, self.ikm.raw(), &self.salt)?)
    }

    /// Writes the first `out.len()` bytes of the PRK.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) -> CryptoResult<()> {
        if out.len() > self.kind.size() {
            return Err(CryptoErrno::InvalidLength);
        }
        let prk = self.prk()?;
        out.copy_from_slice(&prk[..out.len()]);
        Ok(())
    }

    /// Returns the PRK as a key for the expand step over the same digest.
    pub(crate) fn squeeze_key(&mut self, target: SymmetricAlgorithm) -> CryptoResult<SymmetricKey> {
        match target.family() {
            SymmetricFamily::HkdfExpand(kind) if kind == self.kind => {
                Ok(SymmetricKey::new(target, self.prk()?))
            }
            _ => {
                tracing::debug!(alg = %target, "PRK can only key the matching expand step");
                Err(CryptoErrno::InvalidOperation)
            }
        }
    }
}

pub(crate) struct HkdfExpandState {
    kind: HashKind,
    prk: SymmetricKey,
    info: Vec<u8>,
}

impl HkdfExpandState {
    pub(crate) fn open(kind: HashKind, key: SymmetricKey) -> Self {
        Self {
            kind,
            prk: key,
            info: Vec::new(),
        }
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        self.info.extend_from_slice(data);
    }

    pub(crate) fn squeeze(&mut self, out: &mut [u8]) -> CryptoResult<()> {
        Ok(hkdf_expand(self.kind, self.prk.raw(), &self.info, out)?)
    }

    /// Derives a key of `target`'s natural length.
    pub(crate) fn squeeze_key(&mut self, target: SymmetricAlgorithm) -> CryptoResult<SymmetricKey> {
        let len = target.key_len()?;
        if len > hkdf_max_output_len(self.kind) {
            return Err(CryptoErrno::InvalidLength);
        }
        let mut okm = Zeroizing::new(vec![0u8; len]);
        self.squeeze(&mut okm)?;
        Ok(SymmetricKey::new(target, okm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 5869 test case 1
    const IKM: [u8; 22] = [0x0b; 22];
    const PRK: &str = "077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5";

    fn extract_state() -> HkdfExtractState {
        let ikm = SymmetricKey::import(SymmetricAlgorithm::HkdfExtractSha256, &IKM).unwrap();
        let mut state = HkdfExtractState::open(HashKind::Sha256, ikm);
        state.absorb(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        state.absorb(&[0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c]);
        state
    }

    #[test]
    fn test_extract_squeeze() {
        let mut state = extract_state();
        let mut prk = [0u8; 32];
        state.squeeze(&mut prk).unwrap();
        assert_eq!(hex::encode(prk), PRK);

        let mut too_long = [0u8; 33];
        assert_eq!(state.squeeze(&mut too_long), Err(CryptoErrno::InvalidLength));
    }

    #[test]
    fn test_extract_key_targets() {
        let mut state = extract_state();
        let key = state
            .squeeze_key(SymmetricAlgorithm::HkdfExpandSha256)
            .unwrap();
        assert_eq!(hex::encode(key.raw()), PRK);

        assert!(matches!(
            state.squeeze_key(SymmetricAlgorithm::HkdfExpandSha512),
            Err(CryptoErrno::InvalidOperation)
        ));
        assert!(matches!(
            state.squeeze_key(SymmetricAlgorithm::Aes128Gcm),
            Err(CryptoErrno::InvalidOperation)
        ));
    }

    #[test]
    fn test_expand_squeeze_key_length() {
        let prk = SymmetricKey::import(
            SymmetricAlgorithm::HkdfExpandSha256,
            &hex::decode(PRK).unwrap(),
        )
        .unwrap();
        let mut state = HkdfExpandState::open(HashKind::Sha256, prk);
        state.absorb(b"info");

        let key = state.squeeze_key(SymmetricAlgorithm::Aes128Gcm).unwrap();
        assert_eq!(key.raw().len(), 16);
        assert_eq!(key.alg(), SymmetricAlgorithm::Aes128Gcm);

        assert!(matches!(
            state.squeeze_key(SymmetricAlgorithm::Sha256),
            Err(CryptoErrno::KeyNotSupported)
        ));
    }
}
