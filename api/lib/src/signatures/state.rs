// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::EcdsaSignContext;
use guestcrypto_crypto::EcdsaVerifyContext;
use guestcrypto_crypto::Ed25519SignContext;
use guestcrypto_crypto::Ed25519VerifyContext;
use guestcrypto_crypto::RsaSignContext;
use guestcrypto_crypto::RsaVerifyContext;
use guestcrypto_crypto::SignContext;
use guestcrypto_crypto::VerifyContext;

use super::*;

/// Streaming signer bound to one key pair.
///
/// `sign` finalizes the state; any later call fails with `InvalidOperation`.
pub(crate) struct SignatureState {
    alg: SignatureAlgorithm,
    ctx: Box<dyn SignContext + Send>,
}

impl SignatureState {
    /// `message_limit` caps the bytes buffered by one-shot schemes.
    pub(crate) fn open(keypair: &SignatureKeyPair, message_limit: usize) -> CryptoResult<Self> {
        let ctx: Box<dyn SignContext + Send> = match keypair.secret_key() {
            SignatureSecretKey::Ecdsa(key) => Box::new(EcdsaSignContext::new(&key)?),
            SignatureSecretKey::Ed25519(key) => {
                Box::new(Ed25519SignContext::new(&key, message_limit))
            }
            SignatureSecretKey::Rsa(scheme, key) => {
                Box::new(RsaSignContext::new(&key, scheme.padding, scheme.hash)?)
            }
        };
        Ok(Self {
            alg: keypair.alg(),
            ctx,
        })
    }

    pub(crate) fn update(&mut self, data: &[u8]) -> CryptoResult<()> {
        Ok(self.ctx.update(data)?)
    }

    pub(crate) fn sign(&mut self) -> CryptoResult<Signature> {
        let raw = self.ctx.finish()?;
        Ok(Signature::new(self.alg, raw))
    }
}

/// Streaming verifier bound to one public key.
pub(crate) struct VerificationState {
    alg: SignatureAlgorithm,
    ctx: Box<dyn VerifyContext + Send>,
}

impl VerificationState {
    pub(crate) fn open(public_key: &SignaturePublicKey, message_limit: usize) -> CryptoResult<Self> {
        let ctx: Box<dyn VerifyContext + Send> = match public_key {
            SignaturePublicKey::Ecdsa(key) => Box::new(EcdsaVerifyContext::new(key)?),
            SignaturePublicKey::Ed25519(key) => {
                Box::new(Ed25519VerifyContext::new(key, message_limit))
            }
            SignaturePublicKey::Rsa(scheme, key) => {
                Box::new(RsaVerifyContext::new(key, scheme.padding, scheme.hash)?)
            }
        };
        Ok(Self {
            alg: public_key.alg(),
            ctx,
        })
    }

    pub(crate) fn update(&mut self, data: &[u8]) -> CryptoResult<()> {
        Ok(self.ctx.update(data)?)
    }

    /// Checks `signature` against the absorbed message.
    ///
    /// A signature made for another algorithm is rejected with
    /// `InvalidHandle` and leaves the state open.
    pub(crate) fn verify(&mut self, signature: &Signature) -> CryptoResult<()> {
        if signature.alg() != self.alg {
            tracing::debug!(
                state_alg = %self.alg,
                signature_alg = %signature.alg(),
                "signature algorithm mismatch"
            );
            return Err(CryptoErrno::InvalidHandle);
        }
        Ok(self.ctx.finish(signature.raw())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1 << 20;

    fn sign(keypair: &SignatureKeyPair, chunks: &[&[u8]]) -> Signature {
        let mut state = SignatureState::open(keypair, LIMIT).unwrap();
        for chunk in chunks {
            state.update(chunk).unwrap();
        }
        state.sign().unwrap()
    }

    fn verify(public_key: &SignaturePublicKey, chunks: &[&[u8]], signature: &Signature) -> CryptoResult<()> {
        let mut state = VerificationState::open(public_key, LIMIT)?;
        for chunk in chunks {
            state.update(chunk)?;
        }
        state.verify(signature)
    }

    #[test]
    fn test_chunking_does_not_matter() {
        for alg in [
            SignatureAlgorithm::EcdsaP256Sha256,
            SignatureAlgorithm::EcdsaK256Sha256,
            SignatureAlgorithm::Ed25519,
        ] {
            let keypair = SignatureKeyPair::generate(alg).unwrap();
            let public = keypair.public_key().unwrap();
            let signature = sign(&keypair, &[b"hello ", b"world"]);
            assert_eq!(signature.alg(), alg);
            assert!(verify(&public, &[b"hello world"], &signature).is_ok());
            assert_eq!(
                verify(&public, &[b"hello there"], &signature),
                Err(CryptoErrno::VerificationFailed)
            );
        }
    }

    #[test]
    fn test_finalized_state_rejects_use() {
        let keypair = SignatureKeyPair::generate(SignatureAlgorithm::Ed25519).unwrap();
        let mut state = SignatureState::open(&keypair, LIMIT).unwrap();
        state.update(b"message").unwrap();
        state.sign().unwrap();
        assert_eq!(state.update(b"more"), Err(CryptoErrno::InvalidOperation));
        assert!(matches!(state.sign(), Err(CryptoErrno::InvalidOperation)));
    }

    #[test]
    fn test_signature_algorithm_mismatch() {
        let ed = SignatureKeyPair::generate(SignatureAlgorithm::Ed25519).unwrap();
        let p256 = SignatureKeyPair::generate(SignatureAlgorithm::EcdsaP256Sha256).unwrap();
        let signature = sign(&ed, &[b"message"]);

        let mut state = VerificationState::open(&p256.public_key().unwrap(), LIMIT).unwrap();
        state.update(b"message").unwrap();
        assert_eq!(state.verify(&signature), Err(CryptoErrno::InvalidHandle));
    }

    #[test]
    fn test_ed25519_message_limit() {
        let keypair = SignatureKeyPair::generate(SignatureAlgorithm::Ed25519).unwrap();
        let mut state = SignatureState::open(&keypair, 8).unwrap();
        state.update(b"12345678").unwrap();
        assert_eq!(state.update(b"9"), Err(CryptoErrno::Overflow));
    }
}
