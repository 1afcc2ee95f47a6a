// Copyright (C) Microsoft Corporation. All rights reserved.

//! Ed25519 keys and signatures (RFC 8032, pure variant).
//!
//! Ed25519 signs the whole message in one pass, so the streaming contexts
//! buffer input until `finish`. The buffer is bounded by a limit chosen by
//! the caller; exceeding it fails with [`CryptoError::Ed25519MessageTooLong`].

use openssl::pkey::Id;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::pkey::Public;
use openssl::sign::Signer;
use openssl::sign::Verifier;
use zeroize::Zeroizing;

use super::*;

/// Length of an Ed25519 seed or public key.
pub const ED25519_KEY_SIZE: usize = 32;

/// Length of an Ed25519 signature.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Ed25519 private key.
#[derive(Debug, Clone)]
pub struct Ed25519PrivateKey {
    key: PKey<Private>,
}

impl Ed25519PrivateKey {
    /// Generates a new key.
    pub fn generate() -> Result<Self, CryptoError> {
        let key = PKey::generate_ed25519().map_err(|_| CryptoError::Ed25519KeyGenError)?;
        Ok(Self { key })
    }

    /// Imports a 32-byte seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        if seed.len() != ED25519_KEY_SIZE {
            return Err(CryptoError::Ed25519KeyImportError);
        }
        let key = PKey::private_key_from_raw_bytes(seed, Id::ED25519)
            .map_err(|_| CryptoError::Ed25519KeyImportError)?;
        Ok(Self { key })
    }

    /// Imports `seed || public key` and checks the two halves agree.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 2 * ED25519_KEY_SIZE {
            return Err(CryptoError::Ed25519KeyImportError);
        }
        let (seed, public) = bytes.split_at(ED25519_KEY_SIZE);
        let key = Self::from_seed(seed)?;
        if key.public_bytes()?.as_slice() != public {
            return Err(CryptoError::KeyMismatch);
        }
        Ok(key)
    }

    /// Imports a PKCS#8 PrivateKeyInfo in DER form.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, CryptoError> {
        let key = PKey::private_key_from_pkcs8(der)
            .map_err(|_| CryptoError::Ed25519KeyImportError)?;
        Self::checked(key)
    }

    /// Imports a PKCS#8 PEM private key.
    pub fn from_pem(pem: &[u8]) -> Result<Self, CryptoError> {
        let key =
            PKey::private_key_from_pem(pem).map_err(|_| CryptoError::Ed25519KeyImportError)?;
        Self::checked(key)
    }

    fn checked(key: PKey<Private>) -> Result<Self, CryptoError> {
        if key.id() != Id::ED25519 {
            return Err(CryptoError::Ed25519KeyImportError);
        }
        Ok(Self { key })
    }

    /// Exports the 32-byte seed.
    pub fn to_seed(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .raw_private_key()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }

    /// Exports `seed || public key`.
    pub fn to_keypair_bytes(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let mut bytes = self.to_seed()?;
        bytes.extend_from_slice(&self.public_bytes()?);
        Ok(bytes)
    }

    /// Exports PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .private_key_to_pkcs8()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }

    /// Exports PKCS#8 PEM.
    pub fn to_pem(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .private_key_to_pem_pkcs8()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }

    fn public_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .raw_public_key()
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }
}

impl PrivateKey for Ed25519PrivateKey {
    type PublicKey = Ed25519PublicKey;

    fn public_key(&self) -> Result<Self::PublicKey, CryptoError> {
        Ed25519PublicKey::from_raw(&self.public_bytes()?)
    }

    fn matches(&self, public_key: &Self::PublicKey) -> bool {
        match (self.public_bytes(), public_key.to_raw()) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

/// Ed25519 public key.
#[derive(Debug, Clone)]
pub struct Ed25519PublicKey {
    key: PKey<Public>,
}

impl Ed25519PublicKey {
    /// Imports a 32-byte public key.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != ED25519_KEY_SIZE {
            return Err(CryptoError::Ed25519KeyImportError);
        }
        let key = PKey::public_key_from_raw_bytes(bytes, Id::ED25519)
            .map_err(|_| CryptoError::Ed25519KeyImportError)?;
        Ok(Self { key })
    }

    /// Imports a SubjectPublicKeyInfo in DER form.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, CryptoError> {
        let key =
            PKey::public_key_from_der(der).map_err(|_| CryptoError::Ed25519KeyImportError)?;
        Self::checked(key)
    }

    /// Imports a SubjectPublicKeyInfo in PEM form.
    pub fn from_pem(pem: &[u8]) -> Result<Self, CryptoError> {
        let key =
            PKey::public_key_from_pem(pem).map_err(|_| CryptoError::Ed25519KeyImportError)?;
        Self::checked(key)
    }

    fn checked(key: PKey<Public>) -> Result<Self, CryptoError> {
        if key.id() != Id::ED25519 {
            return Err(CryptoError::Ed25519KeyImportError);
        }
        Ok(Self { key })
    }

    /// Exports the 32-byte public key.
    pub fn to_raw(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .raw_public_key()
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }

    /// Exports SubjectPublicKeyInfo DER.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .public_key_to_der()
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }

    /// Exports SubjectPublicKeyInfo PEM.
    pub fn to_pem(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .public_key_to_pem()
            .map_err(|_| CryptoError::Ed25519KeyExportError)
    }
}

impl PublicKey for Ed25519PublicKey {}

/// Appends `data` to a bounded message buffer.
fn buffer_message(buf: &mut Vec<u8>, data: &[u8], limit: usize) -> Result<(), CryptoError> {
    if buf.len().saturating_add(data.len()) > limit {
        return Err(CryptoError::Ed25519MessageTooLong);
    }
    buf.extend_from_slice(data);
    Ok(())
}

/// Buffering Ed25519 signer.
pub struct Ed25519SignContext {
    key: Ed25519PrivateKey,
    message: Vec<u8>,
    limit: usize,
    finished: bool,
}

impl Ed25519SignContext {
    /// Starts a signing operation buffering at most `limit` message bytes.
    pub fn new(key: &Ed25519PrivateKey, limit: usize) -> Self {
        Self {
            key: key.clone(),
            message: Vec::new(),
            limit,
            finished: false,
        }
    }
}

impl SignContext for Ed25519SignContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        buffer_message(&mut self.message, data, self.limit)
    }

    fn finish(&mut self) -> Result<Vec<u8>, CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.finished = true;

        let message = std::mem::take(&mut self.message);
        let mut signer =
            Signer::new_without_digest(&self.key.key).map_err(|_| CryptoError::Ed25519SignError)?;
        signer
            .sign_oneshot_to_vec(&message)
            .map_err(|_| CryptoError::Ed25519SignError)
    }
}

/// Buffering Ed25519 verifier.
pub struct Ed25519VerifyContext {
    key: Ed25519PublicKey,
    message: Vec<u8>,
    limit: usize,
    finished: bool,
}

impl Ed25519VerifyContext {
    /// Starts a verification operation buffering at most `limit` message bytes.
    pub fn new(key: &Ed25519PublicKey, limit: usize) -> Self {
        Self {
            key: key.clone(),
            message: Vec::new(),
            limit,
            finished: false,
        }
    }
}

impl VerifyContext for Ed25519VerifyContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        buffer_message(&mut self.message, data, self.limit)
    }

    fn finish(&mut self, signature: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.finished = true;

        if signature.len() != ED25519_SIGNATURE_SIZE {
            return Err(CryptoError::SignatureVerificationFailed);
        }
        let message = std::mem::take(&mut self.message);
        let mut verifier = Verifier::new_without_digest(&self.key.key)
            .map_err(|_| CryptoError::Ed25519VerifyError)?;
        match verifier.verify_oneshot(signature, &message) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(CryptoError::SignatureVerificationFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    // RFC 8032 section 7.1, test 1
    const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const SIGNATURE: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    #[test]
    fn test_ed25519_rfc8032_vector() {
        let key = Ed25519PrivateKey::from_seed(&hex::decode(SEED).unwrap()).expect("seed");
        let public = key.public_key().expect("public");
        assert_eq!(hex::encode(public.to_raw().expect("raw")), PUBLIC);

        let mut signer = Ed25519SignContext::new(&key, 1024);
        let sig = signer.finish().expect("sign");
        assert_eq!(hex::encode(&sig), SIGNATURE);

        let mut verifier = Ed25519VerifyContext::new(&public, 1024);
        assert!(verifier.finish(&sig).is_ok());
    }

    #[test]
    fn test_ed25519_streaming_equals_one_shot() {
        let key = Ed25519PrivateKey::generate().expect("generate");
        let public = key.public_key().expect("public");

        let mut a = Ed25519SignContext::new(&key, 1024);
        a.update(b"test").expect("update");
        a.update(b"test").expect("update");
        let sig = a.finish().expect("sign");

        let mut b = Ed25519VerifyContext::new(&public, 1024);
        b.update(b"testtest").expect("update");
        assert!(b.finish(&sig).is_ok());

        let mut c = Ed25519VerifyContext::new(&public, 1024);
        c.update(b"testtesx").expect("update");
        assert_eq!(c.finish(&sig), Err(CryptoError::SignatureVerificationFailed));
    }

    #[test]
    fn test_ed25519_buffer_limit() {
        let key = Ed25519PrivateKey::generate().expect("generate");
        let mut ctx = Ed25519SignContext::new(&key, 8);
        ctx.update(&[0u8; 8]).expect("within limit");
        assert_eq!(ctx.update(&[0u8; 1]), Err(CryptoError::Ed25519MessageTooLong));
    }

    #[test]
    fn test_ed25519_keypair_bytes() {
        let key = Ed25519PrivateKey::generate().expect("generate");
        let bytes = key.to_keypair_bytes().expect("export");
        assert_eq!(bytes.len(), 64);
        let imported = Ed25519PrivateKey::from_keypair_bytes(&bytes).expect("import");
        assert_eq!(*imported.to_seed().expect("seed"), *key.to_seed().expect("seed"));

        let mut corrupted = bytes.to_vec();
        corrupted[40] ^= 0xff;
        assert_eq!(
            Ed25519PrivateKey::from_keypair_bytes(&corrupted).unwrap_err(),
            CryptoError::KeyMismatch
        );
    }

    #[test]
    fn test_ed25519_encodings() {
        let key = Ed25519PrivateKey::generate().expect("generate");
        let public = key.public_key().expect("public");

        let pkcs8 = key.to_pkcs8_der().expect("pkcs8");
        assert!(Ed25519PrivateKey::from_pkcs8_der(&pkcs8)
            .expect("from pkcs8")
            .matches(&public));
        let pem = key.to_pem().expect("pem");
        assert!(Ed25519PrivateKey::from_pem(&pem)
            .expect("from pem")
            .matches(&public));

        let spki = public.to_spki_der().expect("spki");
        assert!(key.matches(&Ed25519PublicKey::from_spki_der(&spki).expect("from spki")));
        let pem = public.to_pem().expect("pem");
        assert!(key.matches(&Ed25519PublicKey::from_pem(&pem).expect("from pem")));
    }

    #[test]
    fn test_ed25519_rejects_foreign_key_type() {
        let ec = crate::EccPrivateKey::generate(crate::EccCurve::P256).expect("ec");
        let der = ec.to_pkcs8_der().expect("pkcs8");
        assert_eq!(
            Ed25519PrivateKey::from_pkcs8_der(&der).unwrap_err(),
            CryptoError::Ed25519KeyImportError
        );
    }
}
