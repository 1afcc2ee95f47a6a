// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA keys and signatures.
//!
//! # Padding Schemes
//!
//! - **PKCS#1 v1.5**: deterministic padding
//! - **PSS**: probabilistic padding with MGF1 over the message digest and a
//!   salt as long as the digest
//!
//! # Key Formats
//!
//! - Private keys: PKCS#1 RSAPrivateKey DER, PKCS#8 (DER and PEM)
//! - Public keys: PKCS#1 RSAPublicKey DER, SubjectPublicKeyInfo (DER and PEM)
//!
//! Every import checks the modulus length against the size the caller
//! expects. Private keys additionally pass the library consistency check.

use openssl::md_ctx::MdCtx;
use openssl::pkey::PKey;
use openssl::pkey::PKeyRef;
use openssl::pkey::Private;
use openssl::pkey::Public;
use openssl::pkey_ctx::PkeyCtxRef;
use openssl::rsa::Padding;
use openssl::rsa::Rsa;
use openssl::sign::RsaPssSaltlen;
use zeroize::Zeroizing;

use super::*;

/// RSA signature padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaPadding {
    /// PKCS#1 v1.5.
    Pkcs1,
    /// PSS with MGF1 and digest-length salt.
    Pss,
}

fn checked_private(rsa: Rsa<Private>, bits: u32) -> Result<RsaPrivateKey, CryptoError> {
    if rsa.size() * 8 != bits {
        return Err(CryptoError::RsaInvalidKeySize);
    }
    match rsa.check_key() {
        Ok(true) => {}
        _ => return Err(CryptoError::RsaKeyImportError),
    }
    let key = PKey::from_rsa(rsa).map_err(|_| CryptoError::RsaKeyImportError)?;
    Ok(RsaPrivateKey { key })
}

fn checked_public(rsa: Rsa<Public>, bits: u32) -> Result<RsaPublicKey, CryptoError> {
    if rsa.size() * 8 != bits {
        return Err(CryptoError::RsaInvalidKeySize);
    }
    let key = PKey::from_rsa(rsa).map_err(|_| CryptoError::RsaKeyImportError)?;
    Ok(RsaPublicKey { key })
}

/// RSA private key.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    key: PKey<Private>,
}

impl RsaPrivateKey {
    /// Generates a key with a `bits`-bit modulus and public exponent 65537.
    #[tracing::instrument(skip_all, fields(bits = bits))]
    pub fn generate(bits: u32) -> Result<Self, CryptoError> {
        let rsa = Rsa::generate(bits).map_err(|_| CryptoError::RsaKeyGenError)?;
        let key = PKey::from_rsa(rsa).map_err(|_| CryptoError::RsaKeyGenError)?;
        Ok(Self { key })
    }

    /// Imports a PKCS#1 RSAPrivateKey in DER form.
    pub fn from_pkcs1_der(bits: u32, der: &[u8]) -> Result<Self, CryptoError> {
        let rsa = Rsa::private_key_from_der(der).map_err(|_| CryptoError::RsaKeyImportError)?;
        checked_private(rsa, bits)
    }

    /// Imports a PKCS#8 PrivateKeyInfo in DER form.
    pub fn from_pkcs8_der(bits: u32, der: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::private_key_from_pkcs8(der).map_err(|_| CryptoError::RsaKeyImportError)?;
        let rsa = pkey.rsa().map_err(|_| CryptoError::RsaKeyImportError)?;
        checked_private(rsa, bits)
    }

    /// Imports a PEM private key (PKCS#8 or PKCS#1).
    pub fn from_pem(bits: u32, pem: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::private_key_from_pem(pem).map_err(|_| CryptoError::RsaKeyImportError)?;
        let rsa = pkey.rsa().map_err(|_| CryptoError::RsaKeyImportError)?;
        checked_private(rsa, bits)
    }

    /// Exports PKCS#1 RSAPrivateKey DER.
    pub fn to_pkcs1_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let rsa = self
            .key
            .rsa()
            .map_err(|_| CryptoError::RsaKeyExportError)?;
        rsa.private_key_to_der()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::RsaKeyExportError)
    }

    /// Exports PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .private_key_to_pkcs8()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::RsaKeyExportError)
    }

    /// Exports PKCS#8 PEM.
    pub fn to_pem(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .private_key_to_pem_pkcs8()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::RsaKeyExportError)
    }

    pub(crate) fn pkey(&self) -> &PKeyRef<Private> {
        &self.key
    }
}

impl PrivateKey for RsaPrivateKey {
    type PublicKey = RsaPublicKey;

    fn public_key(&self) -> Result<Self::PublicKey, CryptoError> {
        let rsa = self
            .key
            .rsa()
            .map_err(|_| CryptoError::RsaKeyExportError)?;
        let n = rsa.n().to_owned().map_err(|_| CryptoError::RsaKeyExportError)?;
        let e = rsa.e().to_owned().map_err(|_| CryptoError::RsaKeyExportError)?;
        let public =
            Rsa::from_public_components(n, e).map_err(|_| CryptoError::RsaKeyExportError)?;
        let key = PKey::from_rsa(public).map_err(|_| CryptoError::RsaKeyExportError)?;
        Ok(RsaPublicKey { key })
    }

    fn matches(&self, public_key: &Self::PublicKey) -> bool {
        self.key.public_eq(&public_key.key)
    }
}

/// RSA public key.
#[derive(Debug, Clone)]
pub struct RsaPublicKey {
    key: PKey<Public>,
}

impl RsaPublicKey {
    /// Imports a PKCS#1 RSAPublicKey in DER form.
    pub fn from_pkcs1_der(bits: u32, der: &[u8]) -> Result<Self, CryptoError> {
        let rsa =
            Rsa::public_key_from_der_pkcs1(der).map_err(|_| CryptoError::RsaKeyImportError)?;
        checked_public(rsa, bits)
    }

    /// Imports a SubjectPublicKeyInfo in DER form.
    pub fn from_spki_der(bits: u32, der: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::public_key_from_der(der).map_err(|_| CryptoError::RsaKeyImportError)?;
        let rsa = pkey.rsa().map_err(|_| CryptoError::RsaKeyImportError)?;
        checked_public(rsa, bits)
    }

    /// Imports a SubjectPublicKeyInfo in PEM form.
    pub fn from_pem(bits: u32, pem: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::public_key_from_pem(pem).map_err(|_| CryptoError::RsaKeyImportError)?;
        let rsa = pkey.rsa().map_err(|_| CryptoError::RsaKeyImportError)?;
        checked_public(rsa, bits)
    }

    /// Exports PKCS#1 RSAPublicKey DER.
    pub fn to_pkcs1_der(&self) -> Result<Vec<u8>, CryptoError> {
        let rsa = self
            .key
            .rsa()
            .map_err(|_| CryptoError::RsaKeyExportError)?;
        rsa.public_key_to_der_pkcs1()
            .map_err(|_| CryptoError::RsaKeyExportError)
    }

    /// Exports SubjectPublicKeyInfo DER.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .public_key_to_der()
            .map_err(|_| CryptoError::RsaKeyExportError)
    }

    /// Exports SubjectPublicKeyInfo PEM.
    pub fn to_pem(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .public_key_to_pem()
            .map_err(|_| CryptoError::RsaKeyExportError)
    }

    /// Checks the public exponent is odd and greater than one.
    pub fn validate(&self) -> Result<(), CryptoError> {
        let rsa = self
            .key
            .rsa()
            .map_err(|_| CryptoError::RsaKeyImportError)?;
        let e = rsa.e();
        if e.num_bits() < 2 || !e.is_bit_set(0) {
            return Err(CryptoError::RsaKeyImportError);
        }
        Ok(())
    }
}

impl PublicKey for RsaPublicKey {}

fn configure_pkey_ctx<T>(
    pkey_ctx: &mut PkeyCtxRef<T>,
    padding: RsaPadding,
    hash: HashKind,
) -> Result<(), CryptoError> {
    match padding {
        RsaPadding::Pkcs1 => pkey_ctx
            .set_rsa_padding(Padding::PKCS1)
            .map_err(|_| CryptoError::RsaSignError),
        RsaPadding::Pss => {
            pkey_ctx
                .set_rsa_padding(Padding::PKCS1_PSS)
                .map_err(|_| CryptoError::RsaSignError)?;
            pkey_ctx
                .set_rsa_pss_saltlen(RsaPssSaltlen::DIGEST_LENGTH)
                .map_err(|_| CryptoError::RsaSignError)?;
            pkey_ctx
                .set_rsa_mgf1_md(hash.md()?)
                .map_err(|_| CryptoError::RsaSignError)
        }
    }
}

/// Streaming RSA signer.
pub struct RsaSignContext {
    ctx: MdCtx,
    finished: bool,
}

impl RsaSignContext {
    /// Starts a signing operation with the given padding and digest.
    pub fn new(key: &RsaPrivateKey, padding: RsaPadding, hash: HashKind) -> Result<Self, CryptoError> {
        let mut ctx = MdCtx::new().map_err(|_| CryptoError::RsaSignError)?;
        let pkey_ctx = ctx
            .digest_sign_init(Some(hash.md()?), key.pkey())
            .map_err(|_| CryptoError::RsaSignError)?;
        configure_pkey_ctx(pkey_ctx, padding, hash)?;
        Ok(Self {
            ctx,
            finished: false,
        })
    }
}

impl SignContext for RsaSignContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.ctx
            .digest_sign_update(data)
            .map_err(|_| CryptoError::RsaSignError)
    }

    fn finish(&mut self) -> Result<Vec<u8>, CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.finished = true;

        let mut signature = Vec::new();
        self.ctx
            .digest_sign_final_to_vec(&mut signature)
            .map_err(|_| CryptoError::RsaSignError)?;
        Ok(signature)
    }
}

/// Streaming RSA verifier.
pub struct RsaVerifyContext {
    ctx: MdCtx,
    finished: bool,
}

impl RsaVerifyContext {
    /// Starts a verification operation with the given padding and digest.
    pub fn new(key: &RsaPublicKey, padding: RsaPadding, hash: HashKind) -> Result<Self, CryptoError> {
        let mut ctx = MdCtx::new().map_err(|_| CryptoError::RsaVerifyError)?;
        let pkey_ctx = ctx
            .digest_verify_init(Some(hash.md()?), &key.key)
            .map_err(|_| CryptoError::RsaVerifyError)?;
        configure_pkey_ctx(pkey_ctx, padding, hash).map_err(|_| CryptoError::RsaVerifyError)?;
        Ok(Self {
            ctx,
            finished: false,
        })
    }
}

impl VerifyContext for RsaVerifyContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.ctx
            .digest_verify_update(data)
            .map_err(|_| CryptoError::RsaVerifyError)
    }

    fn finish(&mut self, signature: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.finished = true;

        match self.ctx.digest_verify_final(signature) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(CryptoError::SignatureVerificationFailed),
        }
    }
}
