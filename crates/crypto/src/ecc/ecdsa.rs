// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECDSA over SHA-256.
//!
//! Signatures leave this module in the fixed-width raw form `r || s`, each
//! half left-padded to the curve scalar size. The helpers
//! [`ecdsa_signature_to_der`] and [`ecdsa_signature_from_der`] convert between
//! that form and the ASN.1 `ECDSA-Sig-Value` structure.

use openssl::bn::BigNum;
use openssl::ecdsa::EcdsaSig;
use openssl::md::Md;
use openssl::md_ctx::MdCtx;

use super::*;

/// Converts a raw `r || s` signature into DER.
pub fn ecdsa_signature_to_der(curve: EccCurve, raw: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let n = curve.scalar_size();
    if raw.len() != 2 * n {
        return Err(CryptoError::EcdsaInvalidSignature);
    }

    let r = BigNum::from_slice(&raw[..n]).map_err(|_| CryptoError::EcdsaInvalidSignature)?;
    let s = BigNum::from_slice(&raw[n..]).map_err(|_| CryptoError::EcdsaInvalidSignature)?;
    let sig =
        EcdsaSig::from_private_components(r, s).map_err(|_| CryptoError::EcdsaInvalidSignature)?;
    sig.to_der()
        .map_err(|_| CryptoError::EcdsaInvalidSignature)
}

/// Converts a DER signature into raw `r || s`.
pub fn ecdsa_signature_from_der(curve: EccCurve, der: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let n = curve.scalar_size();
    let sig = EcdsaSig::from_der(der).map_err(|_| CryptoError::EcdsaInvalidSignature)?;
    if sig.r().num_bytes() as usize > n || sig.s().num_bytes() as usize > n {
        return Err(CryptoError::EcdsaInvalidSignature);
    }

    let mut raw = sig
        .r()
        .to_vec_padded(n as i32)
        .map_err(|_| CryptoError::EcdsaInvalidSignature)?;
    raw.extend(
        sig.s()
            .to_vec_padded(n as i32)
            .map_err(|_| CryptoError::EcdsaInvalidSignature)?,
    );
    Ok(raw)
}

/// Streaming ECDSA-SHA256 signer.
pub struct EcdsaSignContext {
    curve: EccCurve,
    ctx: MdCtx,
    finished: bool,
}

impl EcdsaSignContext {
    /// Starts a signing operation with `key`.
    pub fn new(key: &EccPrivateKey) -> Result<Self, CryptoError> {
        let mut ctx = MdCtx::new().map_err(|_| CryptoError::EcdsaSignError)?;
        ctx.digest_sign_init(Some(Md::sha256()), key.pkey())
            .map_err(|_| CryptoError::EcdsaSignError)?;
        Ok(Self {
            curve: key.curve(),
            ctx,
            finished: false,
        })
    }
}

impl SignContext for EcdsaSignContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.ctx
            .digest_sign_update(data)
            .map_err(|_| CryptoError::EcdsaSignError)
    }

    fn finish(&mut self) -> Result<Vec<u8>, CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.finished = true;

        let mut der = Vec::new();
        self.ctx
            .digest_sign_final_to_vec(&mut der)
            .map_err(|_| CryptoError::EcdsaSignError)?;
        ecdsa_signature_from_der(self.curve, &der)
    }
}

/// Streaming ECDSA-SHA256 verifier.
pub struct EcdsaVerifyContext {
    curve: EccCurve,
    ctx: MdCtx,
    finished: bool,
}

impl EcdsaVerifyContext {
    /// Starts a verification operation with `key`.
    pub fn new(key: &EccPublicKey) -> Result<Self, CryptoError> {
        let mut ctx = MdCtx::new().map_err(|_| CryptoError::EcdsaVerifyError)?;
        ctx.digest_verify_init(Some(Md::sha256()), key.pkey())
            .map_err(|_| CryptoError::EcdsaVerifyError)?;
        Ok(Self {
            curve: key.curve(),
            ctx,
            finished: false,
        })
    }
}

impl VerifyContext for EcdsaVerifyContext {
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.ctx
            .digest_verify_update(data)
            .map_err(|_| CryptoError::EcdsaVerifyError)
    }

    fn finish(&mut self, signature: &[u8]) -> Result<(), CryptoError> {
        if self.finished {
            return Err(CryptoError::SignatureContextFinalized);
        }
        self.finished = true;

        let der = ecdsa_signature_to_der(self.curve, signature)
            .map_err(|_| CryptoError::SignatureVerificationFailed)?;
        match self.ctx.digest_verify_final(&der) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(CryptoError::SignatureVerificationFailed),
        }
    }
}
