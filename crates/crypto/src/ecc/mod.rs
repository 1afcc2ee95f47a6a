// Copyright (C) Microsoft Corporation. All rights reserved.

//! Elliptic curve keys for ECDSA.
//!
//! This module provides private and public keys on the two curves exposed to
//! guests and the conversions between their encodings. Signing lives in the
//! [`ecdsa`] submodule.
//!
//! # Supported Curves
//!
//! - **P-256** (secp256r1, prime256v1): 32-byte scalars
//! - **secp256k1**: 32-byte scalars
//!
//! # Key Formats
//!
//! - Private keys: raw big-endian scalar, PKCS#8 (DER and PEM), SEC1
//!   ECPrivateKey DER
//! - Public keys: SEC1 points (compressed or uncompressed),
//!   SubjectPublicKeyInfo (DER and PEM)
//!
//! Every imported key is validated: points must lie on the curve and private
//! scalars must be in `[1, n-1]`.

mod ecdsa;

pub use ecdsa::*;
use openssl::bn::BigNum;
use openssl::bn::BigNumContext;
use openssl::ec::EcGroup;
use openssl::ec::EcKey;
use openssl::ec::EcPoint;
use openssl::ec::PointConversionForm;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::pkey::PKeyRef;
use openssl::pkey::Private;
use openssl::pkey::Public;
use zeroize::Zeroizing;

use super::*;

/// Supported elliptic curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EccCurve {
    /// NIST P-256.
    P256,
    /// secp256k1.
    Secp256k1,
}

impl EccCurve {
    /// Scalar and coordinate length in bytes.
    pub fn scalar_size(self) -> usize {
        32
    }

    fn nid(self) -> Nid {
        match self {
            EccCurve::P256 => Nid::X9_62_PRIME256V1,
            EccCurve::Secp256k1 => Nid::SECP256K1,
        }
    }

    fn group(self) -> Result<EcGroup, CryptoError> {
        EcGroup::from_curve_name(self.nid()).map_err(|_| CryptoError::EccUnsupportedCurve)
    }
}

impl TryFrom<Nid> for EccCurve {
    type Error = CryptoError;

    fn try_from(nid: Nid) -> Result<Self, Self::Error> {
        match nid {
            Nid::X9_62_PRIME256V1 => Ok(EccCurve::P256),
            Nid::SECP256K1 => Ok(EccCurve::Secp256k1),
            _ => Err(CryptoError::EccUnsupportedCurve),
        }
    }
}

fn bn_ctx() -> Result<BigNumContext, CryptoError> {
    BigNumContext::new().map_err(|_| CryptoError::EccKeyImportError)
}

/// Validates an EC private key and confirms it sits on `expected`.
fn checked_private(
    ec_key: EcKey<Private>,
    expected: EccCurve,
) -> Result<PKey<Private>, CryptoError> {
    let nid = ec_key
        .group()
        .curve_name()
        .ok_or(CryptoError::EccKeyImportError)?;
    if EccCurve::try_from(nid)? != expected {
        return Err(CryptoError::EccKeyImportError);
    }
    ec_key
        .check_key()
        .map_err(|_| CryptoError::EccKeyImportError)?;
    PKey::from_ec_key(ec_key).map_err(|_| CryptoError::EccKeyImportError)
}

fn checked_public(ec_key: EcKey<Public>, expected: EccCurve) -> Result<PKey<Public>, CryptoError> {
    let nid = ec_key
        .group()
        .curve_name()
        .ok_or(CryptoError::EccKeyImportError)?;
    if EccCurve::try_from(nid)? != expected {
        return Err(CryptoError::EccKeyImportError);
    }
    ec_key
        .check_key()
        .map_err(|_| CryptoError::EccKeyImportError)?;
    PKey::from_ec_key(ec_key).map_err(|_| CryptoError::EccKeyImportError)
}

/// ECC private key.
#[derive(Debug, Clone)]
pub struct EccPrivateKey {
    key: PKey<Private>,
    curve: EccCurve,
}

impl EccPrivateKey {
    /// Generates a fresh key on `curve`.
    pub fn generate(curve: EccCurve) -> Result<Self, CryptoError> {
        let group = curve.group()?;
        let ec_key = EcKey::generate(&group).map_err(|_| CryptoError::EccKeyGenError)?;
        let key = PKey::from_ec_key(ec_key).map_err(|_| CryptoError::EccKeyGenError)?;
        Ok(Self { key, curve })
    }

    /// Imports a raw big-endian scalar.
    ///
    /// The scalar must be exactly [`EccCurve::scalar_size`] bytes and lie in
    /// `[1, n-1]`. The public point is recomputed from it.
    pub fn from_scalar(curve: EccCurve, scalar: &[u8]) -> Result<Self, CryptoError> {
        if scalar.len() != curve.scalar_size() {
            return Err(CryptoError::EccKeyImportError);
        }

        let group = curve.group()?;
        let mut ctx = bn_ctx()?;
        let d = BigNum::from_slice(scalar).map_err(|_| CryptoError::EccKeyImportError)?;
        let mut order = BigNum::new().map_err(|_| CryptoError::EccKeyImportError)?;
        group
            .order(&mut order, &mut ctx)
            .map_err(|_| CryptoError::EccKeyImportError)?;
        if d.num_bits() == 0 || d.ucmp(&order) != std::cmp::Ordering::Less {
            return Err(CryptoError::EccKeyImportError);
        }

        let mut point = EcPoint::new(&group).map_err(|_| CryptoError::EccKeyImportError)?;
        point
            .mul_generator2(&group, &d, &mut ctx)
            .map_err(|_| CryptoError::EccKeyImportError)?;
        let ec_key = EcKey::from_private_components(&group, &d, &point)
            .map_err(|_| CryptoError::EccKeyImportError)?;
        let key = checked_private(ec_key, curve)?;
        Ok(Self { key, curve })
    }

    /// Imports a PKCS#8 PrivateKeyInfo in DER form.
    pub fn from_pkcs8_der(curve: EccCurve, der: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::private_key_from_pkcs8(der).map_err(|_| CryptoError::EccKeyImportError)?;
        Self::from_pkey(curve, &pkey)
    }

    /// Imports a PEM private key (PKCS#8 or SEC1).
    pub fn from_pem(curve: EccCurve, pem: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::private_key_from_pem(pem).map_err(|_| CryptoError::EccKeyImportError)?;
        Self::from_pkey(curve, &pkey)
    }

    /// Imports a SEC1 ECPrivateKey in DER form.
    pub fn from_sec1_der(curve: EccCurve, der: &[u8]) -> Result<Self, CryptoError> {
        let ec_key =
            EcKey::private_key_from_der(der).map_err(|_| CryptoError::EccKeyImportError)?;
        let key = checked_private(ec_key, curve)?;
        Ok(Self { key, curve })
    }

    fn from_pkey(curve: EccCurve, pkey: &PKeyRef<Private>) -> Result<Self, CryptoError> {
        let ec_key = pkey.ec_key().map_err(|_| CryptoError::EccKeyImportError)?;
        let key = checked_private(ec_key, curve)?;
        Ok(Self { key, curve })
    }

    /// Curve of this key.
    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    /// Exports the raw big-endian scalar, left-padded to the curve size.
    pub fn to_scalar(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let ec_key = self
            .key
            .ec_key()
            .map_err(|_| CryptoError::EccKeyExportError)?;
        let scalar = ec_key
            .private_key()
            .to_vec_padded(self.curve.scalar_size() as i32)
            .map_err(|_| CryptoError::EccKeyExportError)?;
        Ok(Zeroizing::new(scalar))
    }

    /// Exports PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .private_key_to_pkcs8()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::EccKeyExportError)
    }

    /// Exports PKCS#8 PEM.
    pub fn to_pem(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.key
            .private_key_to_pem_pkcs8()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::EccKeyExportError)
    }

    /// Exports SEC1 ECPrivateKey DER.
    pub fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let ec_key = self
            .key
            .ec_key()
            .map_err(|_| CryptoError::EccKeyExportError)?;
        ec_key
            .private_key_to_der()
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::EccKeyExportError)
    }

    pub(crate) fn pkey(&self) -> &PKeyRef<Private> {
        &self.key
    }
}

impl PrivateKey for EccPrivateKey {
    type PublicKey = EccPublicKey;

    fn public_key(&self) -> Result<Self::PublicKey, CryptoError> {
        let ec_key = self
            .key
            .ec_key()
            .map_err(|_| CryptoError::EccKeyExportError)?;
        let public = EcKey::from_public_key(ec_key.group(), ec_key.public_key())
            .map_err(|_| CryptoError::EccKeyExportError)?;
        let key = PKey::from_ec_key(public).map_err(|_| CryptoError::EccKeyExportError)?;
        Ok(EccPublicKey {
            key,
            curve: self.curve,
        })
    }

    fn matches(&self, public_key: &Self::PublicKey) -> bool {
        self.curve == public_key.curve && self.key.public_eq(&public_key.key)
    }
}

/// ECC public key.
#[derive(Debug, Clone)]
pub struct EccPublicKey {
    key: PKey<Public>,
    curve: EccCurve,
}

impl EccPublicKey {
    /// Imports a SEC1 encoded point, compressed or uncompressed.
    pub fn from_sec1_point(curve: EccCurve, bytes: &[u8]) -> Result<Self, CryptoError> {
        let group = curve.group()?;
        let mut ctx = bn_ctx()?;
        let point = EcPoint::from_bytes(&group, bytes, &mut ctx)
            .map_err(|_| CryptoError::EccKeyImportError)?;
        let ec_key =
            EcKey::from_public_key(&group, &point).map_err(|_| CryptoError::EccKeyImportError)?;
        let key = checked_public(ec_key, curve)?;
        Ok(Self { key, curve })
    }

    /// Imports a SubjectPublicKeyInfo in DER form.
    pub fn from_spki_der(curve: EccCurve, der: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::public_key_from_der(der).map_err(|_| CryptoError::EccKeyImportError)?;
        let ec_key = pkey.ec_key().map_err(|_| CryptoError::EccKeyImportError)?;
        let key = checked_public(ec_key, curve)?;
        Ok(Self { key, curve })
    }

    /// Imports a SubjectPublicKeyInfo in PEM form.
    pub fn from_pem(curve: EccCurve, pem: &[u8]) -> Result<Self, CryptoError> {
        let pkey = PKey::public_key_from_pem(pem).map_err(|_| CryptoError::EccKeyImportError)?;
        let ec_key = pkey.ec_key().map_err(|_| CryptoError::EccKeyImportError)?;
        let key = checked_public(ec_key, curve)?;
        Ok(Self { key, curve })
    }

    /// Curve of this key.
    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    /// Exports the SEC1 point.
    pub fn to_sec1_point(&self, compressed: bool) -> Result<Vec<u8>, CryptoError> {
        let ec_key = self
            .key
            .ec_key()
            .map_err(|_| CryptoError::EccKeyExportError)?;
        let form = if compressed {
            PointConversionForm::COMPRESSED
        } else {
            PointConversionForm::UNCOMPRESSED
        };
        let mut ctx = BigNumContext::new().map_err(|_| CryptoError::EccKeyExportError)?;
        ec_key
            .public_key()
            .to_bytes(ec_key.group(), form, &mut ctx)
            .map_err(|_| CryptoError::EccKeyExportError)
    }

    /// Exports SubjectPublicKeyInfo DER.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .public_key_to_der()
            .map_err(|_| CryptoError::EccKeyExportError)
    }

    /// Exports SubjectPublicKeyInfo PEM.
    pub fn to_pem(&self) -> Result<Vec<u8>, CryptoError> {
        self.key
            .public_key_to_pem()
            .map_err(|_| CryptoError::EccKeyExportError)
    }

    /// Re-runs the on-curve and subgroup checks.
    pub fn validate(&self) -> Result<(), CryptoError> {
        let ec_key = self
            .key
            .ec_key()
            .map_err(|_| CryptoError::EccKeyImportError)?;
        ec_key
            .check_key()
            .map_err(|_| CryptoError::EccKeyImportError)
    }

    pub(crate) fn pkey(&self) -> &PKeyRef<Public> {
        &self.key
    }
}

impl PublicKey for EccPublicKey {}

#[cfg(test)]
mod tests;
