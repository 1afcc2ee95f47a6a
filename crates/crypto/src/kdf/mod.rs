// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HKDF (RFC 5869) as two independent steps.
//!
//! - **Extract** turns input keying material and an optional salt into a
//!   pseudorandom key (PRK) of exactly one digest length.
//! - **Expand** stretches a PRK and optional context info into up to
//!   `255 * digest length` bytes of output keying material.
//!
//! The steps are exposed separately because the guest API models them as
//! two algorithms chained through a derived key.

use openssl::pkey::Id;
use openssl::pkey_ctx::HkdfMode;
use openssl::pkey_ctx::PkeyCtx;
use zeroize::Zeroizing;

use super::*;

/// Largest number of digest blocks HKDF-Expand can produce.
const HKDF_MAX_BLOCKS: usize = 255;

/// Maximum HKDF-Expand output for the given digest.
pub fn hkdf_max_output_len(kind: HashKind) -> usize {
    HKDF_MAX_BLOCKS * kind.size()
}

fn hkdf_ctx(
    kind: HashKind,
    mode: HkdfMode,
    key: &[u8],
) -> Result<PkeyCtx<()>, CryptoError> {
    let mut ctx = PkeyCtx::new_id(Id::HKDF).map_err(|_| CryptoError::HkdfSetupError)?;
    ctx.derive_init().map_err(|_| CryptoError::HkdfSetupError)?;
    ctx.set_hkdf_md(kind.md()?)
        .map_err(|_| CryptoError::HkdfSetupError)?;
    ctx.set_hkdf_mode(mode)
        .map_err(|_| CryptoError::HkdfSetupError)?;
    ctx.set_hkdf_key(key)
        .map_err(|_| CryptoError::HkdfSetupError)?;
    Ok(ctx)
}

/// HKDF-Extract: derives a PRK from `ikm` and `salt`.
///
/// An empty salt is treated as a string of zero bytes of digest length.
pub fn hkdf_extract(
    kind: HashKind,
    ikm: &[u8],
    salt: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let mut ctx = hkdf_ctx(kind, HkdfMode::EXTRACT_ONLY, ikm)?;
    if !salt.is_empty() {
        ctx.set_hkdf_salt(salt)
            .map_err(|_| CryptoError::HkdfSetupError)?;
    }

    let mut prk = Zeroizing::new(vec![0u8; kind.size()]);
    let len = ctx
        .derive(Some(&mut prk))
        .map_err(|_| CryptoError::HkdfDeriveError)?;
    prk.truncate(len);
    Ok(prk)
}

/// HKDF-Expand: fills `out` with keying material derived from `prk` and `info`.
///
/// # Errors
///
/// * [`CryptoError::HkdfInvalidLength`] - `out` is empty or longer than
///   [`hkdf_max_output_len`]
pub fn hkdf_expand(
    kind: HashKind,
    prk: &[u8],
    info: &[u8],
    out: &mut [u8],
) -> Result<(), CryptoError> {
    if out.is_empty() || out.len() > hkdf_max_output_len(kind) {
        return Err(CryptoError::HkdfInvalidLength);
    }

    let mut ctx = hkdf_ctx(kind, HkdfMode::EXPAND_ONLY, prk)?;
    if !info.is_empty() {
        ctx.add_hkdf_info(info)
            .map_err(|_| CryptoError::HkdfSetupError)?;
    }

    let len = ctx
        .derive(Some(out))
        .map_err(|_| CryptoError::HkdfDeriveError)?;
    if len != out.len() {
        return Err(CryptoError::HkdfDeriveError);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    // RFC 5869 test case 1
    const IKM: [u8; 22] = [0x0b; 22];
    const SALT: &str = "000102030405060708090a0b0c";
    const INFO: &str = "f0f1f2f3f4f5f6f7f8f9";
    const PRK: &str = "077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5";
    const OKM: &str =
        "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865";

    #[test]
    fn test_hkdf_extract_rfc5869() {
        let salt = hex::decode(SALT).unwrap();
        let prk = hkdf_extract(HashKind::Sha256, &IKM, &salt).expect("extract");
        assert_eq!(hex::encode(&*prk), PRK);
    }

    #[test]
    fn test_hkdf_expand_rfc5869() {
        let prk = hex::decode(PRK).unwrap();
        let info = hex::decode(INFO).unwrap();
        let mut okm = [0u8; 42];
        hkdf_expand(HashKind::Sha256, &prk, &info, &mut okm).expect("expand");
        assert_eq!(hex::encode(okm), OKM);
    }

    #[test]
    fn test_hkdf_expand_length_limits() {
        let prk = hex::decode(PRK).unwrap();
        let mut too_long = vec![0u8; hkdf_max_output_len(HashKind::Sha256) + 1];
        assert_eq!(
            hkdf_expand(HashKind::Sha256, &prk, &[], &mut too_long),
            Err(CryptoError::HkdfInvalidLength)
        );
        assert_eq!(
            hkdf_expand(HashKind::Sha256, &prk, &[], &mut []),
            Err(CryptoError::HkdfInvalidLength)
        );

        let mut max = vec![0u8; hkdf_max_output_len(HashKind::Sha256)];
        assert!(hkdf_expand(HashKind::Sha256, &prk, &[], &mut max).is_ok());
    }
}
