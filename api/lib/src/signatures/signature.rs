// Copyright (C) Microsoft Corporation. All rights reserved.

use std::sync::Arc;

use super::*;

/// Immutable signature, held in the family's raw encoding.
#[derive(Debug, Clone)]
pub(crate) struct Signature {
    alg: SignatureAlgorithm,
    raw: Arc<Vec<u8>>,
}

impl Signature {
    pub(crate) fn new(alg: SignatureAlgorithm, raw: Vec<u8>) -> Self {
        Self {
            alg,
            raw: Arc::new(raw),
        }
    }

    pub(crate) fn import(
        alg: SignatureAlgorithm,
        encoded: &[u8],
        encoding: SignatureEncoding,
    ) -> CryptoResult<Self> {
        let raw = match alg.family() {
            SignatureFamily::Ecdsa(curve) => ecdsa::import_signature(curve, encoded, encoding)?,
            SignatureFamily::Ed25519 => eddsa::import_signature(encoded, encoding)?,
            SignatureFamily::Rsa(scheme) => rsa::import_signature(scheme, encoded, encoding)?,
        };
        Ok(Self::new(alg, raw))
    }

    pub(crate) fn export(&self, encoding: SignatureEncoding) -> CryptoResult<Vec<u8>> {
        match self.alg.family() {
            SignatureFamily::Ecdsa(curve) => ecdsa::export_signature(curve, &self.raw, encoding),
            SignatureFamily::Ed25519 => eddsa::export_signature(&self.raw, encoding),
            SignatureFamily::Rsa(_) => rsa::export_signature(&self.raw, encoding),
        }
    }

    pub(crate) fn alg(&self) -> SignatureAlgorithm {
        self.alg
    }

    pub(crate) fn raw(&self) -> &[u8] {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // DER encoding of r = 1, s = 2.
    const SMALL_DER: [u8; 8] = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];

    #[test]
    fn test_ecdsa_der_normalized_to_raw() {
        let signature = Signature::import(
            SignatureAlgorithm::EcdsaP256Sha256,
            &SMALL_DER,
            SignatureEncoding::Der,
        )
        .unwrap();
        let raw = signature.raw();
        assert_eq!(raw.len(), 64);
        assert_eq!(raw[31], 1);
        assert_eq!(raw[63], 2);
        assert_eq!(
            signature.export(SignatureEncoding::Der).unwrap(),
            SMALL_DER.to_vec()
        );
    }

    #[test]
    fn test_ed25519_signature_is_raw_only() {
        let signature =
            Signature::import(SignatureAlgorithm::Ed25519, &[7u8; 64], SignatureEncoding::Raw)
                .unwrap();
        assert_eq!(signature.alg(), SignatureAlgorithm::Ed25519);
        assert_eq!(
            signature.export(SignatureEncoding::Der).unwrap_err(),
            CryptoErrno::UnsupportedEncoding
        );
    }
}
