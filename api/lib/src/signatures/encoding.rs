// Copyright (C) Microsoft Corporation. All rights reserved.

/// Serialization formats for signature keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEncoding {
    /// Algorithm-specific fixed-width form.
    Raw,
    /// PKCS#8 DER.
    Pkcs8,
    /// PEM armored DER.
    Pem,
    /// Uncompressed SEC1 point.
    Sec,
    /// Compressed SEC1 point.
    CompressedSec,
    /// SubjectPublicKeyInfo or SEC1 ECPrivateKey DER.
    Der,
    /// Host-local reference. Never supported.
    Local,
}

/// Serialization formats for signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureEncoding {
    Raw,
    Der,
}
