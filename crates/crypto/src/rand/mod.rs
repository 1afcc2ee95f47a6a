// Copyright (C) Microsoft Corporation. All rights reserved.

//! Cryptographically secure random number generation.

use zeroize::Zeroizing;

use super::*;

/// Fills `buf` with random bytes from the library CSPRNG.
pub fn rand_bytes(buf: &mut [u8]) -> Result<(), CryptoError> {
    openssl::rand::rand_bytes(buf).map_err(|_| CryptoError::RngError)
}

/// Returns `len` fresh random bytes suitable for use as key material.
pub fn random_secret(len: usize) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let mut secret = Zeroizing::new(vec![0u8; len]);
    rand_bytes(&mut secret)?;
    Ok(secret)
}
