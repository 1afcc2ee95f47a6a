// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

/// Algorithm category an options object or asymmetric call belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    /// Signature algorithms.
    Signatures,
    /// Symmetric algorithms.
    Symmetric,
    /// Key exchange algorithms.
    KeyExchange,
}

/// Named parameters consulted when opening a state or generating a key.
#[derive(Debug, Clone)]
pub(crate) enum Options {
    Symmetric(SymmetricOptions),
    Signatures,
    KeyExchange,
}

impl Options {
    pub(crate) fn new(alg_type: AlgorithmType) -> Self {
        match alg_type {
            AlgorithmType::Symmetric => Options::Symmetric(SymmetricOptions::default()),
            AlgorithmType::Signatures => Options::Signatures,
            AlgorithmType::KeyExchange => Options::KeyExchange,
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: &[u8]) -> CryptoResult<()> {
        match self {
            Options::Symmetric(options) => options.set(name, value),
            Options::Signatures | Options::KeyExchange => Err(CryptoErrno::UnsupportedOption),
        }
    }

    pub(crate) fn set_u64(&mut self, name: &str, value: u64) -> CryptoResult<()> {
        match self {
            Options::Symmetric(options) => options.set_u64(name, value),
            Options::Signatures | Options::KeyExchange => Err(CryptoErrno::UnsupportedOption),
        }
    }

    pub(crate) fn into_symmetric(self) -> CryptoResult<SymmetricOptions> {
        match self {
            Options::Symmetric(options) => Ok(options),
            Options::Signatures | Options::KeyExchange => Err(CryptoErrno::InvalidHandle),
        }
    }

    pub(crate) fn expect_type(&self, alg_type: AlgorithmType) -> CryptoResult<()> {
        let actual = match self {
            Options::Symmetric(_) => AlgorithmType::Symmetric,
            Options::Signatures => AlgorithmType::Signatures,
            Options::KeyExchange => AlgorithmType::KeyExchange,
        };
        if actual != alg_type {
            return Err(CryptoErrno::InvalidHandle);
        }
        Ok(())
    }
}

/// Options accepted by symmetric algorithms.
#[derive(Debug, Clone, Default)]
pub(crate) struct SymmetricOptions {
    context: Option<Vec<u8>>,
    salt: Option<Vec<u8>>,
    nonce: Option<Vec<u8>>,
    memory_limit: Option<u64>,
    ops_limit: Option<u64>,
    parallelism: Option<u64>,
}

impl SymmetricOptions {
    fn bytes_slot(&mut self, name: &str) -> CryptoResult<&mut Option<Vec<u8>>> {
        match name.to_ascii_lowercase().as_str() {
            "context" => Ok(&mut self.context),
            "salt" => Ok(&mut self.salt),
            "nonce" => Ok(&mut self.nonce),
            _ => Err(CryptoErrno::UnsupportedOption),
        }
    }

    fn u64_slot(&mut self, name: &str) -> CryptoResult<&mut Option<u64>> {
        match name.to_ascii_lowercase().as_str() {
            "memory_limit" => Ok(&mut self.memory_limit),
            "ops_limit" => Ok(&mut self.ops_limit),
            "parallelism" => Ok(&mut self.parallelism),
            _ => Err(CryptoErrno::UnsupportedOption),
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: &[u8]) -> CryptoResult<()> {
        *self.bytes_slot(name)? = Some(value.to_vec());
        Ok(())
    }

    pub(crate) fn set_u64(&mut self, name: &str, value: u64) -> CryptoResult<()> {
        *self.u64_slot(name)? = Some(value);
        Ok(())
    }

    pub(crate) fn nonce(&self) -> Option<&[u8]> {
        self.nonce.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_options() {
        let mut options = Options::new(AlgorithmType::Symmetric);
        options.set("nonce", &[1, 2, 3]).unwrap();
        options.set("nonce", &[4, 5]).unwrap();
        options.set("salt", b"salt").unwrap();
        options.set_u64("ops_limit", 3).unwrap();

        assert_eq!(
            options.set("iterations", &[0]),
            Err(CryptoErrno::UnsupportedOption)
        );
        assert_eq!(
            options.set_u64("nonce", 1),
            Err(CryptoErrno::UnsupportedOption)
        );

        let symmetric = options.into_symmetric().unwrap();
        assert_eq!(symmetric.nonce(), Some(&[4u8, 5][..]));
    }

    #[test]
    fn test_signature_options_accept_nothing() {
        let mut options = Options::new(AlgorithmType::Signatures);
        assert_eq!(
            options.set("nonce", &[0]),
            Err(CryptoErrno::UnsupportedOption)
        );
        assert_eq!(
            options.set_u64("ops_limit", 1),
            Err(CryptoErrno::UnsupportedOption)
        );
        assert!(options.expect_type(AlgorithmType::Signatures).is_ok());
        assert_eq!(
            options.expect_type(AlgorithmType::Symmetric),
            Err(CryptoErrno::InvalidHandle)
        );
        assert_eq!(
            options.into_symmetric().unwrap_err(),
            CryptoErrno::InvalidHandle
        );
    }
}
