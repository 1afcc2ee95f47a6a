// Copyright (C) Microsoft Corporation. All rights reserved.

//! Guest Crypto Services
//!
//! Handle-indexed cryptographic services for sandboxed guests. A guest only
//! ever holds opaque [`Handle`]s; every key, state, tag, signature and output
//! buffer lives in a [`CryptoCtx`] handle table and is zeroized when closed.
//!
//! Symmetric algorithms (hashes, HMAC, HKDF, AEAD) run through one state
//! machine whose legal operations depend on the algorithm category.
//! Signature algorithms (ECDSA, Ed25519, RSA) expose key pairs, public and
//! secret keys, signatures, and streaming sign and verify states.

mod array_output;
mod config;
mod context;
mod error;
mod handle_table;
mod options;
mod signatures;
mod symmetric;

use array_output::ArrayOutput;
pub use config::CryptoCtxConfig;
pub use context::CryptoCtx;
pub use error::abi_boundary;
pub use error::CryptoErrno;
pub use error::CryptoResult;
pub use error::Errno;
pub use handle_table::Handle;
use handle_table::HandleTable;
use handle_table::HandleType;
pub use options::AlgorithmType;
use options::Options;
use options::SymmetricOptions;
pub use signatures::KeyEncoding;
pub use signatures::SignatureAlgorithm;
pub use signatures::SignatureEncoding;
use signatures::Signature;
use signatures::SignatureKeyPair;
use signatures::SignaturePublicKey;
use signatures::SignatureSecretKey;
use signatures::SignatureState;
use signatures::VerificationState;
pub use symmetric::SymmetricAlgorithm;
use symmetric::SymmetricKey;
use symmetric::SymmetricState;
use symmetric::SymmetricTag;
