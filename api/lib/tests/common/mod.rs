// Copyright (C) Microsoft Corporation. All rights reserved.

#![allow(dead_code)]

use guestcrypto_api::*;

/// Drains an array output and closes it.
pub fn pull_output(ctx: &CryptoCtx, output: Handle) -> Vec<u8> {
    let len = ctx.array_output_len(output).unwrap();
    let mut buf = vec![0u8; len];
    let result = ctx.array_output_pull(output, &mut buf);
    assert_eq!(result, Ok(len));
    ctx.array_output_close(output).unwrap();
    buf
}

/// Opens a symmetric options object carrying `nonce`.
pub fn nonce_options(ctx: &CryptoCtx, nonce: &[u8]) -> Handle {
    let options = ctx.options_open(AlgorithmType::Symmetric).unwrap();
    ctx.options_set(options, "nonce", nonce).unwrap();
    options
}

/// Hashes `data` in one call and returns `len` bytes of the digest.
pub fn digest(ctx: &CryptoCtx, alg: &str, data: &[u8], len: usize) -> Vec<u8> {
    let state = ctx.symmetric_state_open(alg, None, None).unwrap();
    ctx.symmetric_state_absorb(state, data).unwrap();
    let mut out = vec![0u8; len];
    ctx.symmetric_state_squeeze(state, &mut out).unwrap();
    ctx.symmetric_state_close(state).unwrap();
    out
}
