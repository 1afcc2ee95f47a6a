// Copyright (C) Microsoft Corporation. All rights reserved.

mod common;

use guestcrypto_api::*;
use test_log::test;

use crate::common::*;

#[test]
fn test_sha256_streaming_snapshots() {
    let ctx = CryptoCtx::new();
    let state = ctx.symmetric_state_open("SHA-256", None, None).unwrap();

    ctx.symmetric_state_absorb(state, b"data").unwrap();
    let mut out = [0u8; 32];
    ctx.symmetric_state_squeeze(state, &mut out).unwrap();
    assert_eq!(
        hex::encode(out),
        "3a6eb0790f39ac87c94f3856b2dd2c5d110e6811602261a9a923d3bb23adc8b7"
    );

    // Squeezing does not finalize; absorption continues from the same state.
    ctx.symmetric_state_absorb(state, b"more_data").unwrap();
    let mut truncated = [0u8; 31];
    ctx.symmetric_state_squeeze(state, &mut truncated).unwrap();
    let full = hex::decode("13c40eec22541a155e172010c7fd6ef654e4e138a0c20923f9a91062a27f57b6")
        .unwrap();
    assert_eq!(&truncated[..], &full[..31]);

    ctx.symmetric_state_close(state).unwrap();
}

#[test]
fn test_sha_family_digests() {
    let ctx = CryptoCtx::new();
    assert_eq!(
        hex::encode(digest(&ctx, "SHA-384", b"abc", 48)),
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"
    );
    assert_eq!(
        hex::encode(digest(&ctx, "SHA-512", b"abc", 64)),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
    assert_eq!(
        hex::encode(digest(&ctx, "SHA-512/256", b"abc", 32)),
        "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23"
    );
}

#[test]
fn test_hash_squeeze_longer_than_digest() {
    let ctx = CryptoCtx::new();
    let state = ctx.symmetric_state_open("SHA-256", None, None).unwrap();
    let mut out = [0u8; 33];
    assert_eq!(
        ctx.symmetric_state_squeeze(state, &mut out),
        Err(CryptoErrno::InvalidLength)
    );
}

#[test]
fn test_hash_algorithm_names_are_case_insensitive() {
    let ctx = CryptoCtx::new();
    assert_eq!(
        digest(&ctx, "sha-256", b"data", 32),
        digest(&ctx, "SHA-256", b"data", 32)
    );
}

#[test]
fn test_hash_rejects_keys() {
    let ctx = CryptoCtx::new();
    assert_eq!(
        ctx.symmetric_key_generate("SHA-256", None),
        Err(CryptoErrno::KeyNotSupported)
    );

    let key = ctx.symmetric_key_generate("HMAC/SHA-256", None).unwrap();
    assert_eq!(
        ctx.symmetric_state_open("SHA-256", Some(key), None),
        Err(CryptoErrno::KeyNotSupported)
    );
}

#[test]
fn test_hash_illegal_operations() {
    let ctx = CryptoCtx::new();
    let state = ctx.symmetric_state_open("SHA-512", None, None).unwrap();

    assert_eq!(
        ctx.symmetric_state_squeeze_tag(state),
        Err(CryptoErrno::InvalidOperation)
    );
    assert_eq!(
        ctx.symmetric_state_squeeze_key(state, "AES-256-GCM"),
        Err(CryptoErrno::InvalidOperation)
    );
    assert_eq!(
        ctx.symmetric_state_encrypt(state, &mut [0u8; 16], &[]),
        Err(CryptoErrno::InvalidOperation)
    );
    assert_eq!(
        ctx.symmetric_state_decrypt(state, &mut [], &[0u8; 16]),
        Err(CryptoErrno::InvalidOperation)
    );
    assert_eq!(
        ctx.symmetric_state_max_tag_len(state),
        Err(CryptoErrno::InvalidOperation)
    );
    assert_eq!(
        ctx.symmetric_state_ratchet(state),
        Err(CryptoErrno::InvalidOperation)
    );

    // Failed operations leave the state usable.
    ctx.symmetric_state_absorb(state, b"abc").unwrap();
    let mut out = [0u8; 64];
    ctx.symmetric_state_squeeze(state, &mut out).unwrap();
}
