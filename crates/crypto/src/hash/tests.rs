// Copyright (C) Microsoft Corporation. All rights reserved.

use test_log::test;

use super::*;

#[test]
fn test_sha256_one_shot() {
    let digest = digest(HashKind::Sha256, b"data").expect("sha256");
    assert_eq!(
        hex::encode(digest),
        "3a6eb0790f39ac87c94f3856b2dd2c5d110e6811602261a9a923d3bb23adc8b7"
    );
}

#[test]
fn test_sha256_streaming_matches_one_shot() {
    const DATA: [u8; 1024] = [1u8; 1024];

    let mut ctx = HashContext::new(HashKind::Sha256).expect("init sha256");
    ctx.update(&DATA[..700]).expect("update part1");
    ctx.update(&DATA[700..]).expect("update part2");
    let streamed = ctx.finish().expect("finish");

    assert_eq!(
        hex::encode(streamed),
        "5a648d8015900d89664e00e125df179636301a2d8fa191c1aa2bd9358ea53a69"
    );
}

#[test]
fn test_snapshot_keeps_context_open() {
    let mut ctx = HashContext::new(HashKind::Sha256).expect("init");
    ctx.update(b"data").expect("update");

    let first = ctx.snapshot().expect("snapshot");
    assert_eq!(first, ctx.snapshot().expect("snapshot again"));

    ctx.update(b"more_data").expect("update");
    assert_eq!(
        hex::encode(ctx.snapshot().expect("snapshot")),
        "13c40eec22541a155e172010c7fd6ef654e4e138a0c20923f9a91062a27f57b6"
    );
}

#[test]
fn test_sha512_256_vectors() {
    let mut ctx = HashContext::new(HashKind::Sha512_256).expect("init sha512/256");
    ctx.update(b"data").expect("update");
    assert_eq!(
        hex::encode(ctx.snapshot().expect("snapshot")),
        "99902eaf90e92264667843cde66675ed94caa361634bad57874642aa364aa968"
    );
    ctx.update(b"more_data").expect("update");
    assert_eq!(
        hex::encode(ctx.finish().expect("finish")),
        "d1def71920a44d8b6c83b2eaa99379a16047cc82cec8d80689fbf02fbd062481"
    );
}

#[test]
fn test_sha512_vector() {
    let digest = digest(HashKind::Sha512, b"data").expect("sha512");
    assert_eq!(
        hex::encode(digest),
        "77c7ce9a5d86bb386d443bb96390faa120633158699c8844c30b13ab0bf92760b7e4416aea397db91b4ac0e5dd56b8ef7e4b066162ab1fdc088319ce6defc876"
    );
}

#[test]
fn test_digest_sizes() {
    for kind in [
        HashKind::Sha256,
        HashKind::Sha384,
        HashKind::Sha512,
        HashKind::Sha512_256,
    ] {
        let digest = digest(kind, b"").expect("digest");
        assert_eq!(digest.len(), kind.size(), "{kind:?}");
    }
}
