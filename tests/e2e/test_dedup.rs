use crate::e2e::helpers;

use futures::future::join_all;
use helpers::mocks::MockTtsGateway;
use helpers::{fixtures, TestContext};
use speechswap::{EncodedAudio, TtsService};
use std::sync::Arc;

#[tokio::test]
async fn it_should_call_the_provider_once_for_concurrent_requests() {
    let ctx = TestContext::new(MockTtsGateway::gated(b"mp3 bytes"))
        .await
        .unwrap();
    let lang = fixtures::language("vie-vn");
    let profile = fixtures::profile_for("vie-vn");

    // All three requests line up behind the gate before any can finish.
    let resolves = (0..3).map(|_| ctx.tts.resolve("tôi đi học", &lang, &profile));
    let (results, _) = tokio::join!(join_all(resolves), async {
        ctx.gateway.release(3);
    });

    assert_eq!(ctx.gateway.calls(), 1);
    assert_eq!(ctx.gateway.texts(), vec!["tôi đi học"]);

    let expected = Some(EncodedAudio::encode(b"mp3 bytes"));
    for result in results {
        assert_eq!(result.unwrap(), expected);
    }
}

#[tokio::test]
async fn it_should_share_one_failure_with_every_concurrent_caller() {
    let ctx = TestContext::new(MockTtsGateway::gated(b"unused"))
        .await
        .unwrap();
    ctx.gateway.push_response(Err("provider exploded".to_string()));
    let lang = fixtures::language("vie-vn");
    let profile = fixtures::profile_for("vie-vn");

    let resolves = (0..3).map(|_| ctx.tts.resolve("em bé ngủ", &lang, &profile));
    let (results, _) = tokio::join!(join_all(resolves), async {
        ctx.gateway.release(3);
    });

    // One failed call, shared with everyone who was waiting on it.
    assert_eq!(ctx.gateway.calls(), 1);
    for result in results {
        let error = result.unwrap_err();
        assert!(error.to_string().contains("provider exploded"));
    }
}

#[tokio::test]
async fn it_should_not_remember_failures() {
    let ctx = TestContext::new(MockTtsGateway::returning(b"mp3 bytes"))
        .await
        .unwrap();
    ctx.gateway.push_response(Err("transient".to_string()));
    let lang = fixtures::language("vie-vn");
    let profile = fixtures::profile_for("vie-vn");

    let first = ctx.tts.resolve("tôi đi học", &lang, &profile).await;
    assert!(first.is_err());

    // The next attempt starts over and reaches the provider again.
    let second = ctx
        .tts
        .resolve("tôi đi học", &lang, &profile)
        .await
        .unwrap();
    assert_eq!(second, Some(EncodedAudio::encode(b"mp3 bytes")));
    assert_eq!(ctx.gateway.calls(), 2);
}

#[tokio::test]
async fn it_should_not_call_the_provider_again_for_a_repeated_sentence() {
    let ctx = TestContext::new(MockTtsGateway::returning(b"mp3 bytes"))
        .await
        .unwrap();
    let lang = fixtures::language("vie-vn");
    let profile = fixtures::profile_for("vie-vn");

    let first = ctx
        .tts
        .resolve("tôi đi học", &lang, &profile)
        .await
        .unwrap();
    let second = ctx
        .tts
        .resolve("tôi đi học", &lang, &profile)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(ctx.gateway.calls(), 1);
}

#[tokio::test]
async fn it_should_serve_repeats_from_the_persistent_cache() {
    let ctx = TestContext::new(MockTtsGateway::returning(b"mp3 bytes"))
        .await
        .unwrap();
    let lang = fixtures::language("vie-vn");
    let profile = fixtures::profile_for("vie-vn");

    let first = ctx
        .tts
        .resolve("tôi đi học", &lang, &profile)
        .await
        .unwrap();
    assert_eq!(ctx.gateway.calls(), 1);

    // A fresh service over the same database, as after a restart.
    let fresh_gateway = Arc::new(MockTtsGateway::failing("must not be called"));
    let fresh = TtsService::new(ctx.cache.clone(), fresh_gateway.clone(), 0);

    let replay = fresh.resolve("tôi đi học", &lang, &profile).await.unwrap();
    assert_eq!(replay, first);
    assert_eq!(fresh_gateway.calls(), 0);

    // Casing differences still hit the same row.
    let recased = fresh.resolve("TÔI ĐI HỌC", &lang, &profile).await.unwrap();
    assert_eq!(recased, first);
    assert_eq!(fresh_gateway.calls(), 0);
}

#[tokio::test]
async fn it_should_remember_when_the_provider_produced_no_audio() {
    let ctx = TestContext::new(MockTtsGateway::silent()).await.unwrap();
    let lang = fixtures::language("vie-vn");
    let profile = fixtures::profile_for("vie-vn");

    assert_eq!(
        ctx.tts.resolve("em bé ngủ", &lang, &profile).await.unwrap(),
        None
    );
    assert_eq!(
        ctx.tts.resolve("em bé ngủ", &lang, &profile).await.unwrap(),
        None
    );
    assert_eq!(ctx.gateway.calls(), 1);

    // The no-audio outcome is persisted, not just held in memory.
    let entry = ctx
        .cache
        .lookup("em bé ngủ", &lang)
        .await
        .expect("row exists");
    assert_eq!(entry.audio, None);

    let fresh_gateway = Arc::new(MockTtsGateway::failing("must not be called"));
    let fresh = TtsService::new(ctx.cache.clone(), fresh_gateway.clone(), 0);
    assert_eq!(
        fresh.resolve("em bé ngủ", &lang, &profile).await.unwrap(),
        None
    );
    assert_eq!(fresh_gateway.calls(), 0);
}
