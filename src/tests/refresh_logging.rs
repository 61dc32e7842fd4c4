use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use wiremock::{MockServer, ResponseTemplate};

use crate::TokenCache;
use crate::clock::ManualClock;
use crate::tests::test_support::{base_config, capture_logs, drain_logs, mount_token, token_body};

#[tokio::test]
async fn logs_success_without_leaking_token_value() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(token_body("very-secret-token", 300)),
        1,
    )
    .await;

    let (lines, guard) = capture_logs();
    let cache = TokenCache::from_config(base_config(&server.uri())).await;
    drop(guard);
    cache.expect("construction should succeed");

    let logs = drain_logs(lines);
    assert!(
        logs.iter()
            .any(|line| line.contains("refresh.success") && line.contains("reason=initial")),
        "expected refresh.success log, got: {:?}",
        logs
    );
    assert!(
        !logs.iter().any(|line| line.contains("very-secret-token")),
        "token value must not be logged: {:?}",
        logs
    );
}

#[tokio::test]
async fn logs_failed_refresh_with_status() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        ResponseTemplate::new(200).set_body_json(token_body("abc", 30)),
        1,
    )
    .await;
    mount_token(&server, ResponseTemplate::new(401), 1).await;

    let clock = Arc::new(ManualClock::new(Timestamp::now()));
    let cache = TokenCache::from_config_with_clock(base_config(&server.uri()), clock.clone())
        .await
        .expect("initial fetch succeeds");
    clock.advance(SignedDuration::from_secs(25));

    let (lines, guard) = capture_logs();
    let res = cache.get().await;
    drop(guard);
    assert!(res.is_err());

    let logs = drain_logs(lines);
    assert!(
        logs.iter().any(|line| line.contains("ERROR")
            && line.contains("refresh.failure")
            && line.contains("reason=expired")
            && line.contains("401")),
        "expected refresh.failure log mentioning 401, got: {:?}",
        logs
    );
    assert!(
        logs.iter()
            .any(|line| line.contains("WARN") && line.contains("token request failed")),
        "expected transport warning, got: {:?}",
        logs
    );
}
