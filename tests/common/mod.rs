#![allow(dead_code)]

use std::sync::Arc;

use incognia_api::Config;
use incognia_api::clock::ManualClock;
use jiff::Timestamp;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/v2/token";

pub fn start_time() -> Timestamp {
    Timestamp::from_second(1_700_000_000).expect("valid timestamp")
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start_time()))
}

pub fn config(server: &MockServer) -> Config {
    Config::from_values("client", "secret", Some(server.uri()), None)
}

pub fn token_body(access_token: &str, expires_in: i64) -> serde_json::Value {
    serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in,
    })
}

pub fn ok_token(access_token: &str, expires_in: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(token_body(access_token, expires_in))
}

/// Mounts a token endpoint response that answers exactly `times` requests.
pub async fn mount_token(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(response)
        .up_to_n_times(times)
        .expect(times)
        .mount(server)
        .await;
}

pub async fn token_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| {
            requests
                .iter()
                .filter(|req| req.url.path() == TOKEN_PATH)
                .count()
        })
        .unwrap_or_default()
}
