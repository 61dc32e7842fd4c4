use jiff::SignedDuration;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::errors::{Error, HttpError};

use super::{Credentials, Token, TokenEnvelope};

const USER_AGENT: &str = concat!("incognia-api-rust/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(deserialize_with = "deserialize_expires_in")]
    expires_in: i64,
}

/// Accepts `30`, `30.0` or `"30"`.
fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(secs) => Ok(secs),
        Raw::Float(secs) if secs.is_finite() => Ok(secs.trunc() as i64),
        Raw::Float(secs) => Err(serde::de::Error::custom(format!(
            "expires_in is not a finite number: {}",
            secs
        ))),
        Raw::Text(text) => text.trim().parse::<i64>().map_err(|e| {
            serde::de::Error::custom(format!("expires_in '{}' is not an integer: {}", text, e))
        }),
    }
}

/// Issues client-credentials requests against the token endpoint.
#[derive(Clone, Debug)]
pub struct TokenFetcher {
    http_client: Client,
    token_url: Url,
    credentials: Credentials,
}

impl TokenFetcher {
    pub fn new(token_url: Url, credentials: Credentials) -> Result<Self, Error> {
        let http_client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http_client, token_url, credentials))
    }

    pub fn with_client(http_client: Client, token_url: Url, credentials: Credentials) -> Self {
        Self {
            http_client,
            token_url,
            credentials,
        }
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Requests a new token. The expiry is measured from `clock` once the response arrives.
    pub async fn fetch(&self, clock: &dyn Clock) -> Result<TokenEnvelope, Error> {
        // Credentials travel only in this header; reqwest's basic_auth would append a
        // second Authorization header in the standard alphabet.
        let resp = self
            .http_client
            .post(self.token_url.clone())
            .header(AUTHORIZATION, self.credentials.basic_authorization())
            .send()
            .await
            .map_err(HttpError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(
                "token request failed: url='{}' status={} body='{}'",
                self.token_url, status, body
            );
            return Err(HttpError::Status { status, body }.into());
        }

        let body = resp.bytes().await.map_err(HttpError::Transport)?;
        let parsed: TokenResponse = serde_json::from_slice(&body)?;
        let fetched_at = clock.now();
        let expires_at = fetched_at
            .checked_add(SignedDuration::from_secs(parsed.expires_in))
            .map_err(|e| {
                Error::TokenResponse(format!(
                    "expires_in {} out of range: {}",
                    parsed.expires_in, e
                ))
            })?;
        debug!(
            "token acquired: type='{}' expires_in={}s",
            parsed.token_type, parsed.expires_in
        );

        Ok(TokenEnvelope::new(
            Token::new(parsed.access_token, parsed.token_type),
            expires_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<TokenResponse, serde_json::Error> {
        serde_json::from_str(body)
    }

    #[test]
    fn expires_in_accepts_integer_float_and_numeric_string() {
        let int = parse(r#"{"access_token":"a","token_type":"Bearer","expires_in":30}"#).unwrap();
        assert_eq!(int.expires_in, 30);
        let float =
            parse(r#"{"access_token":"a","token_type":"Bearer","expires_in":30.9}"#).unwrap();
        assert_eq!(float.expires_in, 30);
        let text =
            parse(r#"{"access_token":"a","token_type":"Bearer","expires_in":" 45 "}"#).unwrap();
        assert_eq!(text.expires_in, 45);
    }

    #[test]
    fn missing_or_garbled_fields_are_errors() {
        assert!(parse(r#"{"access_token":"a","token_type":"Bearer"}"#).is_err());
        assert!(parse(r#"{"token_type":"Bearer","expires_in":30}"#).is_err());
        assert!(
            parse(r#"{"access_token":"a","token_type":"Bearer","expires_in":"soon"}"#).is_err()
        );
    }
}
