use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Bearer credential handed out by the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
        }
    }

    /// Value for the Authorization header of subsequent API calls, e.g. `Bearer abc`.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// A token together with the instant it stops being valid.
///
/// The two are only ever replaced together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEnvelope {
    token: Token,
    expires_at: Timestamp,
}

impl TokenEnvelope {
    pub fn new(token: Token, expires_at: Timestamp) -> Self {
        Self { token, expires_at }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Time left until expiry relative to `now`; negative once expired.
    pub fn remaining(&self, now: Timestamp) -> SignedDuration {
        self.expires_at.duration_since(now)
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}
