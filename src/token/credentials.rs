use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE};

/// Client id/secret pair used against the token endpoint. Never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// `Basic <base64url(id:secret)>`, padded.
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", URL_SAFE.encode(pair))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_authorization_uses_padded_base64url() {
        let credentials = Credentials::new("client", "secret");
        // "client:secret"
        assert_eq!(
            credentials.basic_authorization(),
            "Basic Y2xpZW50OnNlY3JldA=="
        );
    }

    #[test]
    fn basic_authorization_uses_url_safe_alphabet() {
        // Standard base64 of "??>:??" is "Pz8+Oj8/"; the url-safe form swaps '+' and '/'.
        let credentials = Credentials::new("??>", "??");
        assert_eq!(credentials.basic_authorization(), "Basic Pz8-Oj8_");
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", Credentials::new("client", "s3cr3t"));
        assert!(rendered.contains("client"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
