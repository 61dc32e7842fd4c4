//! Client configuration

use std::fmt;
use std::path::Path;

use jiff::SignedDuration;

use crate::endpoints::{DEFAULT_API_URL, Endpoints};
use crate::errors::Error;
use crate::token::{REFRESH_SKEW_SECONDS, RefreshPolicy};

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// Base API URL; the token endpoint is resolved beneath it.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Seconds before expiry at which a token is treated as stale.
    #[serde(default)]
    pub refresh_skew_secs: Option<i64>,
}

impl Config {
    pub fn from_values(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_url: Option<String>,
        refresh_skew_secs: Option<i64>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url,
            refresh_skew_secs,
        }
    }

    /// Reads a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.client_id.is_empty() {
            return Err(Error::Config("client_id must not be empty".into()));
        }
        if self.client_secret.is_empty() {
            return Err(Error::Config("client_secret must not be empty".into()));
        }
        self.endpoints()?;
        self.refresh_policy()?;
        Ok(())
    }

    pub fn endpoints(&self) -> Result<Endpoints, Error> {
        Endpoints::new(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))
    }

    pub fn refresh_policy(&self) -> Result<RefreshPolicy, Error> {
        let skew = self.refresh_skew_secs.unwrap_or(REFRESH_SKEW_SECONDS);
        RefreshPolicy::new(SignedDuration::from_secs(skew))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("refresh_skew_secs", &self.refresh_skew_secs)
            .finish()
    }
}
