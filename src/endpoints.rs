use reqwest::Url;

use crate::errors::Error;

pub const DEFAULT_API_URL: &str = "https://api.incognia.com/api";

const TOKEN_PATH: &str = "v2/token";

/// Resolves the fixed endpoint URLs from an API base URL.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(api_url: impl AsRef<str>) -> Result<Self, Error> {
        let api_url = api_url.as_ref().trim();
        if api_url.is_empty() {
            return Err(Error::Config("API URL must not be empty".into()));
        }
        let base = if api_url.contains("://") {
            api_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", api_url.trim_end_matches('/'))
        };
        // Validate before any network call is attempted.
        Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", base, e)))?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn token(&self) -> Result<Url, Error> {
        let url = format!("{}/{}", self.base, TOKEN_PATH);
        Url::parse(&url).map_err(|e| Error::Config(format!("Invalid token URL '{}': {}", url, e)))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DEFAULT_API_URL.to_string(),
        }
    }
}
