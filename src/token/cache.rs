use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::endpoints::Endpoints;
use crate::errors::Error;
use crate::telemetry::refresh::{RefreshReason, RefreshTelemetry};

use super::{Credentials, RefreshPolicy, Token, TokenEnvelope, TokenFetcher};

/// Holds the current bearer token and replaces it shortly before it expires.
///
/// Construction fetches a token eagerly. [`TokenCache::get`] returns the cached token
/// while it is outside the refresh skew window and fetches a new one otherwise.
/// Concurrent callers that find the token stale share a single refresh.
pub struct TokenCache {
    fetcher: TokenFetcher,
    policy: RefreshPolicy,
    clock: Arc<dyn Clock>,
    current: RwLock<TokenEnvelope>,
    refresh_lock: Mutex<()>,
}

impl TokenCache {
    /// Builds a cache against the default endpoint and fetches the first token.
    pub async fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, Error> {
        let credentials = Credentials::new(client_id, client_secret);
        let fetcher = TokenFetcher::new(Endpoints::default().token()?, credentials)?;
        Self::with_fetcher(fetcher, RefreshPolicy::default(), Arc::new(SystemClock)).await
    }

    pub async fn from_config(config: Config) -> Result<Self, Error> {
        Self::from_config_with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn from_config_with_clock(
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        config.validate()?;
        let token_url = config.endpoints()?.token()?;
        let policy = config.refresh_policy()?;
        let fetcher = TokenFetcher::new(
            token_url,
            Credentials::new(config.client_id, config.client_secret),
        )?;
        Self::with_fetcher(fetcher, policy, clock).await
    }

    pub async fn with_fetcher(
        fetcher: TokenFetcher,
        policy: RefreshPolicy,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let initial = refresh(&fetcher, clock.as_ref(), RefreshReason::Initial).await?;
        Ok(Self {
            fetcher,
            policy,
            clock,
            current: RwLock::new(initial),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Returns a token that is not within the skew window of its expiry, fetching a new
    /// one first when needed. On a failed fetch the cached pair is left untouched.
    pub async fn get(&self) -> Result<Token, Error> {
        {
            let current = self.current.read().await;
            if !self.is_stale(&current) {
                return Ok(current.token().clone());
            }
        }

        // Only one refresh runs at a time; late arrivals reuse its result.
        let _refreshing = self.refresh_lock.lock().await;
        {
            let current = self.current.read().await;
            if !self.is_stale(&current) {
                debug!("token refreshed by a concurrent caller");
                return Ok(current.token().clone());
            }
        }

        let fresh = refresh(&self.fetcher, self.clock.as_ref(), RefreshReason::Expired).await?;
        let token = fresh.token().clone();
        *self.current.write().await = fresh;
        Ok(token)
    }

    /// `Authorization` header value for API calls made with the current token.
    pub async fn authorization_value(&self) -> Result<String, Error> {
        Ok(self.get().await?.authorization_value())
    }

    pub async fn is_expired(&self) -> bool {
        let current = self.current.read().await;
        self.is_stale(&current)
    }

    /// The cached (token, expiry) pair, without refreshing.
    pub async fn snapshot(&self) -> TokenEnvelope {
        self.current.read().await.clone()
    }

    pub async fn expires_at(&self) -> Timestamp {
        self.current.read().await.expires_at()
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn credentials(&self) -> &Credentials {
        self.fetcher.credentials()
    }

    fn is_stale(&self, envelope: &TokenEnvelope) -> bool {
        self.policy.is_expired(envelope.expires_at(), self.clock.now())
    }
}

async fn refresh(
    fetcher: &TokenFetcher,
    clock: &dyn Clock,
    reason: RefreshReason,
) -> Result<TokenEnvelope, Error> {
    let telemetry = RefreshTelemetry::new(reason);
    telemetry.emit_start(clock.now());
    match fetcher.fetch(clock).await {
        Ok(envelope) => {
            telemetry.emit_success(&envelope, clock.now());
            Ok(envelope)
        }
        Err(err) => {
            telemetry.emit_failure(&err, clock.now());
            Err(err)
        }
    }
}
