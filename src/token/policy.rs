use jiff::{SignedDuration, Timestamp};

use crate::errors::Error;

/// Seconds before the server-declared expiry at which a token counts as stale.
pub const REFRESH_SKEW_SECONDS: i64 = 10;

/// Decides when a cached token must be replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshPolicy {
    skew: SignedDuration,
}

impl RefreshPolicy {
    pub fn new(skew: SignedDuration) -> Result<Self, Error> {
        if skew.is_negative() {
            return Err(Error::Config("Refresh skew must be >= 0".into()));
        }
        Ok(Self { skew })
    }

    pub fn skew(&self) -> SignedDuration {
        self.skew
    }

    /// True once `now` is within the skew window of `expires_at`, or past it.
    pub fn is_expired(&self, expires_at: Timestamp, now: Timestamp) -> bool {
        expires_at.duration_since(now).as_secs_f64() <= self.skew.as_secs_f64()
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            skew: SignedDuration::from_secs(REFRESH_SKEW_SECONDS),
        }
    }
}
