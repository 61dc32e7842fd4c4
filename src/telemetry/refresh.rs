use std::fmt;

use jiff::Timestamp;
use tracing::{Level, event};
use uuid::Uuid;

use crate::errors::Error;
use crate::token::TokenEnvelope;

/// Why a token fetch was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshReason {
    /// Eager fetch while constructing the cache.
    Initial,
    /// The cached token fell inside the skew window.
    Expired,
}

impl fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshReason::Initial => write!(f, "initial"),
            RefreshReason::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    reason: RefreshReason,
}

impl RefreshTelemetry {
    pub fn new(reason: RefreshReason) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            reason,
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn reason(&self) -> RefreshReason {
        self.reason
    }

    pub fn emit_start(&self, at: Timestamp) {
        event!(
            Level::DEBUG,
            attempt_id = %self.attempt_id,
            reason = %self.reason,
            timestamp = %at,
            "refresh.start"
        );
    }

    pub fn emit_success(&self, envelope: &TokenEnvelope, at: Timestamp) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            reason = %self.reason,
            timestamp = %at,
            token_type = %envelope.token().token_type,
            expires_at = %envelope.expires_at(),
            "refresh.success"
        );
    }

    pub fn emit_failure(&self, error: &Error, at: Timestamp) {
        let status = error.status().map(|s| s.as_u16());
        event!(
            Level::ERROR,
            attempt_id = %self.attempt_id,
            reason = %self.reason,
            timestamp = %at,
            status = ?status,
            error = %error,
            "refresh.failure"
        );
    }
}
