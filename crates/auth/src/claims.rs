//! Validated token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::UserId;

/// Claims extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl AuthClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
