//! Token validation seam.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use jobboard_core::UserId;

use crate::claims::AuthClaims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("unknown or malformed token")]
    InvalidToken,

    #[error("token expired")]
    Expired,
}

/// Validates a bearer token into claims.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AuthClaims, AuthError>;
}

/// Fixed token → user mapping for tests and local development.
///
/// Tokens registered without an expiry are valid for one hour from each
/// validation; tokens with a fixed expiry are rejected once it passes.
#[derive(Debug, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, (UserId, Option<DateTime<Utc>>)>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user_id: UserId) -> Self {
        self.tokens.insert(token.into(), (user_id, None));
        self
    }

    pub fn with_token_expiring(
        mut self,
        token: impl Into<String>,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Self {
        self.tokens.insert(token.into(), (user_id, Some(expires_at)));
        self
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AuthClaims, AuthError> {
        let (user_id, expires_at) = self.tokens.get(token).ok_or(AuthError::InvalidToken)?;
        let claims = AuthClaims {
            user_id: *user_id,
            expires_at: expires_at.unwrap_or_else(|| now + Duration::hours(1)),
        };
        if claims.is_expired(now) {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_validator_maps_known_tokens() {
        let validator = StaticTokenValidator::new().with_token("alice-token", UserId::new(7));

        let claims = validator.validate("alice-token", Utc::now()).unwrap();
        assert_eq!(claims.user_id, UserId::new(7));
        assert!(!claims.is_expired(Utc::now()));

        assert_eq!(
            validator.validate("nope", Utc::now()),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let validator = StaticTokenValidator::new()
            .with_token_expiring("stale", UserId::new(7), now - Duration::minutes(5))
            .with_token_expiring("fresh", UserId::new(7), now + Duration::minutes(5));

        assert_eq!(validator.validate("stale", now), Err(AuthError::Expired));

        let claims = validator.validate("fresh", now).unwrap();
        assert_eq!(claims.expires_at, now + Duration::minutes(5));

        // The boundary instant counts as expired.
        assert_eq!(
            validator.validate("fresh", now + Duration::minutes(5)),
            Err(AuthError::Expired)
        );
    }
}
