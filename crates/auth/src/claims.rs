use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mfs_core::SubjectId;

use crate::{Identity, Role};

/// Session credential claims (transport-agnostic).
///
/// This is the minimal set of claims the gate expects once a token's
/// signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject / account identifier.
    pub sub: SubjectId,

    /// Caller kind.
    pub role: Role,

    /// Issued-at, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiry, unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub.clone(), self.role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time claims against `now`.
///
/// Zero leeway: a token is expired at the exact second of `exp`.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if let Some(iat) = claims.iat {
        if claims.exp <= iat {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
        if now < iat {
            return Err(TokenValidationError::NotYetValid);
        }
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
