//! Access decision engine.
//!
//! Pure function of (credential evidence, route rule) to exactly one outcome.
//! Every verification failure is the same `InvalidToken` evidence, so the
//! engine fails closed by construction.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{AccessRule, CredentialVerifier, Identity, VerificationError};

/// The two fixed redirect destinations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Guest entry / login page.
    GuestEntry,
    /// Default authenticated landing page.
    Landing,
}

impl RedirectTarget {
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::GuestEntry => "/",
            RedirectTarget::Landing => "/dashboard",
        }
    }
}

/// Why the gate refused to forward a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("missing session credential")]
    MissingCredential,

    #[error("invalid session credential")]
    InvalidCredential,

    #[error("role not permitted for route")]
    UnauthorizedForRoute,
}

/// What the gate knows about the caller after looking at the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    NoToken,
    InvalidToken(VerificationError),
    ValidToken(Identity),
}

impl Evidence {
    /// Verify an optional raw token. An empty token is treated as absent.
    pub fn evaluate(
        token: Option<&str>,
        verifier: &dyn CredentialVerifier,
        now: DateTime<Utc>,
    ) -> Self {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            None => Evidence::NoToken,
            Some(token) => match verifier.verify(token, now) {
                Ok(claims) => Evidence::ValidToken(claims.identity()),
                Err(e) => Evidence::InvalidToken(e),
            },
        }
    }
}

/// Terminal outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Forward unannotated (guest on a public route).
    Allow,
    /// Forward with verified identity attached.
    Forward(Identity),
    /// Redirect without touching the stored credential.
    Redirect {
        to: RedirectTarget,
        reason: RedirectReason,
    },
    /// Remove the stored credential and redirect to the guest entry.
    ClearSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    Denied(GateError),
    AlreadyAuthenticated,
}

impl Decision {
    /// Redirect destination, if this decision redirects.
    pub fn redirect_target(&self) -> Option<RedirectTarget> {
        match self {
            Decision::Allow | Decision::Forward(_) => None,
            Decision::Redirect { to, .. } => Some(*to),
            Decision::ClearSession => Some(RedirectTarget::GuestEntry),
        }
    }

    pub fn clears_session(&self) -> bool {
        matches!(self, Decision::ClearSession)
    }

    /// The gate error this decision handles locally, if any.
    pub fn gate_error(&self) -> Option<GateError> {
        match self {
            Decision::ClearSession => Some(GateError::InvalidCredential),
            Decision::Redirect {
                reason: RedirectReason::Denied(e),
                ..
            } => Some(e.clone()),
            _ => None,
        }
    }
}

/// Decide the outcome for a request.
pub fn decide(evidence: &Evidence, rule: AccessRule) -> Decision {
    match evidence {
        Evidence::InvalidToken(_) => Decision::ClearSession,
        Evidence::NoToken => {
            if rule.requires_credential() {
                Decision::Redirect {
                    to: RedirectTarget::GuestEntry,
                    reason: RedirectReason::Denied(GateError::MissingCredential),
                }
            } else {
                Decision::Allow
            }
        }
        Evidence::ValidToken(identity) => match rule {
            AccessRule::Public => Decision::Redirect {
                to: RedirectTarget::Landing,
                reason: RedirectReason::AlreadyAuthenticated,
            },
            rule if rule.permits(identity.role) => Decision::Forward(identity.clone()),
            _ => Decision::Redirect {
                to: RedirectTarget::Landing,
                reason: RedirectReason::Denied(GateError::UnauthorizedForRoute),
            },
        },
    }
}
