//! Session credential verification (signature + expiry).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{SessionClaims, validate_claims};

/// The one error a caller of [`CredentialVerifier`] ever sees.
///
/// Structural, cryptographic and time failures all collapse into this; the
/// reason is kept for logs only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid session credential: {reason}")]
pub struct VerificationError {
    reason: String,
}

impl VerificationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Failure to load the verification key at startup.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("verification key is empty")]
    Empty,

    #[error("invalid RSA public key: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Verifies a raw session token and returns its claims.
///
/// Implementations must be pure per call: no I/O, no retries, no caching of
/// per-token state.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, VerificationError>;
}

/// RS256 verifier over a process-wide public key.
#[derive(Clone)]
pub struct Rs256Verifier {
    key: DecodingKey,
    validation: Validation,
}

impl Rs256Verifier {
    /// Parse a PEM encoded RSA public key (SPKI or PKCS#1).
    pub fn from_pem(pem: &[u8]) -> Result<Self, KeyError> {
        if pem.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(KeyError::Empty);
        }
        let key = DecodingKey::from_rsa_pem(pem)?;
        Ok(Self {
            key,
            validation: Self::validation(),
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        // Time claims are checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl core::fmt::Debug for Rs256Verifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rs256Verifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier for Rs256Verifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, VerificationError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(|e| VerificationError::new(e.to_string()))?;

        validate_claims(&data.claims, now).map_err(|e| VerificationError::new(e.to_string()))?;

        Ok(data.claims)
    }
}
