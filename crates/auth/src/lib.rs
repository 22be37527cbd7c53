//! `mfs-auth`: edge access gate logic (verify, classify, decide).
//!
//! No HTTP types here: the gateway feeds it a raw
//! token and a path and acts on the returned [`Decision`].

pub mod claims;
pub mod decision;
pub mod principal;
pub mod roles;
pub mod routes;
pub mod verifier;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use decision::{Decision, Evidence, GateError, RedirectReason, RedirectTarget, decide};
pub use principal::{IDENTITY_HEADERS, Identity, ROLE_HEADER, SUBJECT_HEADER};
pub use roles::{Role, RoleSet, UnknownRole};
pub use routes::{AccessRule, RouteEntry, RouteTable};
pub use verifier::{CredentialVerifier, KeyError, Rs256Verifier, VerificationError};
