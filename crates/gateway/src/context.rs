use mfs_auth::{Identity, Role};
use mfs_core::SubjectId;

/// Session context for a forwarded request.
///
/// Inserted into request extensions by the access gate only after the
/// credential verified and the route permitted the role. Handlers read
/// identity from here, never from client-supplied headers.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    identity: Identity,
    token: String,
}

impl SessionContext {
    pub fn new(identity: Identity, token: String) -> Self {
        Self { identity, token }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.identity.subject_id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    /// Raw credential, forwarded to the backend as a bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl core::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionContext")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
