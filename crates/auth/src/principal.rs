use serde::{Deserialize, Serialize};

use mfs_core::SubjectId;

use crate::Role;

/// Header carrying the verified role on a forwarded request.
pub const ROLE_HEADER: &str = "x-user-role";

/// Header carrying the verified subject id on a forwarded request.
pub const SUBJECT_HEADER: &str = "x-user-id";

/// Identity headers the gate owns. Inbound copies are always stripped.
pub const IDENTITY_HEADERS: [&str; 2] = [ROLE_HEADER, SUBJECT_HEADER];

/// Verified identity of the caller, derived from a session credential.
///
/// Only the credential verifier constructs this from a token; it lives for a
/// single request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: SubjectId,
    pub role: Role,
}

impl Identity {
    pub fn new(subject_id: SubjectId, role: Role) -> Self {
        Self { subject_id, role }
    }

    /// `(header name, header value)` pairs to attach to a forwarded request.
    pub fn header_pairs(&self) -> [(&'static str, &str); 2] {
        [
            (ROLE_HEADER, self.role.as_str()),
            (SUBJECT_HEADER, self.subject_id.as_str()),
        ]
    }
}
