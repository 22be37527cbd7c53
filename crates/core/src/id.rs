//! Strongly-typed identifiers.
//!
//! The backend owns identity; ids are opaque strings here (the backend may
//! hand out UUIDs or database object ids). The only rules enforced locally are
//! "non-empty" and "header-safe", since subject ids are propagated in request
//! headers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of an authenticated subject (consumer, agent, business, admin).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

/// Identifier of a backend resource addressed by path (agent, consumer, biller).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

fn is_header_safe(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_graphic())
}

/// Resource ids are interpolated into backend URL paths.
fn is_path_segment_safe(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

macro_rules! impl_opaque_id {
    ($t:ty, $name:literal, $check:path, $what:literal) => {
        impl $t {
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Err(ValidationError::invalid_id(format!("{}: empty", $name)));
                }
                if !$check(raw) {
                    return Err(ValidationError::invalid_id(format!("{}: {}", $name, $what)));
                }
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_opaque_id!(
    SubjectId,
    "SubjectId",
    is_header_safe,
    "contains non-printable or non-ascii characters"
);
impl_opaque_id!(
    ResourceId,
    "ResourceId",
    is_path_segment_safe,
    "only letters, digits, '-' and '_' are allowed"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_trims_and_keeps_value() {
        let id = SubjectId::parse("  64f1c0ffee  ").unwrap();
        assert_eq!(id.as_str(), "64f1c0ffee");
    }

    #[test]
    fn empty_and_unsafe_ids_are_rejected() {
        assert!(SubjectId::parse("").is_err());
        assert!(SubjectId::parse("   ").is_err());
        assert!(SubjectId::parse("abc\r\nx-user-role: Admin").is_err());
        assert!(ResourceId::parse("has space").is_err());
    }

    #[test]
    fn resource_id_must_be_a_single_path_segment() {
        assert!(ResourceId::parse("65f0a1b2c3d4e5f6a7b8c9d0").is_ok());
        assert!(ResourceId::parse("biller_01-x").is_ok());
        assert!(ResourceId::parse("../admin").is_err());
        assert!(ResourceId::parse("a?b=c").is_err());
    }

    #[test]
    fn deserialize_rejects_empty_subject() {
        let err = serde_json::from_str::<SubjectId>("\"\"");
        assert!(err.is_err());

        let ok: SubjectId = serde_json::from_str("\"user-1\"").unwrap();
        assert_eq!(ok.to_string(), "user-1");
    }
}
