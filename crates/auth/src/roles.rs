use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Caller kind carried in the session credential's `role` claim.
///
/// Closed set: a credential whose role is not one of these is invalid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Consumer,
    Agent,
    Business,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Consumer, Role::Agent, Role::Business, Role::Admin];

    /// Canonical name, as propagated in the `x-user-role` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "Consumer",
            Role::Agent => "Agent",
            Role::Business => "Business",
            Role::Admin => "Admin",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Consumer => 1 << 0,
            Role::Agent => 1 << 1,
            Role::Business => 1 << 2,
            Role::Admin => 1 << 3,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive: the backend has issued both `ADMIN` and `Admin`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A set of roles, used by route rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    pub const fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        RoleSet(iter.into_iter().fold(0, |bits, r| bits | r.bit()))
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
