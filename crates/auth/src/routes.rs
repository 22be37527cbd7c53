//! Route classification table.
//!
//! Static prefix → rule mapping, built once at startup and shared read-only.
//! The most specific (longest) matching prefix wins; equal-length matches
//! resolve to the first declared entry.

use crate::{Role, RoleSet};

/// Access rule attached to a path prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessRule {
    /// No credential required. Guest-only: authenticated callers are sent to
    /// the landing page.
    Public,
    /// Any valid credential.
    AuthenticatedOnly,
    /// Valid credential whose role is in the set.
    RoleRestricted(RoleSet),
    /// Valid credential whose role is NOT in the set.
    RoleExcluded(RoleSet),
}

impl AccessRule {
    pub fn requires_credential(&self) -> bool {
        !matches!(self, AccessRule::Public)
    }

    /// Whether a verified `role` may reach a route with this rule.
    pub fn permits(&self, role: Role) -> bool {
        match self {
            AccessRule::Public | AccessRule::AuthenticatedOnly => true,
            AccessRule::RoleRestricted(allowed) => allowed.contains(role),
            AccessRule::RoleExcluded(excluded) => !excluded.contains(role),
        }
    }
}

impl core::fmt::Display for AccessRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessRule::Public => f.write_str("public"),
            AccessRule::AuthenticatedOnly => f.write_str("authenticated"),
            AccessRule::RoleRestricted(set) => write!(f, "only {set}"),
            AccessRule::RoleExcluded(set) => write!(f, "all except {set}"),
        }
    }
}

/// One `{prefix, rule}` pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    prefix: String,
    rule: AccessRule,
}

impl RouteEntry {
    /// `prefix` is normalized to start with `/` and have no trailing `/`
    /// (except the root itself).
    pub fn new(prefix: impl Into<String>, rule: AccessRule) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim().trim_end_matches('/');
        let prefix = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix, rule }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn rule(&self) -> AccessRule {
        self.rule
    }

    /// Exact match, or `prefix` followed by a path separator.
    pub fn matches(&self, path: &str) -> bool {
        if path == self.prefix {
            return true;
        }
        if self.prefix == "/" {
            return false;
        }
        path.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Immutable route classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: AccessRule,
}

impl RouteTable {
    /// Build a table; unmatched paths classify as [`AccessRule::AuthenticatedOnly`].
    pub fn new(entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            fallback: AccessRule::AuthenticatedOnly,
        }
    }

    /// The dashboard route set: guest entry, authenticated area, and the
    /// admin-only / user-only / role-specific subtrees inside it.
    pub fn mfs_default() -> Self {
        const ADMIN: RoleSet = RoleSet::of(&[Role::Admin]);
        const CONSUMER: RoleSet = RoleSet::of(&[Role::Consumer]);
        const AGENT: RoleSet = RoleSet::of(&[Role::Agent]);
        const BUSINESS: RoleSet = RoleSet::of(&[Role::Business]);
        const PAYERS: RoleSet = RoleSet::of(&[Role::Consumer, Role::Business]);

        use AccessRule::*;
        Self::new([
            RouteEntry::new("/", Public),
            RouteEntry::new("/register", Public),
            RouteEntry::new("/dashboard", AuthenticatedOnly),
            RouteEntry::new("/dashboard/admins", RoleRestricted(ADMIN)),
            RouteEntry::new("/dashboard/agents", RoleRestricted(ADMIN)),
            RouteEntry::new("/dashboard/consumers", RoleRestricted(ADMIN)),
            RouteEntry::new("/dashboard/billers", RoleRestricted(ADMIN)),
            RouteEntry::new("/dashboard/system-wallet", RoleRestricted(ADMIN)),
            RouteEntry::new("/dashboard/analytics", RoleRestricted(ADMIN)),
            RouteEntry::new("/dashboard/account", RoleExcluded(ADMIN)),
            RouteEntry::new("/dashboard/send-money", RoleRestricted(CONSUMER)),
            RouteEntry::new("/dashboard/cash-out", RoleRestricted(CONSUMER)),
            RouteEntry::new("/dashboard/top-up", RoleRestricted(CONSUMER)),
            RouteEntry::new("/dashboard/pay-bill", RoleRestricted(PAYERS)),
            RouteEntry::new("/dashboard/cash-in", RoleRestricted(AGENT)),
            RouteEntry::new("/dashboard/payments", RoleRestricted(BUSINESS)),
        ])
    }

    /// Classify a request path. Pure and deterministic.
    pub fn classify(&self, path: &str) -> AccessRule {
        let mut best: Option<&RouteEntry> = None;
        for entry in self.entries.iter().filter(|e| e.matches(path)) {
            // Strictly longer only: keeps the first declared on ties.
            if best.is_none_or(|b| entry.prefix.len() > b.prefix.len()) {
                best = Some(entry);
            }
        }
        best.map(|e| e.rule).unwrap_or(self.fallback)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::mfs_default()
    }
}
