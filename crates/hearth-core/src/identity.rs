//! Identity facts and family roles
//!
//! [`IdentityFacts`] is the immutable-per-check snapshot of who is asking.
//! It is constructed once per session-resolution cycle from the identity
//! collaborator and treated as read-only for the duration of a single
//! authorization check; a session change invalidates the snapshot.

use crate::identifiers::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family role held by an account
///
/// Roles are mutually exclusive, not hierarchical flags: an account holds
/// exactly one role at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyRole {
    /// Primary parent; the unrestricted role
    ParentPrimary,
    /// Secondary parent; unrestricted
    ParentSecondary,
    /// Restricted third party (e.g. a caregiver with limited visibility)
    RestrictedThirdParty,
    /// Child account; always a minor account
    Child,
}

impl FamilyRole {
    /// Whether this role has parent-level (unrestricted) access
    pub fn is_parent(&self) -> bool {
        matches!(self, Self::ParentPrimary | Self::ParentSecondary)
    }

    /// Whether this role defaults to deny on resources with no explicit rule
    pub fn is_restricted(&self) -> bool {
        !self.is_parent()
    }

    /// Stable snake_case tag for logging and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParentPrimary => "parent_primary",
            Self::ParentSecondary => "parent_secondary",
            Self::RestrictedThirdParty => "restricted_third_party",
            Self::Child => "child",
        }
    }
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable-per-check snapshot of the requesting identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityFacts {
    /// Opaque stable account identifier
    pub account_id: AccountId,
    /// Family role; exactly one value
    pub role: FamilyRole,
    /// True only for `role = Child`
    pub is_minor_account: bool,
    /// Owned by account administration; a minor account with login disabled
    /// must never hold a live, authorized session
    pub login_enabled: bool,
}

impl IdentityFacts {
    /// Build a snapshot, deriving `is_minor_account` from the role
    ///
    /// The constructor is the only way the minor flag is set, so the
    /// "`is_minor_account` iff `role = Child`" invariant holds for every
    /// value produced by this crate.
    pub fn new(account_id: AccountId, role: FamilyRole, login_enabled: bool) -> Self {
        Self {
            account_id,
            role,
            is_minor_account: role == FamilyRole::Child,
            login_enabled,
        }
    }
}

/// Outcome of resolving the current session with the identity collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "session", rename_all = "snake_case")]
pub enum SessionResolution {
    /// A live session with resolved identity facts
    Authenticated(IdentityFacts),
    /// No live session; every protected resource is denied without
    /// consulting the policy table
    Unauthenticated,
}

impl SessionResolution {
    /// The identity facts, if authenticated
    pub fn facts(&self) -> Option<&IdentityFacts> {
        match self {
            Self::Authenticated(facts) => Some(facts),
            Self::Unauthenticated => None,
        }
    }
}
