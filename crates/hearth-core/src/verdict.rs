//! Verdict tagged variant and the security-violation signal
//!
//! Every authorization check produces a [`Verdict`], never a bare boolean,
//! so each call site gets a reason it can act on without re-deriving
//! policy. [`SecurityViolation`] is deliberately a standalone error type in
//! addition to a `Verdict` variant: the enforcer raises it through `Result`
//! so generic error-handling wrappers cannot downgrade it to an ordinary,
//! retryable denial.

use crate::identifiers::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why entitlement-based access was granted or denied
///
/// Produced by the entitlement resolver with strict precedence; the tag is
/// stable and human-legible (`free_access`, `subscribed`, `trial`,
/// `expired`, `none`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// Support-desk-issued complimentary access; overrides everything
    FreeAccess,
    /// Active paid subscription
    Subscribed,
    /// Active trial (strictly before `trial_ends_at`)
    Trial,
    /// Trial present but over
    Expired,
    /// No entitlement facts grant access
    None,
}

impl AccessReason {
    /// Stable snake_case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreeAccess => "free_access",
            Self::Subscribed => "subscribed",
            Self::Trial => "trial",
            Self::Expired => "expired",
            Self::None => "none",
        }
    }
}

impl fmt::Display for AccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason attached to an ordinary denial
///
/// Ordinary denials are recoverable by the user (upgrade, request access)
/// and safe to describe precisely in the UI, unlike a
/// [`SecurityViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No live session; denied before the policy table is consulted
    NotAuthenticated,
    /// Resource requires a parent-level role
    RequiresParentRole,
    /// Resource is not on the child-allowed list for a minor account
    MinorRestricted,
    /// Trial present but over
    #[serde(rename = "expired")]
    EntitlementExpired,
    /// No entitlement facts grant access
    #[serde(rename = "none")]
    EntitlementNone,
}

impl DenialReason {
    /// Stable snake_case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::RequiresParentRole => "requires_parent_role",
            Self::MinorRestricted => "minor_restricted",
            Self::EntitlementExpired => "expired",
            Self::EntitlementNone => "none",
        }
    }

    /// Map a resolver denial reason onto the verdict vocabulary
    ///
    /// Only called when `effective_access` is false, where the resolver
    /// reports `expired` or `none`; anything else collapses to `none`
    /// (fail-closed rather than inventing a grant).
    pub fn from_access(reason: AccessReason) -> Self {
        match reason {
            AccessReason::Expired => Self::EntitlementExpired,
            _ => Self::EntitlementNone,
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Security invariants checked orthogonally to role and tier
///
/// A broken invariant indicates a bug or an attack, not an ordinary
/// permission gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityInvariant {
    /// A session for an account with login disabled reached an access
    /// checkpoint
    LoginDisabledSession,
}

impl SecurityInvariant {
    /// Stable snake_case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginDisabledSession => "login_disabled_session",
        }
    }
}

impl fmt::Display for SecurityInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinguished violation signal raised when a security invariant breaks
///
/// Always implies denial of the underlying action, is always audited, and
/// is always terminal: the caller renders a restrictive fallback and forces
/// re-authentication, never a retry. The detail fields are for the audit
/// channel and server-side logs only, never for end users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("security invariant {invariant} violated for {account_id}")]
pub struct SecurityViolation {
    /// Which invariant broke
    pub invariant: SecurityInvariant,
    /// Server-side detail; never shown to the end user
    pub details: String,
    /// Account whose session broke the invariant
    pub account_id: AccountId,
    /// When the violation was raised
    pub raised_at: DateTime<Utc>,
}

/// Tagged result of an authorization check
///
/// Serialized as a discriminated object (`{"verdict": "deny", ...}`) for
/// deployments that expose the engine as a request/response service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Access granted
    Allow,
    /// Ordinary denial with a user-describable reason
    Deny {
        /// Why access was denied
        reason: DenialReason,
    },
    /// A security invariant broke; denial plus audit side effect
    SecurityViolation(SecurityViolation),
}

impl Verdict {
    /// Whether the underlying action may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Whether this verdict denies the action (violations imply denial)
    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// Convert into a `Result`, surfacing violations as errors
    ///
    /// Guards use this to keep the exceptional path (violation) distinct
    /// from the ordinary denial path, so a generic wrapper cannot render a
    /// retry affordance for a violation.
    pub fn into_result(self) -> Result<Option<DenialReason>, SecurityViolation> {
        match self {
            Self::Allow => Ok(None),
            Self::Deny { reason } => Ok(Some(reason)),
            Self::SecurityViolation(violation) => Err(violation),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => f.write_str("allow"),
            Self::Deny { reason } => write!(f, "deny({reason})"),
            Self::SecurityViolation(violation) => {
                write!(f, "security_violation({})", violation.invariant)
            }
        }
    }
}
