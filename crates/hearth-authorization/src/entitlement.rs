//! Entitlement tier resolution
//!
//! Converts raw billing facts into a single `effective_access` boolean plus
//! a human-legible reason tag, using a strict precedence order (highest
//! wins, no combination):
//!
//! 1. `admin_free_access`: support-desk complimentary access, overrides
//!    everything including an expired trial or no subscription
//! 2. active paid subscription
//! 3. active trial (strictly `now < trial_ends_at`)
//! 4. trial present but over → denied, `expired`
//! 5. none of the above → denied, `none`
//!
//! Access is recomputed on every check (entitlement can expire between
//! checks without an explicit event) and collaborator failures fail
//! closed, never open.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearth_core::{AccessReason, AccountId, HearthError};
use serde::{Deserialize, Serialize};
use tracing::warn;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Billing tier as reported by the billing-facts collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingTier {
    /// No subscription and no trial
    Free,
    /// Trial, bounded by `trial_ends_at`
    Trial,
    /// Active paid subscription
    Paid,
}

/// Raw facts from the billing collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitlementFacts {
    /// Current billing tier
    pub tier: BillingTier,
    /// Present only when `tier = Trial`
    pub trial_ends_at: Option<DateTime<Utc>>,
    /// Support-desk-issued complimentary access; overrides everything
    pub admin_free_access: bool,
}

impl EntitlementFacts {
    /// Facts for an account with no subscription or trial
    pub fn free() -> Self {
        Self {
            tier: BillingTier::Free,
            trial_ends_at: None,
            admin_free_access: false,
        }
    }

    /// Facts for a paid subscription
    pub fn paid() -> Self {
        Self {
            tier: BillingTier::Paid,
            trial_ends_at: None,
            admin_free_access: false,
        }
    }

    /// Facts for a trial ending at the given instant
    pub fn trial(trial_ends_at: DateTime<Utc>) -> Self {
        Self {
            tier: BillingTier::Trial,
            trial_ends_at: Some(trial_ends_at),
            admin_free_access: false,
        }
    }

    /// Mark these facts with admin-granted free access
    pub fn with_admin_free_access(mut self) -> Self {
        self.admin_free_access = true;
        self
    }
}

/// Derived access state, computed at check time and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementAccess {
    /// Whether the tier grants the paid capability right now
    pub effective_access: bool,
    /// Human-legible reason tag
    pub reason: AccessReason,
    /// Days left on an active or expired trial; `None` for non-trial
    /// outcomes
    pub days_remaining: Option<u32>,
}

impl EntitlementAccess {
    /// The fail-closed outcome used when facts cannot be resolved
    pub fn denied_closed() -> Self {
        Self {
            effective_access: false,
            reason: AccessReason::None,
            days_remaining: None,
        }
    }
}

/// Resolver output including the transient loading state
///
/// `Loading` is distinct from both granted and denied: callers must not
/// treat it as either extreme, to avoid a flash of incorrectly-gated
/// content followed by a layout shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementResolution {
    /// Underlying facts are still being fetched
    Loading,
    /// Facts resolved; access derived
    Resolved(EntitlementAccess),
}

impl EntitlementResolution {
    /// Whether facts are still loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The derived access, if resolved
    pub fn access(&self) -> Option<&EntitlementAccess> {
        match self {
            Self::Resolved(access) => Some(access),
            Self::Loading => None,
        }
    }
}

/// Ceiling of the remaining trial span in days, floored at 0
///
/// Computed from milliseconds so any positive remainder, however small,
/// still counts as one day.
fn days_remaining(trial_ends_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let millis = (trial_ends_at - now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        ((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY) as u32
    }
}

/// Derive effective access from billing facts at `now`
///
/// Pure; the precedence order is strict and the trial boundary is exact:
/// `trial_ends_at == now` is already expired (`now < trial_ends_at`
/// strictly).
pub fn resolve_facts(facts: &EntitlementFacts, now: DateTime<Utc>) -> EntitlementAccess {
    if facts.admin_free_access {
        return EntitlementAccess {
            effective_access: true,
            reason: AccessReason::FreeAccess,
            days_remaining: None,
        };
    }
    if facts.tier == BillingTier::Paid {
        return EntitlementAccess {
            effective_access: true,
            reason: AccessReason::Subscribed,
            days_remaining: None,
        };
    }
    if let Some(trial_ends_at) = facts.trial_ends_at {
        if now < trial_ends_at {
            return EntitlementAccess {
                effective_access: true,
                reason: AccessReason::Trial,
                days_remaining: Some(days_remaining(trial_ends_at, now)),
            };
        }
        return EntitlementAccess {
            effective_access: false,
            reason: AccessReason::Expired,
            days_remaining: Some(0),
        };
    }
    EntitlementAccess::denied_closed()
}

/// Billing-facts collaborator
///
/// The single external source of tier facts. A transient failure here must
/// fail closed, never open and never to a last-known-good verdict.
#[async_trait]
pub trait BillingFactsProvider: Send + Sync {
    /// Fetch current entitlement facts for an account
    async fn entitlement_facts(&self, account_id: AccountId)
        -> Result<EntitlementFacts, HearthError>;
}

/// Resolves the current entitlement for an account at check time
#[derive(Clone)]
pub struct EntitlementResolver<P> {
    provider: P,
}

impl<P: BillingFactsProvider> EntitlementResolver<P> {
    /// Create a resolver over the given billing-facts collaborator
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolve effective access for `account_id` at `now`
    ///
    /// Collaborator failures fail closed to `{effective_access: false,
    /// reason: none}`.
    pub async fn resolve(&self, account_id: AccountId, now: DateTime<Utc>) -> EntitlementAccess {
        match self.provider.entitlement_facts(account_id).await {
            Ok(facts) => resolve_facts(&facts, now),
            Err(err) => {
                warn!(%account_id, error = %err, "billing facts unavailable, failing closed");
                EntitlementAccess::denied_closed()
            }
        }
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for EntitlementResolver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementResolver")
            .field("provider", &self.provider)
            .finish()
    }
}
