//! Feature gate
//!
//! Protects named actions (buttons, menu entries, background commands)
//! rather than routes. Action identifiers share the policy table with
//! routes; by convention they are path-like (`/actions/expenses/export`)
//! so prefix rules cover whole action families.

use super::{decide_or_pending, GuardOutcome, SessionSnapshot};
use chrono::{DateTime, Utc};
use hearth_authorization::{AuthorizationDecisionEngine, EntitlementResolution};
use std::sync::Arc;

/// Gate consulted before rendering or executing a protected action
#[derive(Debug, Clone)]
pub struct FeatureGate {
    engine: Arc<AuthorizationDecisionEngine>,
}

impl FeatureGate {
    /// Build a gate over the shared engine
    pub fn new(engine: Arc<AuthorizationDecisionEngine>) -> Self {
        Self { engine }
    }

    /// Evaluate access to `action` with caller-held entitlement state
    ///
    /// Gates are hit on every render, so they take pre-resolved facts
    /// rather than fetching; premium actions yield
    /// [`GuardOutcome::Pending`] while facts load.
    pub fn evaluate(
        &self,
        snapshot: &SessionSnapshot,
        action: &str,
        entitlement: &EntitlementResolution,
        now: DateTime<Utc>,
    ) -> GuardOutcome {
        decide_or_pending(&self.engine, snapshot, action, entitlement, now)
    }

    /// Whether the action may be shown enabled right now
    ///
    /// Pending counts as "not yet": callers render a placeholder, not a
    /// disabled-looking button that flips a frame later.
    pub fn allows(
        &self,
        snapshot: &SessionSnapshot,
        action: &str,
        entitlement: &EntitlementResolution,
        now: DateTime<Utc>,
    ) -> bool {
        self.evaluate(snapshot, action, entitlement, now).allows()
    }
}
