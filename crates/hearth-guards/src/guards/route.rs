//! Route guard
//!
//! Protects route paths. Owns the asynchronous entitlement fetch for
//! premium routes so route components only ever see a [`GuardOutcome`];
//! the engine itself stays free of I/O.

use super::{decide_or_pending, GuardOutcome, SessionSnapshot};
use chrono::{DateTime, Utc};
use hearth_authorization::{
    AuthorizationDecisionEngine, BillingFactsProvider, EntitlementResolution, EntitlementResolver,
};
use std::sync::Arc;

/// Guard consulted by route components before rendering protected content
#[derive(Debug, Clone)]
pub struct RouteGuard<P> {
    engine: Arc<AuthorizationDecisionEngine>,
    resolver: EntitlementResolver<P>,
}

impl<P: BillingFactsProvider> RouteGuard<P> {
    /// Build a route guard over the shared engine and a billing resolver
    pub fn new(engine: Arc<AuthorizationDecisionEngine>, resolver: EntitlementResolver<P>) -> Self {
        Self { engine, resolver }
    }

    /// Evaluate access to `path`, fetching entitlement facts if the route
    /// is premium
    ///
    /// Non-premium routes and unauthenticated sessions never touch the
    /// billing collaborator. The returned outcome is always decided; the
    /// entitlement fetch fails closed inside the resolver.
    pub async fn evaluate(
        &self,
        snapshot: &SessionSnapshot,
        path: &str,
        now: DateTime<Utc>,
    ) -> GuardOutcome {
        let entitlement = match snapshot.resolution.facts() {
            Some(facts) if self.engine.policy().requires_entitlement(path) => {
                EntitlementResolution::Resolved(self.resolver.resolve(facts.account_id, now).await)
            }
            _ => EntitlementResolution::Resolved(
                hearth_authorization::EntitlementAccess::denied_closed(),
            ),
        };
        decide_or_pending(&self.engine, snapshot, path, &entitlement, now)
    }

    /// Evaluate with caller-held entitlement state
    ///
    /// For callers that cache entitlement or stream it from elsewhere;
    /// yields [`GuardOutcome::Pending`] while a premium route's facts are
    /// still loading.
    pub fn evaluate_resolved(
        &self,
        snapshot: &SessionSnapshot,
        path: &str,
        entitlement: &EntitlementResolution,
        now: DateTime<Utc>,
    ) -> GuardOutcome {
        decide_or_pending(&self.engine, snapshot, path, entitlement, now)
    }
}
