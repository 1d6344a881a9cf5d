//! Guard implementations
//!
//! [`RouteGuard`] protects route paths and fetches entitlement facts on
//! demand; [`FeatureGate`] protects named actions with pre-resolved facts;
//! [`SessionSnapshot`] pairs identity facts with the session they were
//! resolved for.

mod feature;
mod route;
mod session;
mod types;

pub use feature::FeatureGate;
pub use route::RouteGuard;
pub use session::{IdentityProvider, SessionSnapshot};
pub use types::GuardOutcome;

use chrono::{DateTime, Utc};
use hearth_authorization::{AuthorizationDecisionEngine, EntitlementAccess, EntitlementResolution};

/// Shared decision step: pending while premium facts load, otherwise a
/// decided verdict paired with the snapshot's session.
fn decide_or_pending(
    engine: &AuthorizationDecisionEngine,
    snapshot: &SessionSnapshot,
    resource_id: &str,
    entitlement: &EntitlementResolution,
    now: DateTime<Utc>,
) -> GuardOutcome {
    // Only an authenticated session waits on entitlement facts: an
    // unauthenticated snapshot is an automatic denial, and facts for a
    // session with no account would never finish loading.
    let wait_on_entitlement =
        snapshot.resolution.facts().is_some() && engine.policy().requires_entitlement(resource_id);
    let access = if wait_on_entitlement {
        match entitlement.access() {
            Some(access) => *access,
            None => return GuardOutcome::Pending,
        }
    } else {
        // The engine ignores this value on every other path.
        EntitlementAccess::denied_closed()
    };

    GuardOutcome::Decided {
        session_id: snapshot.session_id,
        verdict: engine.decide_session(&snapshot.resolution, resource_id, &access, now),
    }
}
