//! The authorization decision engine
//!
//! Single entry point consulted by every guard in the system. The engine is
//! pure: identity and entitlement facts are resolved upstream and passed in
//! as snapshots, and the policy table is read-only at request time, so a
//! check is a short-lived, independent computation with no hidden state:
//! identical inputs always produce identical verdicts.
//!
//! Step ordering is load-bearing:
//!
//! 1. the login-disabled invariant is evaluated for every minor session
//!    before any verdict is returned, because a disabled-login session
//!    reaching the checkpoint at all is the deeper problem and must never
//!    be masked by an ordinary denial;
//! 2. role checks precede entitlement checks, so a denial for lacking a
//!    role is never reported as "upgrade required", which would leak
//!    incorrect remediation guidance and could induce an unnecessary
//!    purchase.

use crate::entitlement::EntitlementAccess;
use crate::invariant::SecurityInvariantEnforcer;
use crate::policy::RoutePolicyTable;
use chrono::{DateTime, Utc};
use hearth_core::{
    DenialReason, IdentityFacts, SecurityInvariant, SessionResolution, Verdict,
};
use tracing::debug;

/// Composes policy table, entitlement facts, and invariant enforcement into
/// a single verdict
#[derive(Debug, Clone)]
pub struct AuthorizationDecisionEngine {
    table: RoutePolicyTable,
    enforcer: SecurityInvariantEnforcer,
}

impl AuthorizationDecisionEngine {
    /// Build an engine over a loaded policy table and an enforcer
    pub fn new(table: RoutePolicyTable, enforcer: SecurityInvariantEnforcer) -> Self {
        Self { table, enforcer }
    }

    /// The read-only policy table backing this engine
    pub fn policy(&self) -> &RoutePolicyTable {
        &self.table
    }

    /// Decide access for an authenticated identity snapshot
    ///
    /// `entitlement` must be the already-resolved access for this account;
    /// the engine never initiates I/O. Resources not marked premium never
    /// consult it.
    pub fn decide(
        &self,
        identity: &IdentityFacts,
        resource_id: &str,
        entitlement: &EntitlementAccess,
        now: DateTime<Utc>,
    ) -> Verdict {
        let verdict = self.evaluate(identity, resource_id, entitlement, now);
        debug!(
            resource = resource_id,
            role = identity.role.as_str(),
            account_id = %identity.account_id,
            verdict = %verdict,
            "authorization decision"
        );
        verdict
    }

    /// Decide access for a session resolution
    ///
    /// `Unauthenticated` is an automatic denial for every protected
    /// resource; the policy table is not consulted.
    pub fn decide_session(
        &self,
        session: &SessionResolution,
        resource_id: &str,
        entitlement: &EntitlementAccess,
        now: DateTime<Utc>,
    ) -> Verdict {
        match session {
            SessionResolution::Authenticated(identity) => {
                self.decide(identity, resource_id, entitlement, now)
            }
            SessionResolution::Unauthenticated => {
                debug!(resource = resource_id, "unauthenticated session denied");
                Verdict::Deny {
                    reason: DenialReason::NotAuthenticated,
                }
            }
        }
    }

    fn evaluate(
        &self,
        identity: &IdentityFacts,
        resource_id: &str,
        entitlement: &EntitlementAccess,
        now: DateTime<Utc>,
    ) -> Verdict {
        // A minor account with login disabled must never proceed past an
        // access checkpoint, whatever the requested resource. Checked
        // before any ordinary verdict so a role denial cannot mask it.
        if identity.is_minor_account {
            let checkpoint = self.enforcer.check(
                identity.login_enabled,
                SecurityInvariant::LoginDisabledSession,
                format!("disabled-login session reached checkpoint {resource_id}"),
                identity.account_id,
                now,
            );
            if let Err(violation) = checkpoint {
                return Verdict::SecurityViolation(violation);
            }
        }

        // Role admissibility; always before entitlement.
        if self.table.requires_parent(resource_id) && !identity.role.is_parent() {
            return Verdict::Deny {
                reason: DenialReason::RequiresParentRole,
            };
        }
        if identity.role.is_restricted() && !self.table.is_child_allowed(resource_id) {
            let reason = if identity.is_minor_account {
                DenialReason::MinorRestricted
            } else {
                DenialReason::RequiresParentRole
            };
            return Verdict::Deny { reason };
        }

        // Tier admissibility, only for resources marked premium.
        if self.table.requires_entitlement(resource_id) && !entitlement.effective_access {
            return Verdict::Deny {
                reason: DenialReason::from_access(entitlement.reason),
            };
        }

        Verdict::Allow
    }
}
