//! Security invariant enforcement
//!
//! Conditions orthogonal to role and tier that, if violated, indicate a bug
//! or an attack rather than an ordinary permission gap. A violation is
//! always terminal for the checked action: no retry, restrictive fallback
//! only, never the originally-requested content.

use crate::audit::{AuditEvent, AuditSink};
use chrono::{DateTime, Utc};
use hearth_core::{AccountId, SecurityInvariant, SecurityViolation};
use std::sync::Arc;
use tracing::error;

/// Evaluates security invariants and raises the distinguished violation
/// signal
///
/// The audit record is written synchronously before the signal propagates;
/// an audit write failure is logged but never suppresses the violation.
#[derive(Clone)]
pub struct SecurityInvariantEnforcer {
    audit: Arc<dyn AuditSink>,
}

impl SecurityInvariantEnforcer {
    /// Create an enforcer writing to the given audit channel
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        Self { audit }
    }

    /// Assert that `condition` holds for `account_id`
    ///
    /// When the condition is false, the violation is audited and returned
    /// as `Err`, a signal distinct from an ordinary denial, so generic
    /// error handling cannot render it as retryable.
    pub fn check(
        &self,
        condition: bool,
        invariant: SecurityInvariant,
        details: impl Into<String>,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> Result<(), SecurityViolation> {
        if condition {
            return Ok(());
        }

        let violation = SecurityViolation {
            invariant,
            details: details.into(),
            account_id,
            raised_at: now,
        };

        error!(
            invariant = invariant.as_str(),
            %account_id,
            "security invariant violated"
        );

        // Durable evidence first, then propagate. A sink failure must not
        // turn a violation into a pass-through.
        let record = self.audit.record(AuditEvent {
            invariant,
            details: violation.details.clone(),
            account_id,
            timestamp: now,
        });
        if let Err(err) = record {
            error!(
                invariant = invariant.as_str(),
                %account_id,
                error = %err,
                "audit write failed for security violation"
            );
        }

        Err(violation)
    }
}

impl std::fmt::Debug for SecurityInvariantEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityInvariantEnforcer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditSink;
    use hearth_core::HearthError;

    #[test]
    fn holding_condition_passes_without_audit() {
        let sink = Arc::new(MemoryAuditSink::new());
        let enforcer = SecurityInvariantEnforcer::new(sink.clone());

        let result = enforcer.check(
            true,
            SecurityInvariant::LoginDisabledSession,
            "login enabled",
            AccountId::new(),
            Utc::now(),
        );
        assert!(result.is_ok());
        assert!(sink.is_empty());
    }

    #[test]
    fn broken_condition_audits_before_raising() {
        let sink = Arc::new(MemoryAuditSink::new());
        let enforcer = SecurityInvariantEnforcer::new(sink.clone());
        let account = AccountId::new();

        let violation = enforcer
            .check(
                false,
                SecurityInvariant::LoginDisabledSession,
                "disabled-login session reached checkpoint",
                account,
                Utc::now(),
            )
            .unwrap_err();

        assert_eq!(violation.invariant, SecurityInvariant::LoginDisabledSession);
        assert_eq!(violation.account_id, account);

        let events = sink.events_for(account);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].details, violation.details);
    }

    struct FailingSink;

    impl AuditSink for FailingSink {
        fn record(&self, _event: AuditEvent) -> Result<(), HearthError> {
            Err(HearthError::transient("audit channel down"))
        }
    }

    #[test]
    fn audit_failure_never_suppresses_the_violation() {
        let enforcer = SecurityInvariantEnforcer::new(Arc::new(FailingSink));
        let result = enforcer.check(
            false,
            SecurityInvariant::LoginDisabledSession,
            "detail",
            AccountId::new(),
            Utc::now(),
        );
        assert!(result.is_err());
    }
}
