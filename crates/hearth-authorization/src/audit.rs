//! Append-only audit channel for security violations
//!
//! The audit record is the only durable evidence of a violation, so the
//! write happens synchronously with respect to the violation being
//! surfaced: [`AuditSink::record`] returns only after the event is
//! accepted. Writes for one account are serialized to preserve the
//! chronological order of that account's violations; writes for different
//! accounts are independent and may proceed in parallel.

use chrono::{DateTime, Utc};
use hearth_core::{AccountId, HearthError, SecurityInvariant};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

/// One entry on the append-only audit channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Which invariant broke
    pub invariant: SecurityInvariant,
    /// Server-side detail, never user-facing
    pub details: String,
    /// Account whose session broke the invariant
    pub account_id: AccountId,
    /// When the violation was raised
    pub timestamp: DateTime<Utc>,
}

/// Append-only write interface; durable-before-acknowledge
pub trait AuditSink: Send + Sync {
    /// Append one event; returns once the event is durably accepted
    fn record(&self, event: AuditEvent) -> Result<(), HearthError>;
}

/// In-memory sink with per-account ordering
///
/// Each account gets its own lock, so concurrent violations for different
/// accounts never contend while one account's events stay chronological.
/// Used in tests and single-process deployments; log-shipping deployments
/// use [`TracingAuditSink`].
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    lanes: RwLock<HashMap<AccountId, Arc<Mutex<Vec<AuditEvent>>>>>,
}

impl MemoryAuditSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    fn lane(&self, account_id: AccountId) -> Arc<Mutex<Vec<AuditEvent>>> {
        if let Some(lane) = self.lanes.read().get(&account_id) {
            return Arc::clone(lane);
        }
        let mut lanes = self.lanes.write();
        Arc::clone(lanes.entry(account_id).or_default())
    }

    /// Events recorded for one account, in write order
    pub fn events_for(&self, account_id: AccountId) -> Vec<AuditEvent> {
        self.lanes
            .read()
            .get(&account_id)
            .map(|lane| lane.lock().clone())
            .unwrap_or_default()
    }

    /// Total number of recorded events across all accounts
    pub fn len(&self) -> usize {
        self.lanes.read().values().map(|lane| lane.lock().len()).sum()
    }

    /// Whether no events have been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AuditEvent) -> Result<(), HearthError> {
        self.lane(event.account_id).lock().push(event);
        Ok(())
    }
}

/// Sink that emits each violation as a structured tracing event
///
/// For deployments whose log pipeline is the durable channel. Emission is
/// synchronous with the call, matching the durable-before-ack contract as
/// far as the process boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) -> Result<(), HearthError> {
        error!(
            target: "hearth::audit",
            invariant = event.invariant.as_str(),
            account_id = %event.account_id,
            timestamp = %event.timestamp,
            details = %event.details,
            "security invariant violated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(account_id: AccountId, details: &str) -> AuditEvent {
        AuditEvent {
            invariant: SecurityInvariant::LoginDisabledSession,
            details: details.into(),
            account_id,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn events_keep_per_account_write_order() {
        let sink = MemoryAuditSink::new();
        let account = AccountId::new();
        sink.record(event(account, "first")).unwrap();
        sink.record(event(account, "second")).unwrap();

        let events = sink.events_for(account);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].details, "first");
        assert_eq!(events[1].details, "second");
    }

    #[test]
    fn accounts_do_not_share_lanes() {
        let sink = MemoryAuditSink::new();
        let a = AccountId::new();
        let b = AccountId::new();
        sink.record(event(a, "for a")).unwrap();
        sink.record(event(b, "for b")).unwrap();

        assert_eq!(sink.events_for(a).len(), 1);
        assert_eq!(sink.events_for(b).len(), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn parallel_writes_land_for_their_accounts() {
        let sink = Arc::new(MemoryAuditSink::new());
        let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();

        std::thread::scope(|scope| {
            for &account in &accounts {
                let sink = Arc::clone(&sink);
                scope.spawn(move || {
                    for i in 0..8 {
                        sink.record(event(account, &format!("event {i}"))).unwrap();
                    }
                });
            }
        });

        for account in accounts {
            let events = sink.events_for(account);
            assert_eq!(events.len(), 8);
            // Chronological per account even under contention.
            for (i, recorded) in events.iter().enumerate() {
                assert_eq!(recorded.details, format!("event {i}"));
            }
        }
    }
}
