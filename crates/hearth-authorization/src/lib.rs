#![forbid(unsafe_code)]
#![deny(clippy::await_holding_lock)]
//! # Hearth Authorization - The Decision Core
//!
//! Single source of truth for allow/deny decisions across route guards,
//! feature gates, and action buttons. Call sites never re-implement policy;
//! they ask the [`AuthorizationDecisionEngine`] and act on the returned
//! [`Verdict`](hearth_core::Verdict).
//!
//! # Decision pipeline
//!
//! ```text
//! IdentityFacts ──► RoutePolicyTable ──► EntitlementResolver ──► Enforcer
//!                   (role admissible?)   (tier admissible?)      (veto)
//!                                 │
//!                                 ▼
//!                     Allow | Deny(reason) | SecurityViolation
//! ```
//!
//! Ordering is load-bearing: role checks precede entitlement checks so a
//! missing role is never reported as "upgrade required", and the
//! login-disabled invariant is evaluated for every minor session so a
//! violation is never masked by an earlier ordinary denial.
//!
//! The engine itself is pure: facts are fetched asynchronously by callers
//! (see `hearth-guards`) and passed in pre-resolved. Under any uncertainty
//! the pipeline fails closed.

/// Declarative route/action policy table and its configuration surface
pub mod policy;

/// Entitlement tier resolution from raw billing facts
pub mod entitlement;

/// Append-only audit channel for security violations
pub mod audit;

/// Security invariant enforcement, orthogonal to role and tier
pub mod invariant;

/// The decision engine consulted by every guard
pub mod engine;

pub use audit::{AuditEvent, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use engine::AuthorizationDecisionEngine;
pub use entitlement::{
    resolve_facts, BillingFactsProvider, BillingTier, EntitlementAccess, EntitlementFacts,
    EntitlementResolution, EntitlementResolver,
};
pub use invariant::SecurityInvariantEnforcer;
pub use policy::{PolicyConfig, PolicyConfigError, RoutePolicyTable};
