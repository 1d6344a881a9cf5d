#![forbid(unsafe_code)]
#![deny(clippy::await_holding_lock)]
//! # Hearth Guards - Call-Site Enforcement
//!
//! Thin wrappers that route components, feature gates, and action buttons
//! use to consult the authorization engine without re-implementing policy.
//! Guards own the two concerns the pure engine cannot: fetching facts from
//! collaborators, and the non-committal pending state while those facts
//! load.
//!
//! # Pending, not a flash
//!
//! While identity or entitlement facts are loading, a guard yields
//! [`GuardOutcome::Pending`], never an optimistic allow that gets revoked
//! a frame later, and never a premature deny. Callers render a pending
//! state and re-evaluate when facts arrive.
//!
//! # Snapshot pairing
//!
//! Every decided outcome carries the [`SessionId`](hearth_core::SessionId)
//! of the snapshot it was computed from. If the session changes mid-flight
//! (logout during a pending check), the caller discards the outcome via
//! [`GuardOutcome::into_current`] instead of applying a stale verdict.

pub mod guards;
pub mod prelude;

pub use guards::{
    FeatureGate, GuardOutcome, IdentityProvider, RouteGuard, SessionSnapshot,
};
