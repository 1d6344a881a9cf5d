#![forbid(unsafe_code)]
//! # Hearth Core - Foundational Authorization Types
//!
//! This crate provides the foundational types shared by every layer of the
//! Hearth authorization system. It contains only data definitions and pure
//! invariant helpers: no policy logic, no I/O, and no collaborator access.
//!
//! # Layering
//!
//! ```text
//! hearth-core           (this crate: identifiers, facts, Verdict)
//!     ↑
//! hearth-authorization  (policy table, resolver, enforcer, engine)
//!     ↑
//! hearth-guards         (route guards, feature gates, pending states)
//! ```
//!
//! # Design Principles
//!
//! - **Fail-closed**: every type defaults toward denial under uncertainty.
//! - **Facts are snapshots**: [`IdentityFacts`] is immutable for the duration
//!   of a single check and re-fetched on session change.
//! - **Reasons, not booleans**: callers receive a tagged [`Verdict`] so every
//!   call site can explain a denial without re-deriving policy.

/// Account and session identifiers
pub mod identifiers;

/// Identity facts and family roles
pub mod identity;

/// Verdict tagged variant and security-violation signal
pub mod verdict;

/// Unified error handling
pub mod errors;

pub use errors::{HearthError, Result};
pub use identifiers::{AccountId, SessionId};
pub use identity::{FamilyRole, IdentityFacts, SessionResolution};
pub use verdict::{AccessReason, DenialReason, SecurityInvariant, SecurityViolation, Verdict};
