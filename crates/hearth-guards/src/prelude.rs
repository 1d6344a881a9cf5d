//! Convenience re-exports for guard call sites
//!
//! ```rust,ignore
//! use hearth_guards::prelude::*;
//! ```

pub use crate::guards::{FeatureGate, GuardOutcome, IdentityProvider, RouteGuard, SessionSnapshot};
pub use hearth_authorization::{
    AuthorizationDecisionEngine, EntitlementResolution, EntitlementResolver, RoutePolicyTable,
};
pub use hearth_core::{
    DenialReason, FamilyRole, IdentityFacts, SessionResolution, Verdict,
};
