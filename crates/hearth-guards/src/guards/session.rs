//! Session snapshot and the identity collaborator
//!
//! Identity resolution is the one asynchronous step that happens before
//! any check can run. The resulting facts are frozen into a
//! [`SessionSnapshot`] so every verdict derived from them can be paired
//! with the session they describe.

use async_trait::async_trait;
use hearth_core::{HearthError, SessionId, SessionResolution};

/// Identity-store collaborator
///
/// Returns the current session's identity facts, or `Unauthenticated` when
/// there is no live session. The guard layer treats a transport failure
/// here like any other uncertainty: fail closed.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current session
    async fn resolve_session(&self) -> Result<SessionResolution, HearthError>;
}

/// Identity facts frozen for one session-resolution cycle
///
/// Constructed once per cycle and re-fetched on session change; immutable
/// for the duration of any check evaluated against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Identifies this resolution cycle
    pub session_id: SessionId,
    /// The resolved identity, or `Unauthenticated`
    pub resolution: SessionResolution,
}

impl SessionSnapshot {
    /// Freeze a resolution under a fresh session ID
    pub fn new(resolution: SessionResolution) -> Self {
        Self {
            session_id: SessionId::new(),
            resolution,
        }
    }

    /// Freeze a resolution under a known session ID
    pub fn with_session_id(session_id: SessionId, resolution: SessionResolution) -> Self {
        Self {
            session_id,
            resolution,
        }
    }

    /// Resolve via the identity collaborator and freeze the result
    ///
    /// A collaborator failure resolves to `Unauthenticated`: under
    /// uncertainty the snapshot denies, it never guesses.
    pub async fn resolve<P: IdentityProvider>(provider: &P) -> Self {
        match provider.resolve_session().await {
            Ok(resolution) => Self::new(resolution),
            Err(err) => {
                tracing::warn!(error = %err, "identity resolution failed, treating as unauthenticated");
                Self::new(SessionResolution::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{AccountId, FamilyRole, IdentityFacts};

    struct FailingIdentity;

    #[async_trait]
    impl IdentityProvider for FailingIdentity {
        async fn resolve_session(&self) -> Result<SessionResolution, HearthError> {
            Err(HearthError::transient("identity store unreachable"))
        }
    }

    struct FixedIdentity(IdentityFacts);

    #[async_trait]
    impl IdentityProvider for FixedIdentity {
        async fn resolve_session(&self) -> Result<SessionResolution, HearthError> {
            Ok(SessionResolution::Authenticated(self.0.clone()))
        }
    }

    #[tokio::test]
    async fn identity_failure_freezes_as_unauthenticated() {
        let snapshot = SessionSnapshot::resolve(&FailingIdentity).await;
        assert_eq!(snapshot.resolution, SessionResolution::Unauthenticated);
    }

    #[tokio::test]
    async fn resolution_cycles_get_distinct_session_ids() {
        let facts = IdentityFacts::new(AccountId::new(), FamilyRole::ParentPrimary, true);
        let provider = FixedIdentity(facts);
        let first = SessionSnapshot::resolve(&provider).await;
        let second = SessionSnapshot::resolve(&provider).await;
        assert_ne!(first.session_id, second.session_id);
    }
}
