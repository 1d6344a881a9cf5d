//! Guard outcome type

use hearth_core::{SessionId, Verdict};

/// Result of a guard evaluation
///
/// `Pending` is a first-class state, not a verdict: callers must render a
/// non-committal placeholder and must not default to either extreme while
/// facts load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Facts are still loading; render pending, decide nothing
    Pending,
    /// A verdict, valid only for the session snapshot it was computed from
    Decided {
        /// Session the verdict was computed for
        session_id: SessionId,
        /// The verdict
        verdict: Verdict,
    },
}

impl GuardOutcome {
    /// Whether facts are still loading
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the outcome allows the action (pending does not)
    pub fn allows(&self) -> bool {
        matches!(
            self,
            Self::Decided {
                verdict: Verdict::Allow,
                ..
            }
        )
    }

    /// The verdict, regardless of which session it was computed for
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Decided { verdict, .. } => Some(verdict),
            Self::Pending => None,
        }
    }

    /// Extract the verdict only if it was computed for `live_session`
    ///
    /// A verdict is only valid paired with the identity snapshot it was
    /// computed from; outcomes for a session that has since changed are
    /// discarded, not applied.
    pub fn into_current(self, live_session: SessionId) -> Option<Verdict> {
        match self {
            Self::Decided {
                session_id,
                verdict,
            } if session_id == live_session => Some(verdict),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_neither_allows_nor_denies() {
        let outcome = GuardOutcome::Pending;
        assert!(outcome.is_pending());
        assert!(!outcome.allows());
        assert!(outcome.verdict().is_none());
    }

    #[test]
    fn stale_session_outcome_is_discarded() {
        let decided_for = SessionId::new();
        let outcome = GuardOutcome::Decided {
            session_id: decided_for,
            verdict: Verdict::Allow,
        };
        assert_eq!(outcome.clone().into_current(decided_for), Some(Verdict::Allow));
        assert_eq!(outcome.into_current(SessionId::new()), None);
    }
}
