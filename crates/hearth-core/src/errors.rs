//! Unified error handling for Hearth core operations
//!
//! One small error type for the whole authorization surface. A
//! [`crate::verdict::SecurityViolation`] is intentionally NOT a variant
//! here: it propagates as its own signal so it cannot be swallowed by
//! generic error handling.

use serde::{Deserialize, Serialize};

/// Unified error type for Hearth operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum HearthError {
    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// What was invalid
        message: String,
    },

    /// A collaborator (identity store, billing facts, audit sink) was
    /// unreachable; callers must fail closed, never fall back to a
    /// last-known-good verdict
    #[error("Transient: {message}")]
    Transient {
        /// What failed
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// What failed
        message: String,
    },
}

impl HearthError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a transient collaborator error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether retrying against the collaborator could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Standard Result type for Hearth operations
pub type Result<T> = std::result::Result<T, HearthError>;
