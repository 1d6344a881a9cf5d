//! Static policy configuration surface
//!
//! The policy table is loaded once at process/session start from a static
//! document with three named lists. It is never mutated live; the table is
//! append-friendly in source control but never silently shadows: a
//! duplicate or conflicting rule is a configuration error, not a runtime
//! merge.

use serde::Deserialize;

/// Static policy document
///
/// ```toml
/// child_allowed = ["/dashboard/calendar", "/dashboard/messages"]
/// parent_only   = ["/dashboard/children", "/dashboard/expenses"]
/// premium       = ["/dashboard/expenses"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Resources a minor or restricted-third-party account may reach
    #[serde(default)]
    pub child_allowed: Vec<String>,
    /// Resources requiring a parent-level role
    #[serde(default)]
    pub parent_only: Vec<String>,
    /// Resources requiring a paid capability
    #[serde(default)]
    pub premium: Vec<String>,
}

/// Errors rejected when loading the policy document
#[derive(Debug, Clone, thiserror::Error)]
pub enum PolicyConfigError {
    /// The document is not valid TOML
    #[error("policy document parse error: {message}")]
    Parse {
        /// Parser detail
        message: String,
    },

    /// Two rules for the same resource within one list
    #[error("duplicate rule for {resource_id} in {list}")]
    DuplicateRule {
        /// Which list held the duplicate
        list: &'static str,
        /// The duplicated resource identifier
        resource_id: String,
    },

    /// A resource listed as both child-allowed and parent-only; the two
    /// lists would give contradictory outcomes
    #[error("conflicting rule for {resource_id}: child_allowed and parent_only")]
    ConflictingRule {
        /// The conflicted resource identifier
        resource_id: String,
    },

    /// An empty rule would prefix-match every resource
    #[error("empty rule in {list}")]
    EmptyRule {
        /// Which list held the empty rule
        list: &'static str,
    },
}

impl PolicyConfig {
    /// Parse the TOML policy document
    pub fn from_toml_str(document: &str) -> Result<Self, PolicyConfigError> {
        toml::from_str(document).map_err(|err| PolicyConfigError::Parse {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_named_lists() {
        let config = PolicyConfig::from_toml_str(
            r#"
            child_allowed = ["/dashboard/calendar"]
            parent_only = ["/dashboard/children"]
            premium = ["/dashboard/expenses"]
            "#,
        )
        .unwrap();
        assert_eq!(config.child_allowed, vec!["/dashboard/calendar"]);
        assert_eq!(config.parent_only, vec!["/dashboard/children"]);
        assert_eq!(config.premium, vec!["/dashboard/expenses"]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let config = PolicyConfig::from_toml_str("child_allowed = []").unwrap();
        assert!(config.parent_only.is_empty());
        assert!(config.premium.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PolicyConfig::from_toml_str("grown_up_only = []").unwrap_err();
        assert!(matches!(err, PolicyConfigError::Parse { .. }));
    }
}
