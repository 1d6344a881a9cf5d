//! The route policy table
//!
//! Two independently consulted rule sets matter operationally: the
//! child-allowed allow-list and the parent-only deny-list. They are kept
//! separate rather than collapsed into one table because a resource can be
//! absent from both; that ambiguity resolves fail-closed: deny by default
//! for restricted roles, allow by default for parent roles.

use super::config::{PolicyConfig, PolicyConfigError};
use hearth_core::FamilyRole;
use std::collections::HashSet;

/// Read-only policy table consulted by the decision engine
///
/// Built once from a [`PolicyConfig`]; no mutation after construction.
#[derive(Debug, Clone)]
pub struct RoutePolicyTable {
    child_allowed: Vec<String>,
    parent_only: Vec<String>,
    premium: Vec<String>,
}

/// Exact match, or prefix match on a path-separator boundary.
///
/// `/dashboard/ca` must not match rule `/dashboard/calendar`, and path
/// `/dashboard/calendar-export` must not match either; only
/// `/dashboard/calendar` itself or `/dashboard/calendar/...` do.
fn rule_matches(rule: &str, resource_id: &str) -> bool {
    resource_id == rule
        || (resource_id.len() > rule.len()
            && resource_id.starts_with(rule)
            && resource_id.as_bytes()[rule.len()] == b'/')
}

fn validate_list(list: &'static str, rules: &[String]) -> Result<(), PolicyConfigError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if rule.is_empty() {
            return Err(PolicyConfigError::EmptyRule { list });
        }
        if !seen.insert(rule.as_str()) {
            return Err(PolicyConfigError::DuplicateRule {
                list,
                resource_id: rule.clone(),
            });
        }
    }
    Ok(())
}

impl RoutePolicyTable {
    /// Validate and build the table from a parsed policy document
    pub fn from_config(config: PolicyConfig) -> Result<Self, PolicyConfigError> {
        validate_list("child_allowed", &config.child_allowed)?;
        validate_list("parent_only", &config.parent_only)?;
        validate_list("premium", &config.premium)?;

        let parent_only: HashSet<&str> = config.parent_only.iter().map(String::as_str).collect();
        for rule in &config.child_allowed {
            if parent_only.contains(rule.as_str()) {
                return Err(PolicyConfigError::ConflictingRule {
                    resource_id: rule.clone(),
                });
            }
        }

        Ok(Self {
            child_allowed: config.child_allowed,
            parent_only: config.parent_only,
            premium: config.premium,
        })
    }

    /// Load directly from the TOML policy document
    pub fn from_toml_str(document: &str) -> Result<Self, PolicyConfigError> {
        Self::from_config(PolicyConfig::from_toml_str(document)?)
    }

    /// An empty table: every resource is unmapped (parents allowed,
    /// restricted roles denied)
    pub fn empty() -> Self {
        Self {
            child_allowed: Vec::new(),
            parent_only: Vec::new(),
            premium: Vec::new(),
        }
    }

    /// Whether the resource requires a parent-level role
    pub fn requires_parent(&self, resource_id: &str) -> bool {
        self.parent_only.iter().any(|rule| rule_matches(rule, resource_id))
    }

    /// Whether the resource is on the child-allowed list
    pub fn is_child_allowed(&self, resource_id: &str) -> bool {
        self.child_allowed.iter().any(|rule| rule_matches(rule, resource_id))
    }

    /// Whether the resource requires a paid capability
    pub fn requires_entitlement(&self, resource_id: &str) -> bool {
        self.premium.iter().any(|rule| rule_matches(rule, resource_id))
    }

    /// Role admissibility for a resource, independent of tier and
    /// invariants
    ///
    /// An unrecognized `resource_id` is not an error: it falls through to
    /// default-allow for parent roles and default-deny for restricted
    /// roles.
    pub fn is_role_admitted(&self, resource_id: &str, role: FamilyRole) -> bool {
        if role.is_parent() {
            return true;
        }
        !self.requires_parent(resource_id) && self.is_child_allowed(resource_id)
    }
}
