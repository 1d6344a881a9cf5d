//! Cross-module properties of the decision pipeline
//!
//! Exercises the engine the way guards consume it: a loaded policy table,
//! resolved entitlement facts, and identity snapshots, covering the
//! fail-closed defaults, precedence rules, and boundary conditions.

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, Utc};
use hearth_authorization::{
    resolve_facts, AuthorizationDecisionEngine, EntitlementAccess, EntitlementFacts,
    MemoryAuditSink, PolicyConfig, RoutePolicyTable, SecurityInvariantEnforcer,
};
use hearth_core::{
    AccessReason, AccountId, DenialReason, FamilyRole, IdentityFacts, SecurityInvariant, Verdict,
};
use proptest::prelude::*;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn engine() -> AuthorizationDecisionEngine {
    let table = RoutePolicyTable::from_config(PolicyConfig {
        child_allowed: vec!["/dashboard/calendar".into(), "/dashboard/messages".into()],
        parent_only: vec!["/dashboard/children".into(), "/dashboard/expenses".into()],
        premium: vec!["/dashboard/expenses".into()],
    })
    .unwrap();
    let enforcer = SecurityInvariantEnforcer::new(Arc::new(MemoryAuditSink::new()));
    AuthorizationDecisionEngine::new(table, enforcer)
}

fn granted() -> EntitlementAccess {
    resolve_facts(&EntitlementFacts::paid(), now())
}

fn identity(role: FamilyRole) -> IdentityFacts {
    IdentityFacts::new(AccountId::new(), role, true)
}

fn any_role() -> impl Strategy<Value = FamilyRole> {
    prop_oneof![
        Just(FamilyRole::ParentPrimary),
        Just(FamilyRole::ParentSecondary),
        Just(FamilyRole::RestrictedThirdParty),
        Just(FamilyRole::Child),
    ]
}

fn unmapped_resource() -> impl Strategy<Value = String> {
    // Segments that never collide with the configured rules.
    "[a-bd-z]{1,8}".prop_map(|segment| format!("/settings/{segment}"))
}

proptest! {
    // Default-deny-for-restricted invariant: unmapped resources deny
    // restricted roles and allow parents.
    #[test]
    fn unmapped_resources_fail_closed_for_restricted_roles(
        role in any_role(),
        resource in unmapped_resource(),
    ) {
        let verdict = engine().decide(&identity(role), &resource, &granted(), now());
        if role.is_parent() {
            prop_assert_eq!(verdict, Verdict::Allow);
        } else {
            prop_assert!(verdict.is_denied());
        }
    }

    // Precedence invariant: admin_free_access grants regardless of any
    // other fact combination.
    #[test]
    fn admin_free_access_wins_over_any_facts(
        tier_paid in any::<bool>(),
        trial_offset_days in -30i64..30,
        has_trial in any::<bool>(),
    ) {
        let facts = EntitlementFacts {
            tier: if tier_paid {
                hearth_authorization::BillingTier::Paid
            } else {
                hearth_authorization::BillingTier::Free
            },
            trial_ends_at: has_trial.then(|| now() + Duration::days(trial_offset_days)),
            admin_free_access: true,
        };
        let access = resolve_facts(&facts, now());
        prop_assert!(access.effective_access);
        prop_assert_eq!(access.reason, AccessReason::FreeAccess);
    }

    // Idempotence: no hidden counters in the decision path.
    #[test]
    fn decide_twice_yields_identical_verdicts(
        role in any_role(),
        resource in unmapped_resource(),
    ) {
        let engine = engine();
        let snapshot = identity(role);
        let access = granted();
        let first = engine.decide(&snapshot, &resource, &access, now());
        let second = engine.decide(&snapshot, &resource, &access, now());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn scenario_third_party_on_children_route() {
    let verdict = engine().decide(
        &identity(FamilyRole::RestrictedThirdParty),
        "/dashboard/children",
        &granted(),
        now(),
    );
    assert_matches!(
        verdict,
        Verdict::Deny {
            reason: DenialReason::RequiresParentRole
        }
    );
}

#[test]
fn scenario_child_on_messages_with_login_enabled() {
    let verdict = engine().decide(
        &identity(FamilyRole::Child),
        "/dashboard/messages",
        &granted(),
        now(),
    );
    assert_eq!(verdict, Verdict::Allow);
}

#[test]
fn scenario_child_on_messages_with_login_disabled() {
    let child = IdentityFacts::new(AccountId::new(), FamilyRole::Child, false);
    let verdict = engine().decide(&child, "/dashboard/messages", &granted(), now());
    assert_matches!(
        verdict,
        Verdict::SecurityViolation(v)
            if v.invariant == SecurityInvariant::LoginDisabledSession
    );
}

#[test]
fn scenario_expired_trial_on_premium_resource() {
    let facts = EntitlementFacts {
        tier: hearth_authorization::BillingTier::Free,
        trial_ends_at: Some(now() - Duration::days(1)),
        admin_free_access: false,
    };
    let access = resolve_facts(&facts, now());
    assert_eq!(access.days_remaining, Some(0));

    let verdict = engine().decide(
        &identity(FamilyRole::ParentPrimary),
        "/dashboard/expenses",
        &access,
        now(),
    );
    assert_matches!(
        verdict,
        Verdict::Deny {
            reason: DenialReason::EntitlementExpired
        }
    );
}

#[test]
fn scenario_admin_free_access_with_expired_trial() {
    let facts = EntitlementFacts::trial(now() - Duration::days(1)).with_admin_free_access();
    let access = resolve_facts(&facts, now());
    assert!(access.effective_access);
    assert_eq!(access.reason, AccessReason::FreeAccess);
}

#[test]
fn trial_boundary_is_strict() {
    // trial_ends_at exactly equal to now is expired, not active.
    let access = resolve_facts(&EntitlementFacts::trial(now()), now());
    assert!(!access.effective_access);
    assert_eq!(access.reason, AccessReason::Expired);

    // One second earlier and the trial is still active.
    let access = resolve_facts(&EntitlementFacts::trial(now() + Duration::seconds(1)), now());
    assert!(access.effective_access);
    assert_eq!(access.reason, AccessReason::Trial);
    assert_eq!(access.days_remaining, Some(1));
}

#[test]
fn disabled_login_always_audited_per_account_in_order() {
    let sink = Arc::new(MemoryAuditSink::new());
    let table = RoutePolicyTable::from_config(PolicyConfig {
        child_allowed: vec!["/dashboard/messages".into()],
        ..PolicyConfig::default()
    })
    .unwrap();
    let engine =
        AuthorizationDecisionEngine::new(table, SecurityInvariantEnforcer::new(sink.clone()));

    let child = IdentityFacts::new(AccountId::new(), FamilyRole::Child, false);
    for resource in ["/dashboard/messages", "/dashboard/calendar"] {
        let verdict = engine.decide(&child, resource, &granted(), now());
        assert_matches!(verdict, Verdict::SecurityViolation(_));
    }

    let events = sink.events_for(child.account_id);
    assert_eq!(events.len(), 2);
    assert!(events[0].details.contains("/dashboard/messages"));
    assert!(events[1].details.contains("/dashboard/calendar"));
}
