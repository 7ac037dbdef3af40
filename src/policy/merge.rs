//! Merging of parent and child policies.
//!
//! Rules, applied field by field:
//! - tri-state values: the child's value wins when set, otherwise the parent's
//! - string sets: union; a child can add entries but never remove them
//! - nested structs: merged recursively; unset on both sides stays unset

use super::types::{ContextPolicy, DismissalRestrictions, Policy, Restrictions, ReviewPolicy};
use crate::error::{ProtectError, Result};
use std::collections::BTreeSet;

/// Apply a child policy on top of its parent.
///
/// Neither input is modified. `apply(p, &Policy::default()) == *p` and
/// `apply(&Policy::default(), c) == *c` for every policy.
pub fn apply(parent: &Policy, child: &Policy) -> Policy {
    Policy {
        protect: select_bool(parent.protect, child.protect),
        required_status_checks: merge_nested(
            &parent.required_status_checks,
            &child.required_status_checks,
            merge_context_policy,
        ),
        enforce_admins: select_bool(parent.enforce_admins, child.enforce_admins),
        restrictions: merge_nested(&parent.restrictions, &child.restrictions, merge_restrictions),
        required_pull_request_reviews: merge_nested(
            &parent.required_pull_request_reviews,
            &child.required_pull_request_reviews,
            merge_review_policy,
        ),
        required_linear_history: select_bool(
            parent.required_linear_history,
            child.required_linear_history,
        ),
        allow_force_pushes: select_bool(parent.allow_force_pushes, child.allow_force_pushes),
        allow_deletions: select_bool(parent.allow_deletions, child.allow_deletions),
        exclude: union_strings(&parent.exclude, &child.exclude),
    }
}

/// Merge two policies that must not overlap.
///
/// Fails with [`ProtectError::MergeConflict`] naming the first field that is
/// set on both sides (for sets: non-empty on both sides). When nothing
/// overlaps the result equals `apply(a, b)`.
pub fn merge_strict(a: &Policy, b: &Policy) -> Result<Policy> {
    let mut conflicts = Conflicts::default();

    conflicts.scalar("protect", &a.protect, &b.protect);
    conflicts.nested(
        &a.required_status_checks,
        &b.required_status_checks,
        |c, x, y| {
            c.set("required_status_checks.contexts", &x.contexts, &y.contexts);
            c.scalar("required_status_checks.strict", &x.strict, &y.strict);
        },
    );
    conflicts.scalar("enforce_admins", &a.enforce_admins, &b.enforce_admins);
    conflicts.nested(&a.restrictions, &b.restrictions, |c, x, y| {
        c.set("restrictions.users", &x.users, &y.users);
        c.set("restrictions.teams", &x.teams, &y.teams);
    });
    conflicts.nested(
        &a.required_pull_request_reviews,
        &b.required_pull_request_reviews,
        |c, x, y| {
            c.scalar(
                "required_pull_request_reviews.required_approving_review_count",
                &x.required_approving_review_count,
                &y.required_approving_review_count,
            );
            c.scalar(
                "required_pull_request_reviews.dismiss_stale_reviews",
                &x.dismiss_stale_reviews,
                &y.dismiss_stale_reviews,
            );
            c.scalar(
                "required_pull_request_reviews.require_code_owner_reviews",
                &x.require_code_owner_reviews,
                &y.require_code_owner_reviews,
            );
            c.nested(
                &x.dismissal_restrictions,
                &y.dismissal_restrictions,
                |c, x, y| {
                    c.set(
                        "required_pull_request_reviews.dismissal_restrictions.users",
                        &x.users,
                        &y.users,
                    );
                    c.set(
                        "required_pull_request_reviews.dismissal_restrictions.teams",
                        &x.teams,
                        &y.teams,
                    );
                },
            );
        },
    );
    conflicts.scalar(
        "required_linear_history",
        &a.required_linear_history,
        &b.required_linear_history,
    );
    conflicts.scalar("allow_force_pushes", &a.allow_force_pushes, &b.allow_force_pushes);
    conflicts.scalar("allow_deletions", &a.allow_deletions, &b.allow_deletions);
    conflicts.set("exclude", &a.exclude, &b.exclude);

    match conflicts.first {
        Some(field) => Err(ProtectError::MergeConflict { field }),
        None => Ok(apply(a, b)),
    }
}

/// Pick the child's value if it is set, otherwise the parent's.
pub fn select_bool(parent: Option<bool>, child: Option<bool>) -> Option<bool> {
    child.or(parent)
}

/// Same as [`select_bool`] for numeric settings such as review counts.
pub fn select_count(parent: Option<u32>, child: Option<u32>) -> Option<u32> {
    child.or(parent)
}

/// Union of two string sets.
pub fn union_strings(parent: &BTreeSet<String>, child: &BTreeSet<String>) -> BTreeSet<String> {
    parent.union(child).cloned().collect()
}

fn merge_nested<T: Clone>(
    parent: &Option<T>,
    child: &Option<T>,
    merge: fn(&T, &T) -> T,
) -> Option<T> {
    match (parent, child) {
        (None, None) => None,
        (Some(p), None) => Some(p.clone()),
        (None, Some(c)) => Some(c.clone()),
        (Some(p), Some(c)) => Some(merge(p, c)),
    }
}

fn merge_context_policy(parent: &ContextPolicy, child: &ContextPolicy) -> ContextPolicy {
    ContextPolicy {
        contexts: union_strings(&parent.contexts, &child.contexts),
        strict: select_bool(parent.strict, child.strict),
    }
}

fn merge_restrictions(parent: &Restrictions, child: &Restrictions) -> Restrictions {
    Restrictions {
        users: union_strings(&parent.users, &child.users),
        teams: union_strings(&parent.teams, &child.teams),
    }
}

fn merge_review_policy(parent: &ReviewPolicy, child: &ReviewPolicy) -> ReviewPolicy {
    ReviewPolicy {
        required_approving_review_count: select_count(
            parent.required_approving_review_count,
            child.required_approving_review_count,
        ),
        dismiss_stale_reviews: select_bool(parent.dismiss_stale_reviews, child.dismiss_stale_reviews),
        require_code_owner_reviews: select_bool(
            parent.require_code_owner_reviews,
            child.require_code_owner_reviews,
        ),
        dismissal_restrictions: merge_nested(
            &parent.dismissal_restrictions,
            &child.dismissal_restrictions,
            merge_dismissal_restrictions,
        ),
    }
}

fn merge_dismissal_restrictions(
    parent: &DismissalRestrictions,
    child: &DismissalRestrictions,
) -> DismissalRestrictions {
    DismissalRestrictions {
        users: union_strings(&parent.users, &child.users),
        teams: union_strings(&parent.teams, &child.teams),
    }
}

/// Records the first overlapping field seen during a strict merge.
#[derive(Default)]
struct Conflicts {
    first: Option<String>,
}

impl Conflicts {
    fn scalar<T>(&mut self, field: &str, a: &Option<T>, b: &Option<T>) {
        if a.is_some() && b.is_some() {
            self.record(field);
        }
    }

    fn set(&mut self, field: &str, a: &BTreeSet<String>, b: &BTreeSet<String>) {
        if !a.is_empty() && !b.is_empty() {
            self.record(field);
        }
    }

    fn nested<T>(
        &mut self,
        a: &Option<T>,
        b: &Option<T>,
        check: impl FnOnce(&mut Self, &T, &T),
    ) {
        if let (Some(a), Some(b)) = (a, b) {
            check(self, a, b);
        }
    }

    fn record(&mut self, field: &str) {
        if self.first.is_none() {
            self.first = Some(field.to_string());
        }
    }
}
