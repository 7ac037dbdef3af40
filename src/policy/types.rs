//! Policy value types.
//!
//! Field names follow the hosting platform's branch-protection schema so a
//! resolved policy serializes directly into what the applier sends.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Protection settings for a branch, or an inheritable layer of them.
///
/// `None` on a tri-state field means "not decided at this level". An empty
/// set means "nothing added at this level".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Whether protection is enabled at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect: Option<bool>,

    /// Status checks that must pass before merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<ContextPolicy>,

    /// Apply the rules to repository administrators too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,

    /// Who may push directly to the branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,

    /// Pull request review requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_pull_request_reviews: Option<ReviewPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_linear_history: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_force_pushes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deletions: Option<bool>,

    /// Glob patterns; branches matching any of them are left unprotected.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub exclude: BTreeSet<String>,
}

/// Required status checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextPolicy {
    /// Status-check contexts that must pass.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub contexts: BTreeSet<String>,

    /// Require the branch to be up to date with the base before merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Push restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restrictions {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub users: BTreeSet<String>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub teams: BTreeSet<String>,
}

/// Pull request review requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPolicy {
    /// Number of approving reviews required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,

    /// Dismiss approvals when new commits are pushed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,

    /// Require a review from a code owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,

    /// Who may dismiss reviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissal_restrictions: Option<DismissalRestrictions>,
}

/// Users and teams allowed to dismiss pull request reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissalRestrictions {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub users: BTreeSet<String>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub teams: BTreeSet<String>,
}

impl Policy {
    /// A policy that only decides protection on or off.
    pub fn protected(protect: bool) -> Self {
        Self {
            protect: Some(protect),
            ..Default::default()
        }
    }

    /// A policy that only requires the given status-check contexts.
    pub fn with_contexts<I, S>(contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_status_checks: Some(ContextPolicy {
                contexts: contexts.into_iter().map(Into::into).collect(),
                strict: None,
            }),
            ..Default::default()
        }
    }

    /// True when no field is set at all.
    pub fn is_unset(&self) -> bool {
        *self == Policy::default()
    }

    /// True when the policy demands something that only makes sense on a
    /// protected branch: required contexts, push restrictions, or reviews.
    pub fn has_requirements(&self) -> bool {
        let contexts = self
            .required_status_checks
            .as_ref()
            .is_some_and(|checks| !checks.contexts.is_empty());
        let restrictions = self
            .restrictions
            .as_ref()
            .is_some_and(|r| !r.users.is_empty() || !r.teams.is_empty());
        let reviews = self
            .required_pull_request_reviews
            .as_ref()
            .is_some_and(|reviews| !reviews.is_unset());

        contexts || restrictions || reviews
    }

    /// The required status-check contexts, sorted.
    pub fn required_contexts(&self) -> Vec<String> {
        self.required_status_checks
            .as_ref()
            .map(|checks| checks.contexts.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether protection resolved to enabled.
    pub fn is_protected(&self) -> bool {
        self.protect == Some(true)
    }

    /// Whether protection was explicitly disabled.
    pub fn is_disabled(&self) -> bool {
        self.protect == Some(false)
    }
}

impl ReviewPolicy {
    pub fn is_unset(&self) -> bool {
        *self == ReviewPolicy::default()
    }
}
