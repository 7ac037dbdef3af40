//! Branch policy resolution.
//!
//! Walks global -> org -> repo -> branch, applying each level's policy on top
//! of the previous one, then merges in the contexts required by presubmit
//! jobs and validates the result:
//!
//! ```text
//! config chain ──apply──▶ intermediate ──apply(job contexts)──▶ validate ──▶ Policy
//! ```
//!
//! Everything here is pure computation over borrowed, immutable inputs, so
//! callers may resolve many branches concurrently.

mod contexts;
mod plan;
mod report;
mod validation;


pub use contexts::{job_requirements, required_contexts, required_contexts_policy};
pub use plan::{Plan, PlannedBranch, plan};
pub use report::{repos_with_disabled_policy, unprotected_branches};
pub use validation::validate_policy;

use crate::config::{OrgConfig, ProtectionConfig};
use crate::error::{ProtectError, Result};
use crate::jobs::JobConfig;
use crate::policy::{Policy, apply};
use globset::{Glob, GlobSetBuilder};
use std::collections::BTreeSet;
use tracing::debug;

/// Resolve the effective protection policy of `org/repo=branch`.
///
/// # Returns
///
/// * `Ok(Policy::default())` - org not configured, or the branch is excluded
/// * `Ok(policy)` - the validated policy to apply
/// * `Err(ProtectError)` - the branch would resolve to an invalid policy
pub fn resolve(
    org: &str,
    repo: &str,
    branch: &str,
    config: &ProtectionConfig,
    jobs: &JobConfig,
) -> Result<Policy> {
    let target = branch_target(org, repo, branch);

    let Some(org_config) = config.org(org) else {
        debug!(target_branch = %target, "org not configured, leaving unprotected");
        return Ok(Policy::default());
    };

    let mut policy = org_chain(&config.policy, org_config);
    let mut explicit = false;

    if let Some(repo_config) = org_config.repo(repo) {
        policy = apply(&policy, &repo_config.policy);

        if let Some(branch_config) = repo_config.branch(branch) {
            policy = apply(&policy, &branch_config.policy);
            explicit = true;
        }
    }

    if is_excluded(&policy.exclude, branch)? {
        debug!(target_branch = %target, "branch matches an exclude pattern");
        return Ok(Policy::default());
    }

    let required = required_contexts(jobs.presubmits_for(org, repo), branch);
    if !required.is_empty() {
        if policy.is_disabled() {
            if !config.allow_disabled_job_policies {
                return Err(ProtectError::DisabledWithRequiredJobs { target });
            }
            tracing::warn!(
                target_branch = %target,
                jobs = required.len(),
                "protection disabled on a branch with required jobs"
            );
        } else {
            debug!(
                target_branch = %target,
                contexts = ?required,
                "requiring job contexts"
            );
            policy = apply(
                &policy,
                &required_contexts_policy(&required, config.protect_tested),
            );
        }
    }

    validate_policy(&target, policy, explicit, config.allow_disabled_policies)
}

/// The global -> org -> repo prefix of the chain, without branch overrides
/// or job contexts. `None` when the org is not configured.
pub fn resolve_chain(org: &str, repo: &str, config: &ProtectionConfig) -> Option<Policy> {
    let org_config = config.org(org)?;
    let policy = org_chain(&config.policy, org_config);

    Some(match org_config.repo(repo) {
        Some(repo_config) => apply(&policy, &repo_config.policy),
        None => policy,
    })
}

pub(super) fn org_chain(global: &Policy, org_config: &OrgConfig) -> Policy {
    apply(global, &org_config.policy)
}

/// `org/repo=branch`, the form used in errors and warnings.
pub fn branch_target(org: &str, repo: &str, branch: &str) -> String {
    format!("{}/{}={}", org, repo, branch)
}

/// Check `branch` against accumulated exclude globs.
pub(crate) fn is_excluded(patterns: &BTreeSet<String>, branch: &str) -> Result<bool> {
    if patterns.is_empty() {
        return Ok(false);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            ProtectError::UserError(format!(
                "invalid glob pattern in exclude: '{}' - {}",
                pattern, e
            ))
        })?;
        builder.add(glob);
    }

    let set = builder
        .build()
        .map_err(|e| ProtectError::UserError(format!("failed to compile exclude globs: {}", e)))?;

    Ok(set.is_match(branch))
}
