//! Advisory reports about deliberately unprotected repos and branches.
//!
//! These only matter when an escape hatch (`allow_disabled_policies`,
//! `allow_disabled_job_policies`) turned what would be a resolution error
//! into a warning. They recompute the relevant part of each chain rather
//! than calling [`resolve`](super::resolve), so they never fail.

use super::contexts::required_contexts;
use super::{is_excluded, org_chain, resolve_chain};
use crate::config::ProtectionConfig;
use crate::jobs::JobConfig;
use crate::policy::apply;

/// `org/repo` entries whose own policy disables protection that the
/// global/org chain wanted, or that still carry protection settings.
///
/// Empty unless `allow_disabled_policies` is set. Sorted.
pub fn repos_with_disabled_policy(config: &ProtectionConfig) -> Vec<String> {
    if !config.allow_disabled_policies {
        return Vec::new();
    }

    let mut warnings = Vec::new();
    for (org_name, org) in &config.orgs {
        let org_policy = org_chain(&config.policy, org);

        for repo_name in org.repos.keys() {
            let Some(repo_policy) = resolve_chain(org_name, repo_name, config) else {
                continue;
            };
            if !repo_policy.is_disabled() {
                continue;
            }
            if org_policy.is_protected() || repo_policy.has_requirements() {
                warnings.push(format!("{}/{}", org_name, repo_name));
            }
        }
    }

    warnings
}

/// `org/repo=branch[,branch...]` entries for configured branches that end up
/// unprotected despite having required jobs. One entry per repo.
///
/// Branches matching an `exclude` glob are left out, since they are
/// unprotected on purpose. Empty unless `allow_disabled_job_policies` is
/// set. Entries and the branches inside each entry are sorted.
pub fn unprotected_branches(config: &ProtectionConfig, jobs: &JobConfig) -> Vec<String> {
    if !config.allow_disabled_job_policies {
        return Vec::new();
    }

    let mut warnings = Vec::new();
    for (org_name, org) in &config.orgs {
        for (repo_name, repo) in &org.repos {
            let Some(repo_policy) = resolve_chain(org_name, repo_name, config) else {
                continue;
            };
            let presubmits = jobs.presubmits_for(org_name, repo_name);

            let branches: Vec<&str> = repo
                .branches
                .iter()
                .filter(|(branch_name, branch)| {
                    let policy = apply(&repo_policy, &branch.policy);
                    policy.is_disabled()
                        && !matches!(is_excluded(&policy.exclude, branch_name), Ok(true))
                        && !required_contexts(presubmits, branch_name).is_empty()
                })
                .map(|(branch_name, _)| branch_name.as_str())
                .collect();

            if !branches.is_empty() {
                warnings.push(format!(
                    "{}/{}={}",
                    org_name,
                    repo_name,
                    branches.join(",")
                ));
            }
        }
    }

    warnings
}
