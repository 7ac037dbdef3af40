//! Resolution of every explicitly configured branch.

use super::{branch_target, resolve};
use crate::config::ProtectionConfig;
use crate::error::{ProtectError, Result};
use crate::jobs::JobConfig;
use crate::policy::Policy;
use tracing::{debug, warn};

/// The outcome of resolving one configured branch.
#[derive(Debug, Clone)]
pub struct PlannedBranch {
    pub org: String,
    pub repo: String,
    pub branch: String,
    pub outcome: Result<Policy>,
}

impl PlannedBranch {
    /// `org/repo=branch`.
    pub fn target(&self) -> String {
        branch_target(&self.org, &self.repo, &self.branch)
    }
}

/// Resolved policies for all configured branches, in config order.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub branches: Vec<PlannedBranch>,
}

impl Plan {
    /// Branches that resolved to a usable policy.
    pub fn policies(&self) -> impl Iterator<Item = (&PlannedBranch, &Policy)> {
        self.branches
            .iter()
            .filter_map(|planned| planned.outcome.as_ref().ok().map(|p| (planned, p)))
    }

    /// Branches that failed to resolve.
    pub fn errors(&self) -> impl Iterator<Item = (&PlannedBranch, &ProtectError)> {
        self.branches
            .iter()
            .filter_map(|planned| planned.outcome.as_ref().err().map(|e| (planned, e)))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Resolve every branch named in the config.
///
/// A failing branch does not stop the others; its error is recorded in the
/// plan and the caller decides what to do with it.
pub fn plan(config: &ProtectionConfig, jobs: &JobConfig) -> Plan {
    let mut branches = Vec::new();

    for (org, repo, branch) in config.configured_branches() {
        let outcome = resolve(org, repo, branch, config, jobs);
        match &outcome {
            Ok(_) => debug!(target_branch = %branch_target(org, repo, branch), "resolved"),
            Err(e) => warn!(error = %e, "failed to resolve branch policy"),
        }

        branches.push(PlannedBranch {
            org: org.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            outcome,
        });
    }

    Plan { branches }
}
