//! Config struct definitions.

use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Prow config file, reduced to the part this crate reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "branch-protection")]
    pub branch_protection: ProtectionConfig,
}

/// Global branch-protection settings and the per-org overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Policy applied to every configured org.
    #[serde(flatten)]
    pub policy: Policy,

    /// Turn protection on for any branch with at least one required job.
    #[serde(alias = "protect-tested-repos")]
    pub protect_tested: bool,

    /// Allow `protect: false` alongside protection settings; warn instead of failing.
    pub allow_disabled_policies: bool,

    /// Allow `protect: false` on branches with required jobs; the branch is
    /// left unprotected and reported.
    pub allow_disabled_job_policies: bool,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub orgs: BTreeMap<String, OrgConfig>,
}

/// Per-org overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgConfig {
    #[serde(flatten)]
    pub policy: Policy,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub repos: BTreeMap<String, RepoConfig>,
}

/// Per-repo overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    #[serde(flatten)]
    pub policy: Policy,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub branches: BTreeMap<String, BranchConfig>,
}

/// Per-branch overrides. A branch listed here must decide `protect`
/// somewhere along its chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchConfig {
    #[serde(flatten)]
    pub policy: Policy,
}

impl ProtectionConfig {
    pub fn org(&self, name: &str) -> Option<&OrgConfig> {
        self.orgs.get(name)
    }

    /// Every explicitly configured `(org, repo, branch)`, in sorted order.
    pub fn configured_branches(&self) -> Vec<(&str, &str, &str)> {
        let mut out = Vec::new();
        for (org_name, org) in &self.orgs {
            for (repo_name, repo) in &org.repos {
                for branch_name in repo.branches.keys() {
                    out.push((org_name.as_str(), repo_name.as_str(), branch_name.as_str()));
                }
            }
        }
        out
    }
}

impl OrgConfig {
    pub fn repo(&self, name: &str) -> Option<&RepoConfig> {
        self.repos.get(name)
    }
}

impl RepoConfig {
    pub fn branch(&self, name: &str) -> Option<&BranchConfig> {
        self.branches.get(name)
    }
}
