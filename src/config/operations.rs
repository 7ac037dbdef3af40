//! Config loading, validation, and serialization.

use super::model::{Config, ProtectionConfig};
use crate::error::{ProtectError, Result};
use crate::policy::Policy;
use globset::Glob;
use std::path::Path;

/// Largest approving-review count the hosting platform accepts.
pub const MAX_REQUIRED_APPROVALS: u32 = 6;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Keys other than `branch-protection` are ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ProtectError::UserError)` - Read or parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ProtectError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ProtectError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.branch_protection.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ProtectError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }
}

impl ProtectionConfig {
    /// Validate the hierarchy.
    ///
    /// Validation rules:
    /// - org, repo and branch names are non-empty
    /// - every `exclude` entry is a valid glob
    /// - `required_approving_review_count` is at most [`MAX_REQUIRED_APPROVALS`]
    ///
    /// Whether each configured branch resolves to a valid policy is checked
    /// at resolution time, not here.
    pub fn validate(&self) -> Result<()> {
        validate_policy_fields(&self.policy, "branch-protection")?;

        for (org_name, org) in &self.orgs {
            check_name(org_name, "org", "branch-protection")?;
            validate_policy_fields(&org.policy, org_name)?;

            for (repo_name, repo) in &org.repos {
                let scope = format!("{}/{}", org_name, repo_name);
                check_name(repo_name, "repo", org_name)?;
                validate_policy_fields(&repo.policy, &scope)?;

                for (branch_name, branch) in &repo.branches {
                    check_name(branch_name, "branch", &scope)?;
                    validate_policy_fields(
                        &branch.policy,
                        &format!("{}={}", scope, branch_name),
                    )?;
                }
            }
        }

        Ok(())
    }
}

fn check_name(name: &str, kind: &str, scope: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ProtectError::UserError(format!(
            "config validation failed: empty {} name under {}",
            kind, scope
        )));
    }
    Ok(())
}

fn validate_policy_fields(policy: &Policy, scope: &str) -> Result<()> {
    for pattern in &policy.exclude {
        Glob::new(pattern).map_err(|e| {
            ProtectError::UserError(format!(
                "invalid glob pattern in exclude of {}: '{}' - {}",
                scope, pattern, e
            ))
        })?;
    }

    let approvals = policy
        .required_pull_request_reviews
        .as_ref()
        .and_then(|reviews| reviews.required_approving_review_count);
    if let Some(count) = approvals {
        if count > MAX_REQUIRED_APPROVALS {
            return Err(ProtectError::UserError(format!(
                "config validation failed: {} requires {} approving reviews, the maximum is {}",
                scope, count, MAX_REQUIRED_APPROVALS
            )));
        }
    }

    Ok(())
}
