//! Job config loading and validation.

use super::model::{JobConfig, Presubmit};
use crate::error::{ProtectError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

impl JobConfig {
    /// Load job config from a YAML file.
    ///
    /// Only the top-level `presubmits` key is read; other keys are ignored so
    /// the same file can hold postsubmits and periodics.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ProtectError::UserError(format!(
                "failed to read job config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse job config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: JobConfig = serde_yaml::from_str(yaml).map_err(|e| {
            ProtectError::UserError(format!("failed to parse job config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the job tree.
    ///
    /// Validation rules:
    /// - keys are `org/repo`
    /// - every job has a name, unique within its repository (nested jobs included)
    /// - `always_run` and `run_if_changed` are mutually exclusive
    /// - `run_if_changed` is a valid regex
    pub fn validate(&self) -> Result<()> {
        for (key, jobs) in &self.presubmits {
            let valid_key = key
                .split_once('/')
                .is_some_and(|(org, repo)| !org.is_empty() && !repo.is_empty() && !repo.contains('/'));
            if !valid_key {
                return Err(ProtectError::UserError(format!(
                    "job config validation failed: presubmits key '{}' must have the form org/repo",
                    key
                )));
            }

            let mut seen = HashSet::new();
            validate_jobs(key, jobs, &mut seen)?;
        }

        Ok(())
    }
}

fn validate_jobs<'a>(
    repo: &str,
    jobs: &'a [Presubmit],
    seen: &mut HashSet<&'a str>,
) -> Result<()> {
    for job in jobs {
        if job.name.is_empty() {
            return Err(ProtectError::UserError(format!(
                "job config validation failed: {} has a presubmit without a name",
                repo
            )));
        }

        if !seen.insert(job.name.as_str()) {
            return Err(ProtectError::UserError(format!(
                "job config validation failed: duplicate presubmit name '{}' in {}",
                job.name, repo
            )));
        }

        if let Some(pattern) = &job.run_if_changed {
            if job.always_run {
                return Err(ProtectError::UserError(format!(
                    "job config validation failed: {} in {} sets both always_run and run_if_changed",
                    job.name, repo
                )));
            }
            Regex::new(pattern).map_err(|e| {
                ProtectError::UserError(format!(
                    "invalid regex pattern in run_if_changed of {}: '{}' - {}",
                    job.name, pattern, e
                ))
            })?;
        }

        validate_jobs(repo, &job.run_after_success, seen)?;
    }

    Ok(())
}
