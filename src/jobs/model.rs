//! Presubmit and job config definitions.

use super::brancher::Brancher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A presubmit job and the jobs that run after it succeeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Presubmit {
    /// Job name, unique within a repository.
    pub name: String,

    /// Status-check context reported for this job. Defaults to the name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,

    /// Run on every pull request.
    pub always_run: bool,

    /// Run when a changed file matches this regex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_if_changed: Option<String>,

    /// Failure does not block merge.
    pub optional: bool,

    /// Do not report a status context at all.
    pub skip_report: bool,

    #[serde(flatten)]
    pub brancher: Brancher,

    /// Jobs triggered once this one succeeds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run_after_success: Vec<Presubmit>,
}

impl Presubmit {
    /// The status-check context this job reports.
    pub fn context(&self) -> &str {
        if self.context.is_empty() {
            &self.name
        } else {
            &self.context
        }
    }

    pub fn runs_against_branch(&self, branch: &str) -> bool {
        self.brancher.runs_against(branch)
    }

    /// Whether the job triggers on its own, without a parent job succeeding.
    pub fn triggers_automatically(&self) -> bool {
        self.always_run || self.run_if_changed.is_some()
    }
}

/// The presubmit jobs of every repository, keyed by `org/repo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub presubmits: BTreeMap<String, Vec<Presubmit>>,
}

impl JobConfig {
    /// Presubmits configured for `org/repo`, or an empty slice.
    pub fn presubmits_for(&self, org: &str, repo: &str) -> &[Presubmit] {
        self.presubmits
            .get(&format!("{}/{}", org, repo))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
