use crate::config::{Config, ProtectionConfig};
use crate::jobs::{Brancher, JobConfig, Presubmit};

/// A presubmit that only runs when triggered by a parent job.
pub(crate) fn job(name: &str) -> Presubmit {
    Presubmit {
        name: name.to_string(),
        ..Default::default()
    }
}

/// A presubmit that runs on every pull request.
pub(crate) fn always_run(name: &str) -> Presubmit {
    Presubmit {
        always_run: true,
        ..job(name)
    }
}

/// Restrict a job to the given branches.
pub(crate) fn on_branches(job: Presubmit, branches: &[&str]) -> Presubmit {
    Presubmit {
        brancher: Brancher::only(branches.iter().copied()).unwrap(),
        ..job
    }
}

/// Attach `run_after_success` children to a job.
pub(crate) fn then(job: Presubmit, children: Vec<Presubmit>) -> Presubmit {
    Presubmit {
        run_after_success: children,
        ..job
    }
}

/// Job config with presubmits for a single `org/repo`.
pub(crate) fn jobs_for(org_repo: &str, presubmits: Vec<Presubmit>) -> JobConfig {
    let mut config = JobConfig::default();
    config.presubmits.insert(org_repo.to_string(), presubmits);
    config
}

/// Parse a `branch-protection` YAML body (without the top-level key).
pub(crate) fn protection(yaml: &str) -> ProtectionConfig {
    let indented: String = yaml
        .lines()
        .map(|line| format!("  {}\n", line))
        .collect();
    Config::from_yaml(&format!("branch-protection:\n{}", indented))
        .unwrap_or_else(|e| panic!("invalid test config: {}\n{}", e, yaml))
        .branch_protection
}
