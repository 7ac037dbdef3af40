//! Required status-check contexts derived from presubmit jobs.

use crate::jobs::Presubmit;
use crate::policy::{ContextPolicy, Policy};
use std::collections::BTreeSet;

/// Contexts that must pass on `branch`, sorted and deduplicated.
///
/// A job is visited when it runs against the branch and either triggers on
/// its own (`always_run` or `run_if_changed`) or is reached through
/// `run_after_success` of a visited job. A visited job contributes its
/// context unless it is `optional` or `skip_report`.
pub fn required_contexts(jobs: &[Presubmit], branch: &str) -> Vec<String> {
    let mut required = BTreeSet::new();
    job_requirements(jobs, branch, false, &mut required);
    required.into_iter().collect()
}

/// Depth-first walk over `jobs` and their `run_after_success` children.
///
/// `after_success` is true for children of a visited job; they are visited
/// whether or not they trigger on their own.
pub fn job_requirements(
    jobs: &[Presubmit],
    branch: &str,
    after_success: bool,
    required: &mut BTreeSet<String>,
) {
    for job in jobs {
        if !job.runs_against_branch(branch) {
            continue;
        }

        // Never triggered, so neither it nor its children report
        if !after_success && !job.triggers_automatically() {
            continue;
        }

        if !job.skip_report && !job.optional {
            required.insert(job.context().to_string());
        }

        job_requirements(&job.run_after_success, branch, true, required);
    }
}

/// The override merged last into a branch policy with required jobs.
///
/// Sets `protect: true` only when `protect_tested` is on and there is at
/// least one context.
pub fn required_contexts_policy(contexts: &[String], protect_tested: bool) -> Policy {
    if contexts.is_empty() {
        return Policy::default();
    }

    Policy {
        protect: protect_tested.then_some(true),
        required_status_checks: Some(ContextPolicy {
            contexts: contexts.iter().cloned().collect(),
            strict: None,
        }),
        ..Default::default()
    }
}
