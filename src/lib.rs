//! Branch-protection policy resolution for Prow-managed repositories.
//!
//! Given the `branch-protection` hierarchy (global, org, repo, branch) and
//! the presubmit jobs of each repository, [`resolve::resolve`] computes the
//! protection policy a branch should have, including the status-check
//! contexts its required jobs report. The result is deterministic, so an
//! applier can diff it against live settings before mutating anything.
//!
//! ```
//! use branchprotector::config::Config;
//! use branchprotector::jobs::JobConfig;
//! use branchprotector::resolve::resolve;
//!
//! let config = Config::from_yaml(
//!     "branch-protection:\n  orgs:\n    org:\n      protect: true\n",
//! )
//! .unwrap();
//! let jobs = JobConfig::from_yaml(
//!     "presubmits:\n  org/repo:\n    - name: unit\n      always_run: true\n",
//! )
//! .unwrap();
//!
//! let policy = resolve("org", "repo", "master", &config.branch_protection, &jobs).unwrap();
//! assert_eq!(policy.protect, Some(true));
//! assert_eq!(policy.required_contexts(), vec!["unit"]);
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod jobs;
pub mod policy;
pub mod resolve;

#[cfg(test)]
mod test_support;

pub use error::{ProtectError, Result};
pub use policy::Policy;
