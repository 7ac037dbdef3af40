//! Branch-protection configuration.
//!
//! This module defines the policy hierarchy read from the `branch-protection`
//! section of a Prow config file: a global policy, then per-org, per-repo and
//! per-branch overrides. Unknown keys are ignored so the loader can be pointed
//! at a complete Prow `config.yaml`.

mod model;
mod operations;


pub use model::{BranchConfig, Config, OrgConfig, ProtectionConfig, RepoConfig};
pub use operations::MAX_REQUIRED_APPROVALS;
