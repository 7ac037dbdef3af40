//! Presubmit job configuration.
//!
//! This module defines the job tree consumed by the required-context
//! deriver: presubmits keyed by `org/repo`, each optionally owning the jobs
//! that run after it succeeds. Branch matching patterns are compiled when the
//! YAML is deserialized, so matching itself never fails.

mod brancher;
mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use brancher::Brancher;
pub use model::{JobConfig, Presubmit};
