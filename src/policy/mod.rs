//! Branch protection policy values and the merge engine.
//!
//! A [`Policy`] is a partially-specified record: every field may be absent,
//! meaning "inherit from the parent level". Policies are combined with
//! [`apply`], which is pure and deterministic, or with [`merge_strict`] when
//! two policies must not overlap at all.

mod merge;
mod types;


pub use merge::{apply, merge_strict, select_bool, select_count, union_strings};
pub use types::{ContextPolicy, DismissalRestrictions, Policy, Restrictions, ReviewPolicy};
