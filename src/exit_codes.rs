//! Exit code constants for the branchprotector CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or invalid config files)
//! - 2: Policy failure (a configured branch resolved to an invalid policy)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, malformed YAML or patterns.
pub const USER_ERROR: i32 = 1;

/// Policy failure: undecided protection, requirements on a disabled branch,
/// or a strict merge conflict.
pub const POLICY_FAILURE: i32 = 2;
