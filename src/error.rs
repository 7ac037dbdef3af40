//! Error types for branch-protection resolution.
//!
//! Uses thiserror for derive macros. Load errors carry a user-actionable
//! message; policy errors carry the `org/repo=branch` target they apply to.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for branchprotector operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtectError {
    /// Bad arguments, unreadable files, malformed YAML, or invalid patterns.
    #[error("{0}")]
    UserError(String),

    /// An explicitly configured branch never decided whether it is protected.
    #[error("{target}: protect should not be nil")]
    ProtectUnset { target: String },

    /// Protection is disabled while contexts, restrictions or reviews are required.
    #[error("{target}: required status checks / restrictions require protection")]
    DisabledWithRequirements { target: String },

    /// Protection is disabled on a branch that has required presubmit jobs.
    #[error("{target}: required jobs require branch protection")]
    DisabledWithRequiredJobs { target: String },

    /// Both sides of a strict merge set the same field.
    #[error("policy conflict: {field} is set on both sides")]
    MergeConflict { field: String },

    /// Some branches of a whole-config run failed; each was reported on its own.
    #[error("{0} configured branch(es) failed to resolve")]
    UnresolvedBranches(usize),
}

impl ProtectError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProtectError::UserError(_) => exit_codes::USER_ERROR,
            ProtectError::ProtectUnset { .. }
            | ProtectError::DisabledWithRequirements { .. }
            | ProtectError::DisabledWithRequiredJobs { .. }
            | ProtectError::MergeConflict { .. }
            | ProtectError::UnresolvedBranches(_) => exit_codes::POLICY_FAILURE,
        }
    }

    /// Whether this error describes an invalid resolved policy rather than bad input.
    pub fn is_policy_error(&self) -> bool {
        self.exit_code() == exit_codes::POLICY_FAILURE
    }
}

/// Result type alias for branchprotector operations.
pub type Result<T> = std::result::Result<T, ProtectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ProtectError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(!err.is_policy_error());
    }

    #[test]
    fn policy_errors_have_policy_exit_code() {
        let errors = [
            ProtectError::ProtectUnset {
                target: "org/repo=master".to_string(),
            },
            ProtectError::DisabledWithRequirements {
                target: "org/repo=master".to_string(),
            },
            ProtectError::DisabledWithRequiredJobs {
                target: "org/repo=master".to_string(),
            },
            ProtectError::MergeConflict {
                field: "protect".to_string(),
            },
            ProtectError::UnresolvedBranches(2),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_codes::POLICY_FAILURE);
            assert!(err.is_policy_error());
        }
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ProtectError::ProtectUnset {
            target: "org/repo=master".to_string(),
        };
        assert_eq!(err.to_string(), "org/repo=master: protect should not be nil");

        let err = ProtectError::DisabledWithRequirements {
            target: "org/repo=dev".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "org/repo=dev: required status checks / restrictions require protection"
        );

        let err = ProtectError::MergeConflict {
            field: "required_status_checks.strict".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "policy conflict: required_status_checks.strict is set on both sides"
        );
    }
}
