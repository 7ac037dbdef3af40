//! Invariant checks on a resolved policy.

use crate::error::{ProtectError, Result};
use crate::policy::Policy;

/// Check a resolved branch policy and hand it back if it is usable.
///
/// - an explicitly configured branch must decide `protect`
/// - `protect: false` cannot carry required contexts, restrictions or
///   reviews; with `allow_disabled_policies` this is logged and the policy
///   is reduced to `protect: false`
pub fn validate_policy(
    target: &str,
    policy: Policy,
    explicit: bool,
    allow_disabled_policies: bool,
) -> Result<Policy> {
    if explicit && policy.protect.is_none() {
        return Err(ProtectError::ProtectUnset {
            target: target.to_string(),
        });
    }

    if policy.is_disabled() && policy.has_requirements() {
        if !allow_disabled_policies {
            return Err(ProtectError::DisabledWithRequirements {
                target: target.to_string(),
            });
        }
        tracing::warn!(
            target_branch = %target,
            "protection disabled on a branch that defines protection settings"
        );
        return Ok(Policy::protected(false));
    }

    Ok(policy)
}
