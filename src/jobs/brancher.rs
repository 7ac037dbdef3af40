//! Branch matching for jobs.

use crate::error::{ProtectError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw `branches` / `skip_branches` lists as they appear in YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawBrancher {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    branches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skip_branches: Vec<String>,
}

/// Decides which branches a job runs against.
///
/// Each entry is a regex matched against the whole branch name, so a plain
/// name like `master` only matches `master`. A branch runs the job when it
/// matches no `skip_branches` entry and either `branches` is empty or one of
/// its entries matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawBrancher", into = "RawBrancher")]
pub struct Brancher {
    branches: Vec<String>,
    skip_branches: Vec<String>,
    matcher: Option<Regex>,
    skip_matcher: Option<Regex>,
}

impl Brancher {
    /// Compile a brancher from include and skip patterns.
    pub fn new(branches: Vec<String>, skip_branches: Vec<String>) -> Result<Self> {
        let matcher = compile_anchored(&branches, "branches")?;
        let skip_matcher = compile_anchored(&skip_branches, "skip_branches")?;
        Ok(Self {
            branches,
            skip_branches,
            matcher,
            skip_matcher,
        })
    }

    /// A brancher restricted to the given branch names or patterns.
    pub fn only<I, S>(branches: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(branches.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Whether a job with this brancher runs against `branch`.
    pub fn runs_against(&self, branch: &str) -> bool {
        if let Some(skip) = &self.skip_matcher {
            if skip.is_match(branch) {
                return false;
            }
        }
        match &self.matcher {
            Some(matcher) => matcher.is_match(branch),
            None => true,
        }
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn skip_branches(&self) -> &[String] {
        &self.skip_branches
    }
}

impl TryFrom<RawBrancher> for Brancher {
    type Error = ProtectError;

    fn try_from(raw: RawBrancher) -> Result<Self> {
        Brancher::new(raw.branches, raw.skip_branches)
    }
}

impl From<Brancher> for RawBrancher {
    fn from(brancher: Brancher) -> Self {
        Self {
            branches: brancher.branches,
            skip_branches: brancher.skip_branches,
        }
    }
}

/// Build one regex matching any of `patterns` against the whole input.
fn compile_anchored(patterns: &[String], field_name: &str) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    // Validate each pattern on its own for a precise error message
    for pattern in patterns {
        Regex::new(pattern).map_err(|e| {
            ProtectError::UserError(format!(
                "invalid regex pattern in {}: '{}' - {}",
                field_name, pattern, e
            ))
        })?;
    }

    let alternation = patterns
        .iter()
        .map(|p| format!("(?:{})", p))
        .collect::<Vec<_>>()
        .join("|");
    let regex = Regex::new(&format!("^(?:{})$", alternation)).map_err(|e| {
        ProtectError::UserError(format!("failed to compile {} patterns: {}", field_name, e))
    })?;

    Ok(Some(regex))
}
