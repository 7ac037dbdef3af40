//! CLI argument parsing for branchprotector.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// branchprotector: resolve branch-protection policies from Prow config.
///
/// Reads the `branch-protection` section of a Prow config file and the
/// presubmit jobs of each repository, and prints the protection policy each
/// branch should have. Nothing is applied to the hosting platform.
#[derive(Parser, Debug)]
#[command(name = "branchprotector")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Prow config file holding the `branch-protection` section.
    #[arg(long, global = true, default_value = "config.yaml")]
    pub config_path: PathBuf,

    /// Job config file holding `presubmits`. Defaults to the config file.
    #[arg(long, global = true)]
    pub job_config_path: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for branchprotector.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the policy of a single branch.
    ///
    /// Branches not named in the config resolve through their org and repo
    /// defaults plus the contexts of their required jobs.
    Resolve(ResolveArgs),

    /// Resolve every branch named in the config.
    ///
    /// Prints each branch with its policy or error. Exits non-zero if any
    /// branch fails to resolve.
    Plan,

    /// Validate the config and print advisory warnings.
    ///
    /// Reports repos and branches left unprotected through the
    /// allow_disabled_policies / allow_disabled_job_policies escape hatches.
    Check,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Organization name.
    pub org: String,

    /// Repository name.
    pub repo: String,

    /// Branch name.
    pub branch: String,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Path of the file to read presubmits from.
    pub fn job_config_path(&self) -> &PathBuf {
        self.job_config_path.as_ref().unwrap_or(&self.config_path)
    }
}
