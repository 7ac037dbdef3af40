//! Command implementations for branchprotector.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Results are written to stdout as YAML or JSON; logs and
//! per-branch failures go to stderr.

use crate::cli::{Cli, Command, OutputFormat, ResolveArgs};
use branchprotector::config::{Config, ProtectionConfig};
use branchprotector::error::{ProtectError, Result};
use branchprotector::jobs::JobConfig;
use branchprotector::policy::Policy;
use branchprotector::resolve::{self, Plan};
use serde::Serialize;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config_path)?;
    let jobs = JobConfig::load(cli.job_config_path())?;
    let protection = config.branch_protection;

    tracing::debug!(
        orgs = protection.orgs.len(),
        repos_with_jobs = jobs.presubmits.len(),
        "loaded configuration"
    );

    match cli.command {
        Command::Resolve(args) => cmd_resolve(&protection, &jobs, args, cli.output),
        Command::Plan => cmd_plan(&protection, &jobs, cli.output),
        Command::Check => cmd_check(&protection, &jobs, cli.output),
    }
}

fn cmd_resolve(
    protection: &ProtectionConfig,
    jobs: &JobConfig,
    args: ResolveArgs,
    format: OutputFormat,
) -> Result<()> {
    let policy = resolve::resolve(&args.org, &args.repo, &args.branch, protection, jobs)?;
    print!("{}", render(&policy, format)?);
    Ok(())
}

fn cmd_plan(protection: &ProtectionConfig, jobs: &JobConfig, format: OutputFormat) -> Result<()> {
    let plan = resolve::plan(protection, jobs);
    print!("{}", render(&plan_entries(&plan), format)?);
    fail_on_errors(&plan)
}

fn cmd_check(protection: &ProtectionConfig, jobs: &JobConfig, format: OutputFormat) -> Result<()> {
    let plan = resolve::plan(protection, jobs);

    let report = CheckReport {
        branches: plan.branches.len(),
        errors: plan
            .errors()
            .map(|(_, err)| err.to_string())
            .collect(),
        repos_with_disabled_policy: resolve::repos_with_disabled_policy(protection),
        unprotected_branches: resolve::unprotected_branches(protection, jobs),
    };

    for repo in &report.repos_with_disabled_policy {
        tracing::warn!(repo = %repo, "protection disabled by allow_disabled_policies");
    }
    for entry in &report.unprotected_branches {
        tracing::warn!(branches = %entry, "required jobs on unprotected branches");
    }

    print!("{}", render(&report, format)?);
    fail_on_errors(&plan)
}

/// One line of `plan` output.
#[derive(Debug, Serialize)]
struct PlanEntry {
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Output of `check`.
#[derive(Debug, Serialize)]
struct CheckReport {
    branches: usize,
    errors: Vec<String>,
    repos_with_disabled_policy: Vec<String>,
    unprotected_branches: Vec<String>,
}

fn plan_entries(plan: &Plan) -> Vec<PlanEntry> {
    plan.branches
        .iter()
        .map(|planned| match &planned.outcome {
            Ok(policy) => PlanEntry {
                target: planned.target(),
                policy: Some(policy.clone()),
                error: None,
            },
            Err(err) => PlanEntry {
                target: planned.target(),
                policy: None,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

fn fail_on_errors(plan: &Plan) -> Result<()> {
    let mut failed = 0;
    for (_, err) in plan.errors() {
        eprintln!("  x {}", err);
        failed += 1;
    }

    if failed > 0 {
        return Err(ProtectError::UnresolvedBranches(failed));
    }
    Ok(())
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| {
            ProtectError::UserError(format!("failed to serialize output to YAML: {}", e))
        }),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| json + "\n")
            .map_err(|e| {
                ProtectError::UserError(format!("failed to serialize output to JSON: {}", e))
            }),
    }
}
