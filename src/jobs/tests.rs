//! Tests for job config loading and branch matching.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

// =========================================================================
// Brancher
// =========================================================================

#[test]
fn test_empty_brancher_runs_everywhere() {
    let brancher = Brancher::default();

    assert!(brancher.runs_against("master"));
    assert!(brancher.runs_against("release-1.0"));
}

#[test]
fn test_branches_are_matched_whole() {
    let brancher = Brancher::only(["master"]).unwrap();

    assert!(brancher.runs_against("master"));
    assert!(!brancher.runs_against("master-backup"));
    assert!(!brancher.runs_against("old-master"));
}

#[test]
fn test_branch_regex() {
    let brancher = Brancher::only([r"release-\d+\.\d+", "main"]).unwrap();

    assert!(brancher.runs_against("release-1.12"));
    assert!(brancher.runs_against("main"));
    assert!(!brancher.runs_against("release-next"));
}

#[test]
fn test_skip_branches_win() {
    let brancher = Brancher::new(
        vec!["release-.*".to_string()],
        vec!["release-0\\..*".to_string()],
    )
    .unwrap();

    assert!(brancher.runs_against("release-1.0"));
    assert!(!brancher.runs_against("release-0.9"));
    assert_eq!(brancher.skip_branches(), ["release-0\\..*".to_string()]);

    let skip_only = Brancher::new(vec![], vec!["gh-pages".to_string()]).unwrap();
    assert!(skip_only.runs_against("master"));
    assert!(!skip_only.runs_against("gh-pages"));
}

#[test]
fn test_invalid_brancher_regex_is_rejected() {
    let err = Brancher::only(["release-("]).unwrap_err();

    assert!(err.to_string().contains("invalid regex pattern in branches"));
    assert!(err.to_string().contains("release-("));
}

// =========================================================================
// Presubmit
// =========================================================================

#[test]
fn test_context_defaults_to_name() {
    let job = Presubmit {
        name: "unit".to_string(),
        ..Default::default()
    };
    assert_eq!(job.context(), "unit");

    let job = Presubmit {
        name: "unit".to_string(),
        context: "ci/unit".to_string(),
        ..Default::default()
    };
    assert_eq!(job.context(), "ci/unit");
}

#[test]
fn test_triggers_automatically() {
    let manual = Presubmit::default();
    assert!(!manual.triggers_automatically());

    let always = Presubmit {
        always_run: true,
        ..Default::default()
    };
    assert!(always.triggers_automatically());

    let changed = Presubmit {
        run_if_changed: Some(r"^docs/".to_string()),
        ..Default::default()
    };
    assert!(changed.triggers_automatically());
}

// =========================================================================
// JobConfig
// =========================================================================

const JOBS_YAML: &str = r#"
presubmits:
  kubernetes/test-infra:
    - name: pull-test-infra-bazel
      always_run: true
      context: pull-test-infra-bazel
      branches: [master]
      run_after_success:
        - name: pull-test-infra-integration
          skip_branches: ["release-.*"]
    - name: pull-test-infra-docs
      run_if_changed: "^docs/"
      optional: true
  kubernetes/kubernetes:
    - name: pull-kubernetes-verify
      always_run: true
postsubmits:
  kubernetes/test-infra:
    - name: post-test-infra-push
"#;

#[test]
fn test_parse_job_config() {
    let config = JobConfig::from_yaml(JOBS_YAML).unwrap();

    let jobs = config.presubmits_for("kubernetes", "test-infra");
    assert_eq!(jobs.len(), 2);

    let bazel = &jobs[0];
    assert_eq!(bazel.name, "pull-test-infra-bazel");
    assert!(bazel.always_run);
    assert!(bazel.runs_against_branch("master"));
    assert!(!bazel.runs_against_branch("dev"));
    assert_eq!(bazel.brancher.branches(), ["master".to_string()]);

    let child = &bazel.run_after_success[0];
    assert_eq!(child.context(), "pull-test-infra-integration");
    assert!(child.runs_against_branch("master"));
    assert!(!child.runs_against_branch("release-1.0"));

    let docs = &jobs[1];
    assert!(docs.optional);
    assert_eq!(docs.run_if_changed.as_deref(), Some("^docs/"));

    assert_eq!(config.presubmits_for("kubernetes", "kubernetes").len(), 1);
    assert!(config.presubmits_for("kubernetes", "missing").is_empty());
}

#[test]
fn test_parse_empty_job_config() {
    let config = JobConfig::from_yaml("").unwrap();
    assert!(config.presubmits.is_empty());
}

#[test]
fn test_invalid_branch_regex_fails_to_load() {
    let yaml = r#"
presubmits:
  org/repo:
    - name: unit
      branches: ["release-("]
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();

    assert!(err.to_string().contains("failed to parse job config YAML"));
    assert!(err.to_string().contains("release-("));
}

#[test]
fn test_key_must_be_org_slash_repo() {
    let yaml = r#"
presubmits:
  just-a-repo:
    - name: unit
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();

    assert!(err.to_string().contains("org/repo"));
}

#[test]
fn test_duplicate_nested_job_name_fails() {
    let yaml = r#"
presubmits:
  org/repo:
    - name: unit
      always_run: true
      run_after_success:
        - name: unit
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();

    assert!(err.to_string().contains("duplicate presubmit name 'unit'"));
}

#[test]
fn test_same_job_name_in_different_repos_is_allowed() {
    let yaml = r#"
presubmits:
  org/a:
    - name: unit
  org/b:
    - name: unit
"#;
    assert!(JobConfig::from_yaml(yaml).is_ok());
}

#[test]
fn test_always_run_and_run_if_changed_conflict() {
    let yaml = r#"
presubmits:
  org/repo:
    - name: unit
      always_run: true
      run_if_changed: "^src/"
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();

    assert!(err.to_string().contains("both always_run and run_if_changed"));
}

#[test]
fn test_invalid_run_if_changed_regex_fails() {
    let yaml = r#"
presubmits:
  org/repo:
    - name: unit
      run_if_changed: "src/("
"#;
    let err = JobConfig::from_yaml(yaml).unwrap_err();

    assert!(err.to_string().contains("run_if_changed"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(JOBS_YAML.as_bytes()).unwrap();

    let config = JobConfig::load(file.path()).unwrap();

    assert_eq!(config.presubmits.len(), 2);
}

#[test]
fn test_load_missing_file_is_user_error() {
    let err = JobConfig::load("/nonexistent/jobs.yaml").unwrap_err();

    assert!(err.to_string().contains("failed to read job config file"));
    assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
}
