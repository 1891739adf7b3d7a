#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `plan` and `validate` commands.
//!
//! These tests drive the command entry points against isolated declaration
//! files, verifying that:
//! - the text rendering of a plan is stable (snapshot)
//! - the JSON hand-off document carries kinds, titles and `before` edges
//! - `validate` reports every failing account and honours `--deny-warnings`
//! - `--strict-groups` overrides a permissive `[policy]`

mod common;

use account_cli::cli::{OutputFormat, PlanOpts, ValidateOpts};
use account_cli::commands::{plan, validate};
use account_cli::logging::{AccountStatus, Logger};
use common::DeclarationsBuilder;

fn plan_opts() -> PlanOpts {
    PlanOpts {
        format: OutputFormat::Text,
        only: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Snapshot of the default account with one key, in apply order.
#[test]
fn default_account_plan() {
    let plan = DeclarationsBuilder::new()
        .with_account("user", "")
        .with_key("user", "laptop", "ssh-ed25519", "AAAA")
        .build()
        .plan();
    insta::assert_snapshot!("default_account_plan", plan::render_text(&plan));
}

/// The JSON document lists each resource once with its `before` edges.
#[test]
fn json_document_carries_edges() {
    let plan = DeclarationsBuilder::new()
        .with_account("deploy", "")
        .build()
        .plan();
    let json = plan::render_json(&plan).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let resources = value["accounts"][0]["resources"].as_array().unwrap();
    let kinds: Vec<&str> = resources
        .iter()
        .map(|r| r["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["group", "user", "directory", "directory"]);

    let group_before = resources[0]["before"].as_array().unwrap();
    assert_eq!(group_before.len(), 1);
    assert_eq!(group_before[0]["kind"], "user");
    assert_eq!(group_before[0]["title"], "deploy");

    let ssh_before = resources[3]["before"].as_array().unwrap();
    assert!(ssh_before.is_empty());
}

/// Identical declarations render byte-identical JSON.
#[test]
fn json_is_byte_identical_across_runs() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "groups = [\"wheel\", \"wheel\", \"docker\"]")
        .with_key("a", "k", "ssh-ed25519", "AAAA")
        .build();
    let first = plan::render_json(&file.plan()).unwrap();
    let second = plan::render_json(&file.plan()).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Command entry points
// ---------------------------------------------------------------------------

/// `plan` records one summary entry per account.
#[test]
fn plan_run_records_accounts() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "")
        .with_account("b", "ensure = \"absent\"")
        .build();
    let log = Logger::new();
    plan::run(&file.global_opts(false), &plan_opts(), &log).unwrap();

    let entries = log.account_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].status, AccountStatus::Planned);
    assert_eq!(entries[1].status, AccountStatus::Removed);
}

/// `--only` restricts the plan to the named accounts.
#[test]
fn plan_run_only_filters_accounts() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "")
        .with_account("b", "")
        .build();
    let opts = PlanOpts {
        only: vec!["b".to_string()],
        ..plan_opts()
    };
    let log = Logger::new();
    plan::run(&file.global_opts(false), &opts, &log).unwrap();

    let entries = log.account_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "b");
}

/// `--strict-groups` turns a fallback into a failure.
#[test]
fn plan_run_strict_groups_fails() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "create_group = false")
        .build();
    assert!(plan::run(&file.global_opts(false), &plan_opts(), &Logger::new()).is_ok());

    let err = plan::run(&file.global_opts(true), &plan_opts(), &Logger::new()).unwrap_err();
    assert!(format!("{err:#}").contains("no gid was given"));
}

/// Two accounts sharing a home directory cannot both be planned.
#[test]
fn plan_run_rejects_shared_resources() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "home_dir = \"/srv/app\"")
        .with_account("b", "home_dir = \"/srv/app\"")
        .build();
    let err = plan::run(&file.global_opts(false), &plan_opts(), &Logger::new()).unwrap_err();
    assert!(format!("{err:#}").contains("directory[/srv/app]"));
}

/// `validate` reports every failing account, not just the first.
#[test]
fn validate_run_reports_all_failures() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "home_dir = \"relative\"")
        .with_account("b", "")
        .with_account("c", "home_dir_perms = \"rwx\"")
        .build();
    let log = Logger::new();
    let err = validate::run(
        &file.global_opts(false),
        &ValidateOpts {
            deny_warnings: false,
        },
        &log,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "2 account(s) failed validation");
    assert_eq!(log.failure_count(), 2);
}

/// Warnings only fail validation with `--deny-warnings`.
#[test]
fn validate_run_deny_warnings() {
    let file = DeclarationsBuilder::new()
        .with_account("a", "shell = \"zsh\"")
        .build();
    let lenient = ValidateOpts {
        deny_warnings: false,
    };
    let strict = ValidateOpts {
        deny_warnings: true,
    };
    assert!(validate::run(&file.global_opts(false), &lenient, &Logger::new()).is_ok());

    let err = validate::run(&file.global_opts(false), &strict, &Logger::new()).unwrap_err();
    assert_eq!(err.to_string(), "1 warning(s) treated as errors");
}

/// A missing declaration file is an empty, valid configuration.
#[test]
fn validate_run_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let global = account_cli::cli::GlobalOpts {
        config: Some(dir.path().join("absent.toml")),
        strict_groups: false,
    };
    let log = Logger::new();
    validate::run(
        &global,
        &ValidateOpts {
            deny_warnings: false,
        },
        &log,
    )
    .unwrap();
    assert!(log.account_entries().is_empty());
}

/// A syntax error names the file.
#[test]
fn plan_run_reports_syntax_errors() {
    let file = common::DeclarationFile::new("[accounts.a\n");
    let err = plan::run(&file.global_opts(false), &plan_opts(), &Logger::new()).unwrap_err();
    assert!(format!("{err:#}").contains("accounts.toml"));
}
