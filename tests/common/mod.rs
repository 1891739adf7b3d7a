// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed declaration file and a fluent builder
// so each integration test can describe its accounts without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use account_cli::account::{Plan, plan_accounts};
use account_cli::cli::GlobalOpts;
use account_cli::config::Config;

/// An `accounts.toml` inside a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct DeclarationFile {
    /// Temporary directory holding the file.
    pub dir: tempfile::TempDir,
    path: PathBuf,
}

impl DeclarationFile {
    /// Write `content` to a fresh `accounts.toml`.
    pub fn new(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("accounts.toml");
        std::fs::write(&path, content).expect("write accounts.toml");
        Self { dir, path }
    }

    /// Path to the declaration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Global options pointing at this file.
    pub fn global_opts(&self, strict_groups: bool) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.path.clone()),
            strict_groups,
        }
    }

    /// Load the declarations.
    pub fn load(&self) -> Config {
        Config::load(&self.path).expect("load config")
    }

    /// Load the declarations and derive every account.
    pub fn plan(&self) -> Plan {
        let config = self.load();
        plan_accounts(&config.accounts, &config.policy).expect("plan accounts")
    }
}

/// Fluent builder for [`DeclarationFile`].
#[derive(Default)]
pub struct DeclarationsBuilder {
    content: String,
}

impl DeclarationsBuilder {
    /// Begin with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `[policy]` section with the given body.
    pub fn with_policy(mut self, body: &str) -> Self {
        writeln!(self.content, "[policy]\n{body}\n").expect("write policy");
        self
    }

    /// Append an `[accounts.<title>]` table with the given body.
    pub fn with_account(mut self, title: &str, body: &str) -> Self {
        writeln!(self.content, "[accounts.{title}]\n{body}\n").expect("write account");
        self
    }

    /// Append an SSH key table under `[accounts.<title>]`.
    pub fn with_key(mut self, title: &str, name: &str, key_type: &str, key: &str) -> Self {
        writeln!(
            self.content,
            "[accounts.{title}.ssh_keys.{name}]\ntype = \"{key_type}\"\nkey = \"{key}\"\n"
        )
        .expect("write key");
        self
    }

    /// Write the document and return the file.
    pub fn build(self) -> DeclarationFile {
        DeclarationFile::new(&self.content)
    }
}
