//! Top-level subcommand orchestration.
pub mod plan;
pub mod validate;
pub mod version;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::validation::ValidationWarning;
use crate::logging::Logger;
use crate::resources::{Descriptor, Ensure, ResourceSet};

/// Environment variable naming the declaration file.
pub const CONFIG_ENV: &str = "ACCOUNT_CONFIG";

/// Declaration file used when neither `--config` nor [`CONFIG_ENV`] is set.
pub const DEFAULT_CONFIG: &str = "accounts.toml";

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded declarations with CLI overrides applied.
    pub config: Config,
    /// Non-fatal issues found while validating the declarations.
    pub warnings: Vec<ValidationWarning>,
}

impl CommandSetup {
    /// Resolve the declaration file, load it, and report warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file cannot be read or parsed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let path = resolve_config_path(global.config.as_deref(), std::env::var_os(CONFIG_ENV));

        log.stage("Loading declarations");
        if !path.exists() {
            log.warn(&format!(
                "{} not found; no accounts declared",
                path.display()
            ));
        }

        let mut config = Config::load(&path)?;
        if global.strict_groups {
            config = config.with_strict_groups();
        }

        log.debug(&format!("config: {}", config.path.display()));
        log.debug(&format!("policy: {:?}", config.policy));
        log.info(&format!("loaded {} account(s)", config.accounts.len()));

        let warnings = config.validate();
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self { config, warnings })
    }
}

/// Pick the declaration file: explicit flag, then environment, then default.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
    explicit.map_or_else(
        || {
            env.filter(|v| !v.is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from)
        },
        Path::to_path_buf,
    )
}

/// One-line outcome for an account's resource set, e.g. `4 resources, 3 edges`.
fn set_summary(set: &ResourceSet) -> String {
    let edges = set.edges().len();
    format!("{} resources, {edges} edges", set.len())
}

/// Whether a set removes its account rather than provisioning it.
fn is_removal(set: &ResourceSet) -> bool {
    set.resources()
        .first()
        .is_some_and(|r| r.ensure() == Ensure::Absent)
}
