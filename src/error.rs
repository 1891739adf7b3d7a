//! Domain-specific error types for account derivation.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! The derivation core returns typed errors ([`ValidationError`],
//! [`PolicyConflictError`]) while command handlers at the CLI boundary
//! convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! AccountError
//! ├── Validation(ValidationError)         - malformed or contradictory input
//! ├── PolicyConflict(PolicyConflictError) - group policy cannot be satisfied
//! └── Config(ConfigError)                 - declaration file and plan-level issues
//! ```
//!
//! A derivation either succeeds with a complete resource set or fails with a
//! single one of these errors; no partial output is ever returned alongside.

use thiserror::Error;

/// Top-level error type for account derivation.
#[derive(Error, Debug)]
pub enum AccountError {
    /// The account declaration is malformed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The account declaration conflicts with the active group policy.
    #[error("Policy conflict: {0}")]
    PolicyConflict(#[from] PolicyConflictError),

    /// The declaration file or the combined plan is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while resolving a single account declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The account title is empty or whitespace.
    #[error("account title must not be empty")]
    EmptyTitle,

    /// The username (explicit or defaulted from the title) is empty.
    #[error("account '{title}': username must not be empty")]
    EmptyUsername {
        /// Title of the offending account.
        title: String,
    },

    /// An SSH key entry has an empty name.
    #[error("account '{title}': ssh key name must not be empty")]
    EmptyKeyName {
        /// Title of the offending account.
        title: String,
    },

    /// An SSH key entry lacks its `key` or `type` field.
    #[error("account '{title}': ssh key '{name}' is missing '{field}'")]
    MalformedKey {
        /// Title of the offending account.
        title: String,
        /// Name of the key entry.
        name: String,
        /// Name of the missing field (`key` or `type`).
        field: &'static str,
    },

    /// Two SSH key entries share a name and would derive the same resource.
    #[error("account '{title}': duplicate ssh key '{name}' (resource '{resource}')")]
    DuplicateKey {
        /// Title of the offending account.
        title: String,
        /// The repeated key name.
        name: String,
        /// The colliding authorized-key resource title.
        resource: String,
    },

    /// The home directory mode is not a 3 or 4 digit octal string.
    #[error("account '{title}': {reason}")]
    InvalidMode {
        /// Title of the offending account.
        title: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// The home directory is not an absolute path.
    #[error("account '{title}': home directory '{path}' must be absolute")]
    RelativeHome {
        /// Title of the offending account.
        title: String,
        /// The rejected path.
        path: String,
    },

    /// A dedicated group was requested but `gid` is not a numeric group ID.
    #[error("account '{title}': gid '{gid}' must be numeric when create_group is true")]
    NonNumericGid {
        /// Title of the offending account.
        title: String,
        /// The rejected gid value.
        gid: String,
    },
}

/// Errors raised when the group policy cannot produce a primary group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyConflictError {
    /// `create_group` is false, no `gid` was given, and the policy offers no
    /// usable fallback group (strict, or a blank fallback name).
    #[error("account '{title}': create_group is false and no gid was given")]
    NoPrimaryGroup {
        /// Title of the offending account.
        title: String,
    },
}

/// Errors that arise from declaration loading and whole-plan checks.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The declaration file contains a syntax or type error.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the file that failed to parse.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading the declaration file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Two accounts derive a resource with the same kind and title.
    #[error("resource {resource} is derived by both '{first}' and '{second}'")]
    DuplicateResource {
        /// The colliding resource reference (e.g. `directory[/home/a]`).
        resource: String,
        /// Title of the account that derived it first.
        first: String,
        /// Title of the account that derived it again.
        second: String,
    },

    /// The ordering edges of the combined plan cannot all be satisfied.
    #[error("ordering edges form a cycle; {unordered} resource(s) cannot be ordered")]
    OrderingCycle {
        /// Number of resources left out of the topological order.
        unordered: usize,
    },
}
