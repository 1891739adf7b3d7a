//! Declarative account provisioning.
//!
//! Turns one declaration per local login account into the group, user,
//! directory and `authorized_keys` descriptors a convergence engine needs,
//! along with the ordering edges between them. Nothing here touches the
//! host: the output is a plan for something else to apply.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load and validate `accounts.toml`
//! - **[`account`]**: resolve defaults and policy, fan out keys, build the graph
//! - **[`resources`]**: the typed descriptors and the ordered [`resources::ResourceSet`]
//! - **[`commands`]**: top-level subcommand orchestration (`plan`, `validate`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod account;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
