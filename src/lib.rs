//! Mailroom: Gmail inbox tools and prompt file synchronisation.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]**: load the sync config (YAML or TOML) into command specs
//! - **[`sync`]**: snapshot, primary detection, conflict checks, propagation
//! - **[`resources`]**: idempotent `check + apply` primitives for provider files
//! - **[`mail`]**: the Gmail client seam, mailbox operations and tool router
//! - **[`commands`]**: top-level subcommand orchestration (`sync`, `serve`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mail;
pub mod resources;
pub mod sync;
