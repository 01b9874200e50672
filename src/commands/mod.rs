//! Top-level subcommand handlers.
pub mod completions;
pub mod serve;
pub mod sync;
pub mod tools;
pub mod version;

/// Version string baked in by `build.rs`.
#[must_use]
pub fn version() -> &'static str {
    option_env!("MAILROOM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
