//! Domain-specific error types for the mailroom engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`SyncError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.  [`exit_code`] walks the
//! resulting chain back down to decide the process exit status.
//!
//! # Error hierarchy
//!
//! ```text
//! anyhow::Error
//! ├── ConfigError  - missing/malformed config, unknown command, bad primary  (exit 2)
//! ├── SyncError    - providers edited after the primary                      (exit 1)
//! └── io / other   - read or write failures, propagated with path context    (exit 1)
//! ```

use thiserror::Error;

/// Exit status for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit status for a sync conflict or any runtime failure.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for usage and configuration errors.
pub const EXIT_USAGE: u8 = 2;

/// Errors that arise from loading the sync configuration and resolving a
/// command's primary provider.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file does not exist.
    #[error("Config not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The requested command is not declared in the config file.
    #[error("Command '{command}' not defined in {path}")]
    UnknownCommand {
        /// Command name given on the command line.
        command: String,
        /// Config file that was searched.
        path: String,
    },

    /// The config document could not be parsed.
    #[error("Invalid config syntax in {path}: {message}")]
    InvalidSyntax {
        /// Config file that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },

    /// Two command entries share the same name.
    #[error("Command '{0}' is declared more than once")]
    DuplicateCommand(String),

    /// A fixed `primary_provider` names a provider the command does not have.
    #[error("Configured primary_provider '{provider}' not found for command {command}")]
    PrimaryNotFound {
        /// Provider named by the policy.
        provider: String,
        /// Command being synced.
        command: String,
    },

    /// No provider file exists and the fallback provider is not configured
    /// for this command.
    #[error(
        "No provider file exists for command {command} and fallback provider '{provider}' is not one of its providers"
    )]
    FallbackProviderMissing {
        /// Configured fallback provider name.
        provider: String,
        /// Command being synced.
        command: String,
    },

    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that stop a sync before anything is written.
#[derive(Error, Debug)]
pub enum SyncError {
    /// One or more non-primary providers were edited after the primary.
    #[error(
        "Sync conflict in {command}: {} modified independently after primary '{primary}'. \
         Revert them or set primary_provider in config.",
        .providers.join(", ")
    )]
    Conflict {
        /// Command being synced.
        command: String,
        /// Provider resolved as the source of truth.
        primary: String,
        /// Conflicting providers, in name order.
        providers: Vec<String>,
    },
}

/// Map an error chain onto the process exit status.
///
/// Configuration problems are usage errors; everything else (conflicts and
/// I/O failures alike) is a plain failure.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err
        .chain()
        .any(|cause| cause.downcast_ref::<ConfigError>().is_some())
    {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Context as _;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_not_found_display() {
        let e = ConfigError::NotFound {
            path: "/repo/commands_sync.config.yaml".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Config not found: /repo/commands_sync.config.yaml"
        );
    }

    #[test]
    fn config_error_unknown_command_display() {
        let e = ConfigError::UnknownCommand {
            command: "emails".to_string(),
            path: "sync.yaml".to_string(),
        };
        assert_eq!(e.to_string(), "Command 'emails' not defined in sync.yaml");
    }

    #[test]
    fn config_error_primary_not_found_display() {
        let e = ConfigError::PrimaryNotFound {
            provider: "gemini".to_string(),
            command: "emails".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Configured primary_provider 'gemini' not found for command emails"
        );
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "sync.yaml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("sync.yaml"));
    }

    // -----------------------------------------------------------------------
    // SyncError
    // -----------------------------------------------------------------------

    #[test]
    fn conflict_names_every_provider_and_the_primary() {
        let e = SyncError::Conflict {
            command: "emails".to_string(),
            primary: "claude".to_string(),
            providers: vec!["codex".to_string(), "cursor".to_string()],
        };
        let msg = e.to_string();
        assert!(msg.contains("codex, cursor"));
        assert!(msg.contains("primary 'claude'"));
        assert!(msg.contains("primary_provider"));
    }

    // -----------------------------------------------------------------------
    // exit_code
    // -----------------------------------------------------------------------

    #[test]
    fn config_errors_exit_with_usage_status() {
        let err: anyhow::Error = ConfigError::DuplicateCommand("emails".to_string()).into();
        assert_eq!(exit_code(&err), EXIT_USAGE);
    }

    #[test]
    fn config_errors_behind_context_still_exit_with_usage_status() {
        let result: Result<(), ConfigError> = Err(ConfigError::NotFound {
            path: "x.yaml".to_string(),
        });
        let err = result.context("loading sync config").expect_err("should fail");
        assert_eq!(exit_code(&err), EXIT_USAGE);
    }

    #[test]
    fn conflicts_exit_with_failure_status() {
        let err: anyhow::Error = SyncError::Conflict {
            command: "emails".to_string(),
            primary: "claude".to_string(),
            providers: vec!["cursor".to_string()],
        }
        .into();
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }

    #[test]
    fn io_errors_exit_with_failure_status() {
        let err: anyhow::Error = io::Error::other("disk full").into();
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<SyncError>();
    }
}
