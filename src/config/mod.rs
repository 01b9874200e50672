//! Sync configuration: commands, their providers, and the primary policy.
pub mod document;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "commands_sync.config.yaml";

/// How the authoritative provider of a command is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryPolicy {
    /// The provider whose existing file was modified most recently.
    Auto,
    /// Always the named provider.
    Fixed(String),
}

impl PrimaryPolicy {
    /// Parse the `primary_provider` value. An empty value means `auto`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == document::AUTO_POLICY {
            Self::Auto
        } else {
            Self::Fixed(value.to_string())
        }
    }
}

impl fmt::Display for PrimaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(document::AUTO_POLICY),
            Self::Fixed(name) => f.write_str(name),
        }
    }
}

/// One destination file for a command's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Provider name, unique within its command.
    pub name: String,
    /// Absolute path of the provider file.
    pub path: PathBuf,
    /// Literal prefix (may be empty).
    pub header: String,
    /// Literal suffix (may be empty).
    pub footer: String,
}

/// A logical command and every provider file that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command name.
    pub name: String,
    /// Providers keyed (and therefore ordered) by name.
    pub providers: BTreeMap<String, ProviderSpec>,
}

/// Fully resolved sync configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Canonical path of the config file.
    pub path: PathBuf,
    /// Primary selection policy shared by every command.
    pub primary: PrimaryPolicy,
    /// Provider treated as canonical when none of a command's files exist.
    pub fallback_provider: String,
    /// Commands keyed by name.
    pub commands: BTreeMap<String, CommandSpec>,
}

impl SyncConfig {
    /// Load the config document at `path` and resolve provider paths against
    /// its directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is missing, unreadable or
    /// malformed, or declares the same command twice.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = document::load_document(path)?;
        let canonical = dunce::canonicalize(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let base = canonical
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let mut commands = BTreeMap::new();
        for entry in raw.commands {
            let providers = entry
                .files
                .into_iter()
                .map(|(name, file)| {
                    let spec = ProviderSpec {
                        name: name.clone(),
                        path: base.join(&file.path),
                        header: file.header,
                        footer: file.footer,
                    };
                    (name, spec)
                })
                .collect();
            let spec = CommandSpec {
                name: entry.name.clone(),
                providers,
            };
            if commands.insert(entry.name.clone(), spec).is_some() {
                return Err(ConfigError::DuplicateCommand(entry.name));
            }
        }

        Ok(Self {
            path: canonical,
            primary: PrimaryPolicy::parse(&raw.primary_provider),
            fallback_provider: raw.fallback_provider,
            commands,
        })
    }

    /// Look up a command by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCommand`] if the command is not declared.
    pub fn command(&self, name: &str) -> Result<&CommandSpec, ConfigError> {
        self.commands
            .get(name)
            .ok_or_else(|| ConfigError::UnknownCommand {
                command: name.to_string(),
                path: self.path.display().to_string(),
            })
    }
}
