//! Point-in-time view of every provider file of a command.
//!
//! All sync decisions (primary detection, conflict checks, propagation) are
//! made against one snapshot so a command never re-reads disk mid-decision.
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use sha2::{Digest as _, Sha256};

use super::normalize::strip_known_wrappers;
use crate::config::CommandSpec;
use crate::resources::helpers::fs::read_with_mtime;

/// One provider file as it was when the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderState {
    /// Raw file content (`""` when the file is absent).
    pub content: String,
    /// Modification time, `None` when the file is absent.
    pub modified: Option<SystemTime>,
    /// Content with every known wrapper stripped.
    pub body: String,
}

impl ProviderState {
    /// Build a state from raw content, normalizing it against `spec`.
    #[must_use]
    pub fn new(content: String, modified: Option<SystemTime>, spec: &CommandSpec) -> Self {
        let body = strip_known_wrappers(&content, &spec.providers);
        Self {
            content,
            modified,
            body,
        }
    }

    /// Whether the file existed.
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.modified.is_some()
    }

    /// Modification time, with absent files treated as the epoch.
    #[must_use]
    pub fn mtime(&self) -> SystemTime {
        self.modified.unwrap_or(UNIX_EPOCH)
    }

    /// Short sha256 digest of the normalized body, for logs.
    #[must_use]
    pub fn digest(&self) -> String {
        short_digest(&self.body)
    }
}

/// First eight hex characters of the sha256 of `text`.
#[must_use]
pub fn short_digest(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    hash.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

/// States of all providers of one command, keyed by provider name.
#[derive(Debug, Clone, Default)]
pub struct CommandSnapshot {
    states: BTreeMap<String, ProviderState>,
}

impl CommandSnapshot {
    /// Read every provider file of `spec` once.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read.
    pub fn capture(spec: &CommandSpec) -> Result<Self> {
        let mut states = BTreeMap::new();
        for (name, provider) in &spec.providers {
            let (content, modified) = read_with_mtime(&provider.path)?;
            states.insert(name.clone(), ProviderState::new(content, modified, spec));
        }
        Ok(Self { states })
    }

    /// Build a snapshot from already-known states.
    #[must_use]
    pub const fn from_states(states: BTreeMap<String, ProviderState>) -> Self {
        Self { states }
    }

    /// State of the named provider.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProviderState> {
        self.states.get(name)
    }

    /// Iterate `(name, state)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderState)> {
        self.states.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::test_helpers::{command, provider};
    use std::time::Duration;

    fn spec(dir: &std::path::Path) -> CommandSpec {
        command(
            "emails",
            vec![
                provider(dir, "claude", "<!-- claude -->\n", ""),
                provider(dir, "cursor", "", ""),
            ],
        )
    }

    #[test]
    fn capture_reads_existing_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let spec = spec(dir.path());
        std::fs::write(dir.path().join("claude.md"), "<!-- claude -->\nbody").unwrap();

        let snapshot = CommandSnapshot::capture(&spec).unwrap();

        let claude = snapshot.get("claude").unwrap();
        assert!(claude.exists());
        assert_eq!(claude.body, "body");
        let cursor = snapshot.get("cursor").unwrap();
        assert!(!cursor.exists());
        assert_eq!(cursor.content, "");
        assert_eq!(cursor.mtime(), UNIX_EPOCH);
    }

    #[test]
    fn iter_is_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = CommandSnapshot::capture(&spec(dir.path())).unwrap();
        let names: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["claude", "cursor"]);
    }

    #[test]
    fn mtime_reflects_modified_time() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = UNIX_EPOCH + Duration::from_secs(42);
        let state = ProviderState::new("x".into(), Some(stamp), &spec(dir.path()));
        assert_eq!(state.mtime(), stamp);
    }

    #[test]
    fn digest_is_short_and_stable() {
        assert_eq!(short_digest("").len(), 8);
        // sha256("") = e3b0c442...
        assert_eq!(short_digest(""), "e3b0c442");
        assert_ne!(short_digest("a"), short_digest("b"));
    }
}
