// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed sync workspace and a fluent builder
// so each integration test can lay out a config file and provider files
// (with pinned modification times) without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use mailroom_cli::config::SyncConfig;
use mailroom_cli::logging::{EntryStatus, Log};
use mailroom_cli::sync::{SyncOptions, SyncReport, sync_command};

/// The two-provider config used by most scenarios.
pub const EMAILS_CONFIG: &str = "primary_provider: auto
commands:
  - name: emails
    files:
      claude:
        path: a.md
        header: \"<!-- claude -->\\n\"
      cursor:
        path: b.md
        footer: \"\\n<!-- end -->\"
";

/// Seconds since the epoch as a [`SystemTime`].
pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// A [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    pub lines: Mutex<Vec<String>>,
    pub entries: Mutex<Vec<(String, EntryStatus)>>,
}

impl RecordingLog {
    fn push(&self, kind: &str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push(format!("[{kind}] {msg}"));
    }

    /// Whether any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .expect("log lock")
            .iter()
            .any(|l| l.contains(needle))
    }

    /// Statuses recorded for the summary, in order.
    pub fn statuses(&self) -> Vec<(String, EntryStatus)> {
        self.entries.lock().expect("log lock").clone()
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry run", msg);
    }
    fn record(&self, name: &str, status: EntryStatus, _message: Option<&str>) {
        self.entries
            .lock()
            .expect("log lock")
            .push((name.to_string(), status));
    }
}

/// An isolated sync workspace backed by a [`tempfile::TempDir`].
pub struct SyncFixture {
    /// Temporary directory holding the config and provider files.
    pub root: tempfile::TempDir,
    /// Config file name inside `root`.
    pub config_name: String,
}

impl SyncFixture {
    /// Path to the workspace root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join(&self.config_name)
    }

    /// Read a workspace file as UTF-8.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.path().join(rel)).expect("read provider file")
    }

    /// Whether a workspace file exists.
    pub fn exists(&self, rel: &str) -> bool {
        self.root.path().join(rel).exists()
    }

    /// Modification time of a workspace file.
    pub fn mtime(&self, rel: &str) -> SystemTime {
        std::fs::metadata(self.root.path().join(rel))
            .and_then(|m| m.modified())
            .expect("read mtime")
    }

    /// Load the config and sync `command`.
    pub fn sync(&self, command: &str, dry_run: bool, log: &dyn Log) -> anyhow::Result<SyncReport> {
        let config = SyncConfig::load(&self.config_path())?;
        let spec = config.command(command)?;
        sync_command(
            spec,
            &config.primary,
            &config.fallback_provider,
            SyncOptions { dry_run },
            log,
        )
    }
}

/// Fluent builder for [`SyncFixture`].
pub struct SyncFixtureBuilder {
    fixture: SyncFixture,
}

impl SyncFixtureBuilder {
    /// Begin building an empty workspace.
    pub fn new() -> Self {
        Self {
            fixture: SyncFixture {
                root: tempfile::tempdir().expect("create temp dir"),
                config_name: "commands_sync.config.yaml".to_string(),
            },
        }
    }

    /// Write the config file under `name`.
    pub fn with_config(mut self, name: &str, content: &str) -> Self {
        self.fixture.config_name = name.to_string();
        std::fs::write(self.fixture.config_path(), content).expect("write config");
        self
    }

    /// Write a provider file and pin its mtime to `secs` after the epoch.
    pub fn with_file(self, rel: &str, content: &str, secs: u64) -> Self {
        let path = self.fixture.root.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, content).expect("write provider file");
        std::fs::File::options()
            .write(true)
            .open(&path)
            .and_then(|f| f.set_modified(at(secs)))
            .expect("pin mtime");
        self
    }

    /// Write a provider file, leaving its mtime at "now".
    pub fn with_fresh_file(self, rel: &str, content: &str) -> Self {
        let path = self.fixture.root.path().join(rel);
        std::fs::write(&path, content).expect("write provider file");
        self
    }

    /// Finish building and return the workspace.
    pub fn build(self) -> SyncFixture {
        self.fixture
    }
}
