//! The [`Logger`] commands write through, and its per-provider summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{EntryStatus, Log, SummaryEntry};
use super::utils::log_file_path;

/// Summary glyph and color for each status.
const fn badge(status: EntryStatus) -> (&'static str, &'static str) {
    match status {
        EntryStatus::Unchanged => ("·", "\x1b[2m"),
        EntryStatus::Updated => ("✓", "\x1b[32m"),
        EntryStatus::DryRun => ("~", "\x1b[37m"),
        EntryStatus::Failed => ("✗", "\x1b[31m"),
    }
}

/// Emits tracing events for a single command run and keeps the outcome of
/// each provider for [`print_summary`](Self::print_summary).
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<SummaryEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`; the run log itself is owned by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Snapshot of the recorded outcomes.
    #[must_use]
    pub fn entries(&self) -> Vec<SummaryEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Failure that ends or degrades the run.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Something the user should look at.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Section header, rendered as `==> msg`.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Plain progress line.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Detail line; console shows it only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// A write that `--dry-run` skipped.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Remember the outcome for provider `name`.
    pub fn record(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(SummaryEntry {
                name: name.to_owned(),
                status,
                message: message.map(str::to_owned),
            });
        }
    }

    /// Number of outcomes recorded with `status`.
    #[must_use]
    pub fn count(&self, status: EntryStatus) -> usize {
        self.entries
            .lock()
            .map_or(0, |entries| entries.iter().filter(|e| e.status == status).count())
    }

    /// One line per recorded provider, then totals and the log location.
    /// Does nothing when no outcome was recorded.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }
        self.stage("Summary");
        for entry in &entries {
            let (glyph, color) = badge(entry.status);
            let note = entry
                .message
                .as_deref()
                .map(|m| format!(" ({m})"))
                .unwrap_or_default();
            self.info(&format!("{color}{glyph} {}{note}\x1b[0m", entry.name));
        }
        self.info(&format!(
            "{} providers: \x1b[32m{} updated\x1b[0m, \x1b[2m{} unchanged\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            entries.len(),
            self.count(EntryStatus::Updated),
            self.count(EntryStatus::Unchanged),
            self.count(EntryStatus::DryRun),
            self.count(EntryStatus::Failed),
        ));
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        Self::stage(self, msg);
    }

    fn info(&self, msg: &str) {
        Self::info(self, msg);
    }

    fn debug(&self, msg: &str) {
        Self::debug(self, msg);
    }

    fn warn(&self, msg: &str) {
        Self::warn(self, msg);
    }

    fn error(&self, msg: &str) {
        Self::error(self, msg);
    }

    fn dry_run(&self, msg: &str) {
        Self::dry_run(self, msg);
    }

    fn record(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        Self::record(self, name, status, message);
    }
}
