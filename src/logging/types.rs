//! Summary records and the [`Log`] trait.

/// One line of the end-of-run summary.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    /// Provider (or other unit) the entry describes.
    pub name: String,
    /// Final status.
    pub status: EntryStatus,
    /// Optional detail (e.g. the file path that was written).
    pub message: Option<String>,
}

/// Outcome recorded for a summary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Already matched the desired state.
    Unchanged,
    /// Written during this run.
    Updated,
    /// Would have been written; dry-run left it alone.
    DryRun,
    /// Could not be brought to the desired state.
    Failed,
}

/// Sink for command output.
///
/// Sync and tool code take `&dyn Log`, so tests can hand in a recorder
/// without touching the global subscriber.
pub trait Log: Send + Sync {
    /// Section header.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Verbose-only detail.
    fn debug(&self, msg: &str);
    /// Recoverable problem.
    fn warn(&self, msg: &str);
    /// Failure.
    fn error(&self, msg: &str);
    /// Write skipped by `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Per-provider outcome for the summary.
    fn record(&self, name: &str, status: EntryStatus, message: Option<&str>);
}
