//! Detect providers that were edited independently of the primary.
use super::snapshot::CommandSnapshot;
use crate::error::SyncError;

/// Names of non-primary providers whose body is non-empty, differs from the
/// primary's body, and whose file is newer than the primary's.
///
/// An absent primary counts as modified at the epoch, so any existing
/// divergent file conflicts with it.
#[must_use]
pub fn find_conflicts(snapshot: &CommandSnapshot, primary: &str) -> Vec<String> {
    let (primary_body, primary_mtime) = snapshot
        .get(primary)
        .map_or(("", std::time::UNIX_EPOCH), |s| (s.body.as_str(), s.mtime()));

    snapshot
        .iter()
        .filter(|(name, state)| {
            *name != primary
                && !state.body.is_empty()
                && state.body != primary_body
                && state.mtime() > primary_mtime
        })
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Fail with [`SyncError::Conflict`] if [`find_conflicts`] reports anything.
///
/// # Errors
///
/// Returns the conflict naming every offending provider and the primary.
pub fn ensure_no_conflicts(
    command: &str,
    snapshot: &CommandSnapshot,
    primary: &str,
) -> Result<(), SyncError> {
    let providers = find_conflicts(snapshot, primary);
    if providers.is_empty() {
        Ok(())
    } else {
        Err(SyncError::Conflict {
            command: command.to_string(),
            primary: primary.to_string(),
            providers,
        })
    }
}
