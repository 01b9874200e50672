//! Keep every provider copy of a command in step with its primary.
//!
//! A sync runs in four steps against a single [`CommandSnapshot`]:
//!
//! 1. read every provider file once ([`snapshot`]),
//! 2. resolve the primary ([`primary`]),
//! 3. refuse to continue if a secondary was edited after it ([`conflict`]),
//! 4. rewrite the providers that differ ([`propagate`]).
//!
//! Nothing is written when step 3 fails.
pub mod conflict;
pub mod normalize;
pub mod primary;
pub mod propagate;
pub mod snapshot;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::{CommandSpec, PrimaryPolicy};
use crate::logging::Log;
use snapshot::CommandSnapshot;

/// Options for a single sync run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Report pending writes without touching any file.
    pub dry_run: bool,
}

/// What happened to one provider file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderAction {
    /// Already held the desired content.
    Unchanged,
    /// Written during this run.
    Updated,
    /// Differs, but dry-run left it alone.
    WouldUpdate,
}

/// Outcome for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOutcome {
    /// Provider name.
    pub name: String,
    /// Provider file path.
    pub path: PathBuf,
    /// Action taken.
    pub action: ProviderAction,
}

/// Result of syncing one command.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Command that was synced.
    pub command: String,
    /// Provider used as the source of truth.
    pub primary: String,
    /// Per-provider outcomes in name order.
    pub outcomes: Vec<ProviderOutcome>,
}

impl SyncReport {
    /// Number of files written (or that would be, under dry-run).
    #[must_use]
    pub fn writes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action != ProviderAction::Unchanged)
            .count()
    }
}

/// Sync every provider file of `spec` to its primary's body.
///
/// # Errors
///
/// Returns a [`ConfigError`](crate::error::ConfigError) if the primary cannot
/// be resolved, a [`SyncError`](crate::error::SyncError) on conflict, or an
/// I/O error from reading or writing provider files.
pub fn sync_command(
    spec: &CommandSpec,
    policy: &PrimaryPolicy,
    fallback: &str,
    opts: SyncOptions,
    log: &dyn Log,
) -> Result<SyncReport> {
    log.stage(&format!("Syncing {}", spec.name));

    let snapshot = CommandSnapshot::capture(spec)?;
    for (name, state) in snapshot.iter() {
        if state.exists() {
            log.debug(&format!("{name}: body {}", state.digest()));
        } else {
            log.debug(&format!("{name}: missing"));
        }
    }

    let primary = primary::detect_primary(spec, policy, fallback, &snapshot)?;
    log.info(&format!("primary provider: {primary} (policy {policy})"));

    conflict::ensure_no_conflicts(&spec.name, &snapshot, &primary)?;

    let body = snapshot
        .get(&primary)
        .map(|state| state.body.clone())
        .unwrap_or_default();
    if body.is_empty() {
        log.warn(&format!(
            "primary {primary} has no body; providers will carry only their wrappers"
        ));
    }

    let outcomes = propagate::propagate(spec, &snapshot, &body, opts.dry_run, log)?;
    Ok(SyncReport {
        command: spec.name.clone(),
        primary,
        outcomes,
    })
}
