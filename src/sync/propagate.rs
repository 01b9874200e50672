//! Write the primary's body into every provider file that differs.
use anyhow::{Context as _, Result};

use super::snapshot::CommandSnapshot;
use super::{ProviderAction, ProviderOutcome};
use crate::config::CommandSpec;
use crate::logging::{EntryStatus, Log};
use crate::resources::provider_file::ProviderFileResource;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Bring every provider of `spec` to `header + body + footer`.
///
/// The primary itself is included, so a primary carrying a sibling's wrapper
/// is rewritten with its own.  With `dry_run` nothing is written and each
/// pending write is reported instead.
///
/// # Errors
///
/// Returns the first write failure; providers before it stay written.
pub fn propagate(
    spec: &CommandSpec,
    snapshot: &CommandSnapshot,
    body: &str,
    dry_run: bool,
    log: &dyn Log,
) -> Result<Vec<ProviderOutcome>> {
    let mut outcomes = Vec::with_capacity(spec.providers.len());
    for (name, provider) in &spec.providers {
        let state = snapshot
            .get(name)
            .with_context(|| format!("provider {name} missing from snapshot"))?;
        let resource = ProviderFileResource::new(provider, state, body);
        let desc = resource.description();
        let path = provider.path.display().to_string();

        let action = match resource.current_state()? {
            ResourceState::Correct => {
                log.debug(&format!("ok: {desc}"));
                ProviderAction::Unchanged
            }
            current if dry_run => {
                let msg = if let ResourceState::Incorrect { current } = current {
                    format!("would update {path} (currently {current})")
                } else {
                    format!("would create {path}")
                };
                log.dry_run(&msg);
                ProviderAction::WouldUpdate
            }
            _ => match resource.apply() {
                Ok(ResourceChange::Applied) => {
                    log.info(&format!("updated {path}"));
                    ProviderAction::Updated
                }
                Ok(ResourceChange::AlreadyCorrect) => ProviderAction::Unchanged,
                Err(e) => {
                    log.record(name, EntryStatus::Failed, Some(&path));
                    return Err(e.context(format!("failed to update {desc}")));
                }
            },
        };

        let status = match action {
            ProviderAction::Updated => EntryStatus::Updated,
            ProviderAction::Unchanged => EntryStatus::Unchanged,
            ProviderAction::WouldUpdate => EntryStatus::DryRun,
        };
        log.record(name, status, (action != ProviderAction::Unchanged).then_some(path.as_str()));
        outcomes.push(ProviderOutcome {
            name: name.clone(),
            path: provider.path.clone(),
            action,
        });
    }
    Ok(outcomes)
}
