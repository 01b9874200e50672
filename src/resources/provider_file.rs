//! A provider file brought to `header + body + footer`.
use std::time::SystemTime;

use anyhow::Result;

use super::helpers::fs::write_stamped;
use super::{Resource, ResourceChange, ResourceState};
use crate::config::ProviderSpec;
use crate::sync::normalize::assemble;
use crate::sync::snapshot::{ProviderState, short_digest};

/// One provider file and the content it should hold.
///
/// State is judged against the snapshot the sync was planned from, never a
/// fresh read.
#[derive(Debug)]
pub struct ProviderFileResource<'a> {
    /// Provider being written.
    pub provider: &'a ProviderSpec,
    /// Snapshot of the file when the sync started.
    pub snapshot: &'a ProviderState,
    /// Full desired file content.
    pub desired: String,
}

impl<'a> ProviderFileResource<'a> {
    /// Wrap `body` in the provider's header and footer.
    #[must_use]
    pub fn new(provider: &'a ProviderSpec, snapshot: &'a ProviderState, body: &str) -> Self {
        Self {
            provider,
            snapshot,
            desired: assemble(&provider.header, body, &provider.footer),
        }
    }
}

impl Resource for ProviderFileResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.provider.name, self.provider.path.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if self.snapshot.content == self.desired {
            Ok(ResourceState::Correct)
        } else if self.snapshot.exists() {
            Ok(ResourceState::Incorrect {
                current: format!("sha256:{}", short_digest(&self.snapshot.content)),
            })
        } else {
            Ok(ResourceState::Missing)
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.snapshot.content == self.desired {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        write_stamped(&self.provider.path, &self.desired, SystemTime::now())?;
        Ok(ResourceChange::Applied)
    }
}
