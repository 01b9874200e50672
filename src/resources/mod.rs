//! Files on disk modeled as check-then-apply resources.
//!
//! A resource knows its desired state, can report how the world differs from
//! it, and can close that gap.  The sync propagator only ever calls
//! [`Resource::apply`] after [`Resource::current_state`] reported a
//! difference, so a dry run is just the first half of the protocol.
pub mod helpers;
pub mod provider_file;

use anyhow::Result;

/// How a resource compares with its desired state.
///
/// # Examples
///
/// ```
/// use mailroom_cli::resources::ResourceState;
///
/// let stale = ResourceState::Incorrect { current: "sha256:1a2b3c4d".into() };
/// assert_ne!(stale, ResourceState::Correct);
/// assert_ne!(ResourceState::Missing, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing on disk yet.
    Missing,
    /// On disk and already as desired.
    Correct,
    /// On disk with different content.
    Incorrect {
        /// Short fingerprint of what is there now.
        current: String,
    },
}

/// What [`Resource::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Content was written.
    Applied,
    /// Nothing needed writing.
    AlreadyCorrect,
}

/// A single idempotent unit of desired state.
pub trait Resource {
    /// Label for logs, e.g. `cursor (/repo/.cursor/commands/emails.md)`.
    fn description(&self) -> String;

    /// Compare the resource with its desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the resource to its desired state, creating parent directories
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn apply(&self) -> Result<ResourceChange>;
}
