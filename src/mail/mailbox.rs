//! Inbox operations built on a [`MailApi`].
use super::api::{LabelChange, MailApi, unread_query};
use super::error::MailError;
use super::message::{EmailRecord, truncate_subject};
use crate::logging::Log;

/// Subject shown when a message's details cannot be fetched before a change.
const UNKNOWN_SUBJECT: &str = "Unknown Subject";

/// Outcome of a trash or archive request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Applied; carries the (truncated) subject.
    Done {
        /// Subject for display.
        subject: String,
    },
    /// Rejected by the service.
    Failed {
        /// Rendered error.
        error: String,
    },
}

/// Unread-inbox operations.
#[derive(Debug)]
pub struct Mailbox<A> {
    api: A,
}

impl<A: MailApi> Mailbox<A> {
    /// Wrap a mail service.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Unread inbox messages, optionally narrowed by subject.
    ///
    /// Messages whose details cannot be fetched are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the listing itself fails.
    pub fn list_unread(
        &self,
        subject_filter: Option<&str>,
        max_results: u32,
        log: &dyn Log,
    ) -> Result<Vec<EmailRecord>, MailError> {
        let query = unread_query(subject_filter);
        log.debug(&format!("listing: {query} (max {max_results})"));
        let ids = self.api.list_unread_ids(&query, max_results)?;

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.api.fetch(&id) {
                Ok(record) => records.push(record),
                Err(e) => log.warn(&format!("skipping message {id}: {e}")),
            }
        }
        Ok(records)
    }

    /// Move a message to trash and mark it read.
    pub fn trash(&self, id: &str, log: &dyn Log) -> Mutation {
        self.mutate(id, &LabelChange::trash(), log)
    }

    /// Remove a message from the inbox and mark it read.
    pub fn archive(&self, id: &str, log: &dyn Log) -> Mutation {
        self.mutate(id, &LabelChange::archive(), log)
    }

    fn mutate(&self, id: &str, change: &LabelChange, log: &dyn Log) -> Mutation {
        let subject = match self.api.fetch(id) {
            Ok(record) => record.subject,
            Err(e) => {
                log.debug(&format!("subject lookup for {id} failed: {e}"));
                UNKNOWN_SUBJECT.to_string()
            }
        };
        match self.api.modify_labels(id, change) {
            Ok(()) => Mutation::Done {
                subject: truncate_subject(&subject),
            },
            Err(e) => {
                log.warn(&format!("label change on {id} failed: {e}"));
                Mutation::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
