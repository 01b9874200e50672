//! The seam between the tools and a mail service.
use super::error::MailError;
use super::message::EmailRecord;

/// Gmail search query for unread inbox messages.
pub const UNREAD_QUERY: &str = "is:unread in:inbox";

/// Gmail system label ids.
pub mod labels {
    /// Inbox membership.
    pub const INBOX: &str = "INBOX";
    /// Unread marker.
    pub const UNREAD: &str = "UNREAD";
    /// Trash.
    pub const TRASH: &str = "TRASH";
}

/// Labels to add to and remove from a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelChange {
    /// Label ids to add.
    pub add: Vec<String>,
    /// Label ids to remove.
    pub remove: Vec<String>,
}

impl LabelChange {
    /// Move to trash and mark read.
    #[must_use]
    pub fn trash() -> Self {
        Self {
            add: vec![labels::TRASH.to_string()],
            remove: vec![labels::UNREAD.to_string()],
        }
    }

    /// Remove from the inbox and mark read.
    #[must_use]
    pub fn archive() -> Self {
        Self {
            add: Vec::new(),
            remove: vec![labels::INBOX.to_string(), labels::UNREAD.to_string()],
        }
    }
}

/// Build the search query, optionally narrowed to a subject.
#[must_use]
pub fn unread_query(subject_filter: Option<&str>) -> String {
    match subject_filter.filter(|s| !s.is_empty()) {
        Some(subject) => format!("{UNREAD_QUERY} subject:\"{subject}\""),
        None => UNREAD_QUERY.to_string(),
    }
}

/// Operations the tools need from a mail service.
#[cfg_attr(test, mockall::automock)]
pub trait MailApi {
    /// Ids of messages matching `query`, at most `max_results`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the service cannot be queried.
    fn list_unread_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>, MailError>;

    /// Full details of one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the message cannot be fetched.
    fn fetch(&self, id: &str) -> Result<EmailRecord, MailError>;

    /// Apply a label change to one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the change is rejected.
    fn modify_labels(&self, id: &str, change: &LabelChange) -> Result<(), MailError>;
}
