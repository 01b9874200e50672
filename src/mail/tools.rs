//! Tool catalog and dispatch for the inbox tools.
//!
//! Every call produces display text.  Failures are rendered into that text
//! rather than returned, since the caller relays it verbatim.
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use super::api::MailApi;
use super::error::MailError;
use super::mailbox::{Mailbox, Mutation};
use super::message::{EmailRecord, body_preview};
use crate::logging::Log;

/// List unread inbox messages.
pub const LIST_UNREAD_EMAILS: &str = "list_unread_emails";
/// Move a message to trash.
pub const DELETE_EMAIL: &str = "delete_email";
/// Remove a message from the inbox.
pub const ARCHIVE_EMAIL: &str = "archive_email";

/// `max_results` when the caller gives none.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Text returned for an empty listing.
pub const NO_UNREAD: &str = "No unread emails found matching the criteria.";

/// Description of one tool, serialized for `mailroom tools`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    /// Tool name used in requests.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// JSON Schema of the arguments object.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn target_schema(verb: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "message_id": {
                "type": "string",
                "description": format!("The Gmail message ID to {verb} (alternative to position)")
            },
            "position": {
                "type": "integer",
                "description": "The numbered position from the email list (alternative to message_id)"
            },
            "subject": {
                "type": "string",
                "description": "The email subject (for display purposes during approval)"
            }
        }
    })
}

/// All tools, in the order they are advertised.
#[must_use]
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: LIST_UNREAD_EMAILS,
            description: "List unread emails in Gmail inbox with optional subject filtering",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "subject_filter": {
                        "type": "string",
                        "description": "Optional filter to search for emails with specific subject content"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of emails to return (default: 50)",
                        "default": DEFAULT_MAX_RESULTS
                    }
                }
            }),
        },
        ToolSpec {
            name: DELETE_EMAIL,
            description: "Move an email to trash and mark it as read by ID or position number",
            input_schema: target_schema("move to trash"),
        },
        ToolSpec {
            name: ARCHIVE_EMAIL,
            description: "Archive an email (remove from inbox) by ID or position number",
            input_schema: target_schema("archive"),
        },
    ]
}

#[derive(Debug, Default, Deserialize)]
struct ListArgs {
    subject_filter: Option<String>,
    max_results: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct TargetArgs {
    message_id: Option<String>,
    position: Option<usize>,
    subject: Option<String>,
}

#[derive(Debug, Error)]
enum ToolError {
    #[error("Either message_id or position is required")]
    MissingTarget,
    #[error("Position {0} not found in current email list. Please run 'list emails' first.")]
    UnknownPosition(usize),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Positions (1-based) from the most recent listing, mapped to message ids.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListSession {
    positions: BTreeMap<usize, String>,
}

impl ListSession {
    /// Replace the mapping with `records`, numbered from 1.
    pub fn replace(&mut self, records: &[EmailRecord]) {
        self.positions = records
            .iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r.id.clone()))
            .collect();
    }

    /// Message id shown at `position`.
    #[must_use]
    pub fn resolve(&self, position: usize) -> Option<&str> {
        self.positions.get(&position).map(String::as_str)
    }
}

/// Render a listing as numbered entries.
#[must_use]
pub fn format_email_list(records: &[EmailRecord]) -> String {
    if records.is_empty() {
        return NO_UNREAD.to_string();
    }
    let mut out = format!("Found {} unread emails:\n\n", records.len());
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("{}: {}\n", i + 1, record.subject));
        out.push_str(&format!("   From: {}\n", record.sender));
        out.push_str(&format!("   Date: {}\n", record.date));
        if !record.snippet.is_empty() {
            out.push_str(&format!("   Snippet: {}\n", record.snippet));
        }
        if record.has_readable_body() {
            out.push_str(&format!("   Body: {}\n", body_preview(&record.body)));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Dispatches tool calls against one mailbox and keeps the list session.
#[derive(Debug)]
pub struct ToolRouter<A> {
    mailbox: Mailbox<A>,
    session: ListSession,
}

impl<A: MailApi> ToolRouter<A> {
    /// Router over `api` with an empty session.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            mailbox: Mailbox::new(api),
            session: ListSession::default(),
        }
    }

    /// Positions from the last successful listing.
    #[must_use]
    pub const fn session(&self) -> &ListSession {
        &self.session
    }

    /// Run `tool` with `arguments` and return the text to show.
    pub fn call(&mut self, tool: &str, arguments: &Value, log: &dyn Log) -> String {
        log.debug(&format!("tool call: {tool} {arguments}"));
        let result = match tool {
            LIST_UNREAD_EMAILS => self.list(arguments, log),
            DELETE_EMAIL => self.delete(arguments, log),
            ARCHIVE_EMAIL => self.archive(arguments, log),
            other => Err(ToolError::UnknownTool(other.to_string())),
        };
        result.unwrap_or_else(|e| {
            log.warn(&format!("{tool} failed: {e}"));
            format!("Error executing {tool}: {e}")
        })
    }

    fn list(&mut self, arguments: &Value, log: &dyn Log) -> Result<String, ToolError> {
        let args: ListArgs = parse_args(arguments)?;
        let max_results = args.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        let records = match self
            .mailbox
            .list_unread(args.subject_filter.as_deref(), max_results, log)
        {
            Ok(records) => records,
            Err(e) if e.is_auth() => {
                return Ok(format!("Gmail authentication setup required:\n\n{e}"));
            }
            Err(e) => return Err(e.into()),
        };
        self.session.replace(&records);
        log.info(&format!("listed {} unread emails", records.len()));
        Ok(format_email_list(&records))
    }

    fn delete(&self, arguments: &Value, log: &dyn Log) -> Result<String, ToolError> {
        let id = self.target(arguments, log)?;
        Ok(match self.mailbox.trash(&id, log) {
            Mutation::Done { subject } => format!("🗑️ Deleted: {subject}"),
            Mutation::Failed { error } => {
                format!("Failed to move email with ID {id} to trash. Error: {error}")
            }
        })
    }

    fn archive(&self, arguments: &Value, log: &dyn Log) -> Result<String, ToolError> {
        let id = self.target(arguments, log)?;
        Ok(match self.mailbox.archive(&id, log) {
            Mutation::Done { subject } => format!("📁 Archived: {subject}"),
            Mutation::Failed { error } => {
                format!("Failed to archive email with ID {id}. Error: {error}")
            }
        })
    }

    /// Message id from `message_id`, else from `position` via the session.
    fn target(&self, arguments: &Value, log: &dyn Log) -> Result<String, ToolError> {
        let args: TargetArgs = parse_args(arguments)?;
        if let Some(subject) = &args.subject {
            log.debug(&format!("target subject: {subject}"));
        }
        if let Some(id) = args.message_id.filter(|id| !id.is_empty()) {
            return Ok(id);
        }
        let position = args
            .position
            .filter(|p| *p > 0)
            .ok_or(ToolError::MissingTarget)?;
        self.session
            .resolve(position)
            .map(str::to_string)
            .ok_or(ToolError::UnknownPosition(position))
    }
}

/// Deserialize tool arguments; `null` reads as an empty object.
fn parse_args<T: DeserializeOwned + Default>(arguments: &Value) -> Result<T, ToolError> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    Ok(T::deserialize(arguments)?)
}
