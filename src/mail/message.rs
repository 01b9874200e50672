//! Email records as presented to tool callers.

/// Body text used when a message has no decodable text part.
pub const NO_READABLE_CONTENT: &str = "No readable content";

/// Longest subject shown in mutation results.
const SUBJECT_LIMIT: usize = 60;
/// Longest body preview in list output.
const PREVIEW_LIMIT: usize = 200;

/// One message with the fields the tools display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailRecord {
    /// Gmail message id.
    pub id: String,
    /// `Subject` header, or `No Subject`.
    pub subject: String,
    /// `From` header, or `Unknown Sender`.
    pub sender: String,
    /// `Date` header, or `Unknown Date`.
    pub date: String,
    /// Decoded text body, or [`NO_READABLE_CONTENT`].
    pub body: String,
    /// Gmail's snippet (may be empty).
    pub snippet: String,
}

impl EmailRecord {
    /// Whether the body holds real text.
    #[must_use]
    pub fn has_readable_body(&self) -> bool {
        !self.body.is_empty() && self.body != NO_READABLE_CONTENT
    }
}

/// Cut `subject` to 60 characters, ending in `...` when shortened.
#[must_use]
pub fn truncate_subject(subject: &str) -> String {
    truncate_chars(subject, SUBJECT_LIMIT, SUBJECT_LIMIT - 3)
}

/// First 200 characters of `body`, followed by `...` when shortened.
#[must_use]
pub fn body_preview(body: &str) -> String {
    truncate_chars(body, PREVIEW_LIMIT, PREVIEW_LIMIT)
}

/// Keep `keep` chars plus `...` when `text` is longer than `limit` chars.
fn truncate_chars(text: &str, limit: usize, keep: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
