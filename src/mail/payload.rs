//! Gmail REST message documents and their reduction to [`EmailRecord`].
use base64::Engine as _;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use super::message::{EmailRecord, NO_READABLE_CONTENT};

/// Gmail encodes part bodies as base64url, with or without padding.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// `users.messages.list` response.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    /// Matching message references; absent when nothing matched.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
}

/// Id-only reference from a list response.
#[derive(Debug, Deserialize)]
pub struct MessageRef {
    /// Message id.
    pub id: String,
}

/// `users.messages.get?format=full` response.
#[derive(Debug, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Short plain-text excerpt.
    #[serde(default)]
    pub snippet: String,
    /// MIME tree.
    #[serde(default)]
    pub payload: MessagePart,
}

/// One node of the MIME tree.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// MIME type of this part.
    #[serde(default)]
    pub mime_type: String,
    /// Headers (only meaningful on the root part here).
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Inline body data.
    #[serde(default)]
    pub body: PartBody,
    /// Child parts; `None` for single-part messages.
    pub parts: Option<Vec<MessagePart>>,
}

/// Body of a MIME part.
#[derive(Debug, Deserialize, Default)]
pub struct PartBody {
    /// base64url-encoded content.
    pub data: Option<String>,
}

/// A `name: value` header.
#[derive(Debug, Deserialize)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Message {
    /// Reduce the document to the fields the tools show.
    #[must_use]
    pub fn into_record(self) -> EmailRecord {
        let headers = &self.payload.headers;
        EmailRecord {
            subject: header(headers, "Subject", "No Subject"),
            sender: header(headers, "From", "Unknown Sender"),
            date: header(headers, "Date", "Unknown Date"),
            body: extract_body(&self.payload),
            snippet: self.snippet,
            id: self.id,
        }
    }
}

/// First header named `name`, or `default`.
fn header(headers: &[Header], name: &str, default: &str) -> String {
    headers
        .iter()
        .find(|h| h.name == name)
        .map_or_else(|| default.to_string(), |h| h.value.clone())
}

/// Text body of a message.
///
/// Multipart messages use their first `text/plain` part, else their first
/// `text/html` part.  Single-part messages are read only when `text/plain`.
/// Anything else reads as [`NO_READABLE_CONTENT`].
#[must_use]
pub fn extract_body(payload: &MessagePart) -> String {
    let body = match &payload.parts {
        Some(parts) => first_decoded(parts, "text/plain")
            .or_else(|| first_decoded(parts, "text/html")),
        None if payload.mime_type == "text/plain" => decode_part(payload),
        None => None,
    };
    body.filter(|b| !b.is_empty())
        .unwrap_or_else(|| NO_READABLE_CONTENT.to_string())
}

fn first_decoded(parts: &[MessagePart], mime_type: &str) -> Option<String> {
    parts
        .iter()
        .filter(|p| p.mime_type == mime_type)
        .find_map(decode_part)
}

fn decode_part(part: &MessagePart) -> Option<String> {
    let data = part.body.data.as_deref().filter(|d| !d.is_empty())?;
    let bytes = BODY_ENGINE.decode(data).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(text: &str) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(text)
    }

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn headers_are_read_by_name() {
        let record = message(json!({
            "id": "m1",
            "snippet": "Hi there",
            "payload": {
                "mimeType": "text/plain",
                "headers": [
                    {"name": "Subject", "value": "Lunch?"},
                    {"name": "From", "value": "ana@example.com"},
                    {"name": "Date", "value": "Tue, 1 Oct 2024 10:00:00 +0000"}
                ],
                "body": {"data": encode("See you at noon")}
            }
        }))
        .into_record();

        assert_eq!(record.id, "m1");
        assert_eq!(record.subject, "Lunch?");
        assert_eq!(record.sender, "ana@example.com");
        assert_eq!(record.date, "Tue, 1 Oct 2024 10:00:00 +0000");
        assert_eq!(record.body, "See you at noon");
        assert_eq!(record.snippet, "Hi there");
    }

    #[test]
    fn missing_headers_use_placeholders() {
        let record = message(json!({"id": "m2", "payload": {"mimeType": "text/plain"}})).into_record();
        assert_eq!(record.subject, "No Subject");
        assert_eq!(record.sender, "Unknown Sender");
        assert_eq!(record.date, "Unknown Date");
        assert_eq!(record.body, NO_READABLE_CONTENT);
        assert_eq!(record.snippet, "");
    }

    #[test]
    fn multipart_prefers_plain_text_over_html() {
        let payload: MessagePart = serde_json::from_value(json!({
            "mimeType": "multipart/alternative",
            "parts": [
                {"mimeType": "text/html", "body": {"data": encode("<p>html</p>")}},
                {"mimeType": "text/plain", "body": {"data": encode("plain")}}
            ]
        }))
        .unwrap();
        assert_eq!(extract_body(&payload), "plain");
    }

    #[test]
    fn multipart_falls_back_to_html() {
        let payload: MessagePart = serde_json::from_value(json!({
            "mimeType": "multipart/alternative",
            "parts": [
                {"mimeType": "text/plain", "body": {}},
                {"mimeType": "text/html", "body": {"data": encode("<p>html</p>")}}
            ]
        }))
        .unwrap();
        assert_eq!(extract_body(&payload), "<p>html</p>");
    }

    #[test]
    fn single_part_html_is_not_read() {
        let payload: MessagePart = serde_json::from_value(json!({
            "mimeType": "text/html",
            "body": {"data": encode("<p>html</p>")}
        }))
        .unwrap();
        assert_eq!(extract_body(&payload), NO_READABLE_CONTENT);
    }

    #[test]
    fn padded_and_unpadded_data_both_decode() {
        let padded = base64::engine::general_purpose::URL_SAFE.encode("ab");
        assert!(padded.ends_with('='));
        for data in [padded, encode("ab")] {
            let payload: MessagePart = serde_json::from_value(json!({
                "mimeType": "text/plain",
                "body": {"data": data}
            }))
            .unwrap();
            assert_eq!(extract_body(&payload), "ab");
        }
    }

    #[test]
    fn empty_list_response_has_no_messages() {
        let list: MessageList = serde_json::from_value(json!({"resultSizeEstimate": 0})).unwrap();
        assert!(list.messages.is_empty());
    }
}
