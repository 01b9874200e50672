//! [`MailApi`] over the Gmail REST API.
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;

use super::api::{LabelChange, MailApi};
use super::credentials::TokenProvider;
use super::error::MailError;
use super::message::EmailRecord;
use super::payload::{Message, MessageList};

const API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking Gmail client authenticated by a [`TokenProvider`].
pub struct GmailClient<T> {
    agent: ureq::Agent,
    tokens: T,
}

impl<T> std::fmt::Debug for GmailClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailClient").finish_non_exhaustive()
    }
}

impl<T: TokenProvider> GmailClient<T> {
    /// Create a client. Non-2xx statuses are returned as [`MailError::Http`].
    #[must_use]
    pub fn new(tokens: T) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(TIMEOUT))
            .build()
            .into();
        Self { agent, tokens }
    }

    fn bearer(&self) -> Result<String, MailError> {
        Ok(format!("Bearer {}", self.tokens.access_token()?))
    }

    fn read<R: DeserializeOwned>(
        response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> Result<R, MailError> {
        let mut response = response.map_err(|e| MailError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| MailError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(MailError::Http { status, body });
        }
        serde_json::from_str(&body).map_err(|e| MailError::Decode(e.to_string()))
    }
}

impl<T: TokenProvider> MailApi for GmailClient<T> {
    fn list_unread_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>, MailError> {
        let response = self
            .agent
            .get(API_BASE)
            .header("Authorization", &self.bearer()?)
            .query("q", query)
            .query("maxResults", max_results.to_string())
            .call();
        let list: MessageList = Self::read(response)?;
        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    fn fetch(&self, id: &str) -> Result<EmailRecord, MailError> {
        let response = self
            .agent
            .get(format!("{API_BASE}/{id}"))
            .header("Authorization", &self.bearer()?)
            .query("format", "full")
            .call();
        let message: Message = Self::read(response)?;
        Ok(message.into_record())
    }

    fn modify_labels(&self, id: &str, change: &LabelChange) -> Result<(), MailError> {
        let body = json!({
            "addLabelIds": change.add,
            "removeLabelIds": change.remove,
        });
        let response = self
            .agent
            .post(format!("{API_BASE}/{id}/modify"))
            .header("Authorization", &self.bearer()?)
            .header("Content-Type", "application/json")
            .send(body.to_string());
        Self::read::<serde_json::Value>(response).map(drop)
    }
}
