//! Access-token sources for the Gmail client.
use std::path::PathBuf;

use serde::Deserialize;

use super::error::MailError;

/// Supplies a bearer token for each request.
pub trait TokenProvider {
    /// Current access token.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::AuthRequired`] when no token is available.
    fn access_token(&self) -> Result<String, MailError>;
}

/// Default token location: `$XDG_CONFIG_HOME/mailroom/token.json`, falling
/// back to `~/.config/mailroom/token.json`.
#[must_use]
pub fn default_token_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailroom")
        .join("token.json")
}

#[derive(Debug, Deserialize)]
struct TokenDocument {
    token: Option<String>,
    access_token: Option<String>,
}

/// Token read from a JSON file on every request, so an external refresh is
/// picked up without restarting.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Token source backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn auth_required(&self, reason: impl Into<String>) -> MailError {
        MailError::AuthRequired {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl TokenProvider for TokenFile {
    fn access_token(&self) -> Result<String, MailError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| self.auth_required(format!("cannot read token file: {e}")))?;
        let doc: TokenDocument = serde_json::from_str(&content)
            .map_err(|e| self.auth_required(format!("token file is not valid JSON: {e}")))?;
        doc.token
            .or(doc.access_token)
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.trim().to_string())
            .ok_or_else(|| self.auth_required("token file has no token"))
    }
}
