//! Errors from the Gmail client and its credential source.
use thiserror::Error;

/// Failures talking to Gmail.
///
/// Variants carry rendered text rather than transport types so results can
/// be cloned into tool output and built freely in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// No usable access token.
    #[error(
        "Authentication required but no valid token found ({reason}). \
         Write an OAuth access token for the gmail.modify scope to {path} \
         as {{\"token\": \"...\"}} and retry."
    )]
    AuthRequired {
        /// Token file that was looked up.
        path: String,
        /// Why no token could be read.
        reason: String,
    },

    /// Gmail answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body (Gmail's error document).
        body: String,
    },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl MailError {
    /// Whether the error means the caller must (re)authenticate.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::AuthRequired { .. } | Self::Http { status: 401, .. }
        )
    }
}
