//! Gmail inbox tools: list unread mail, trash it, archive it.
pub mod api;
pub mod credentials;
pub mod error;
pub mod gmail;
pub mod mailbox;
pub mod message;
pub mod payload;
pub mod server;
pub mod tools;

pub use api::{LabelChange, MailApi};
pub use credentials::{TokenFile, TokenProvider, default_token_path};
pub use error::MailError;
pub use gmail::GmailClient;
pub use message::EmailRecord;
pub use tools::ToolRouter;
