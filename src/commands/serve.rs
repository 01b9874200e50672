//! Command: serve the inbox tools over stdin/stdout.
use anyhow::Result;

use crate::cli::ServeOpts;
use crate::logging::Logger;
use crate::mail::server::serve;
use crate::mail::{GmailClient, TokenFile, ToolRouter, default_token_path};

/// Run the tool server until stdin closes.
///
/// The token file is read per request, so a missing token surfaces as a
/// setup message on the first tool call rather than a startup failure.
///
/// # Errors
///
/// Returns an error if stdin or stdout fails.
pub fn run(opts: &ServeOpts, log: &Logger) -> Result<()> {
    let token_path = opts.token.clone().unwrap_or_else(default_token_path);
    log.stage("Serving inbox tools");
    log.info(&format!("mailroom {}", super::version()));
    log.info(&format!("token file: {}", token_path.display()));
    if !token_path.exists() {
        log.warn(&format!(
            "token file {} does not exist yet; tool calls will ask for setup",
            token_path.display()
        ));
    }

    let mut router = ToolRouter::new(GmailClient::new(TokenFile::new(token_path)));
    let answered = serve(
        &mut router,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        log,
    )?;
    log.info(&format!("served {answered} requests"));
    Ok(())
}
