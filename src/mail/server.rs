//! Line-delimited JSON transport for the tool router.
//!
//! Each input line is `{"tool_name": ..., "arguments": {...}}`; each output
//! line is `{"text": ...}`, or `{"error": ...}` when the request line itself
//! cannot be understood.
use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::api::MailApi;
use super::tools::ToolRouter;
use crate::logging::Log;

#[derive(Debug, Deserialize)]
struct Request {
    tool_name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Text { text: String },
    Error { error: String },
}

/// Answer requests from `input` until it closes. Returns the number of
/// lines answered.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub fn serve<A, R, W>(
    router: &mut ToolRouter<A>,
    input: R,
    mut output: W,
    log: &dyn Log,
) -> Result<usize>
where
    A: MailApi,
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    for line in input.lines() {
        let line = line.context("read request")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => Response::Text {
                text: router.call(&request.tool_name, &request.arguments, log),
            },
            Err(e) => {
                log.warn(&format!("malformed request: {e}"));
                Response::Error {
                    error: format!("malformed request: {e}"),
                }
            }
        };
        let encoded = serde_json::to_string(&response).context("encode response")?;
        writeln!(output, "{encoded}").context("write response")?;
        output.flush().context("flush response")?;
        answered += 1;
    }
    log.debug(&format!("input closed after {answered} requests"));
    Ok(answered)
}
