//! Command: generate shell completions.
use std::io::Write;

use anyhow::Result;
use clap::CommandFactory as _;
use clap_complete::Shell;

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`.
///
/// # Errors
///
/// Currently infallible; returns `Result` for a uniform command signature.
pub fn run(shell: Shell, out: &mut dyn Write) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), "mailroom", out);
    Ok(())
}
