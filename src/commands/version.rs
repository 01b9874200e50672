//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Write the mailroom version to `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "mailroom {}", super::version())?;
    Ok(())
}
