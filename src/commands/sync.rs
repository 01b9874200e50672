//! Command: sync one command's prompt file across its providers.
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::SyncOpts;
use crate::config::{DEFAULT_CONFIG_FILE, SyncConfig};
use crate::logging::Logger;
use crate::sync::{SyncOptions, sync_command};

/// Run the sync command.
///
/// # Errors
///
/// Returns a config error (missing or malformed config, unknown command,
/// unresolvable primary), a sync conflict, or an I/O error.
pub fn run(opts: &SyncOpts, log: &Logger) -> Result<()> {
    let path = opts
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    log.info(&format!("mailroom {}", super::version()));

    log.stage("Loading configuration");
    let config = SyncConfig::load(&path)?;
    log.info(&format!(
        "loaded {} commands from {}",
        config.commands.len(),
        config.path.display()
    ));
    let spec = config.command(&opts.command)?;
    log.debug(&format!(
        "{} providers, primary policy {}",
        spec.providers.len(),
        config.primary
    ));

    let report = sync_command(
        spec,
        &config.primary,
        &config.fallback_provider,
        SyncOptions {
            dry_run: opts.dry_run,
        },
        log,
    )?;

    log.print_summary();
    if report.writes() == 0 {
        log.info(&format!("{}: all providers up to date", report.command));
    }
    Ok(())
}
