//! Command-line surface of the `mailroom` binary.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Top-level CLI entry point for mailroom.
#[derive(Parser, Debug)]
#[command(
    name = "mailroom",
    about = "Gmail inbox tools and prompt file synchronisation across providers",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sync one command's prompt file across every provider
    Sync(SyncOpts),
    /// Serve the inbox tools over stdin/stdout (one JSON request per line)
    Serve(ServeOpts),
    /// Print the inbox tool catalog as JSON
    Tools,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sync(_) => "sync",
            Self::Serve(_) => "serve",
            Self::Tools => "tools",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Command name as declared in the config file
    pub command: String,

    /// Config file (defaults to commands_sync.config.yaml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}

/// Options for the `serve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ServeOpts {
    /// JSON file holding the Gmail access token
    #[arg(long)]
    pub token: Option<PathBuf>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Target shell
    pub shell: Shell,
}
