//! `mailroom` binary: parses the command line, installs logging and maps
//! command errors onto exit codes.
use std::process::ExitCode;

use clap::Parser;

use mailroom_cli::cli::{Cli, Command};
use mailroom_cli::commands;
use mailroom_cli::error::{EXIT_OK, exit_code};
use mailroom_cli::logging::{self, Console, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    // stdout carries protocol traffic while serving.
    let console = if matches!(args.command, Command::Serve(_)) {
        Console::StderrOnly
    } else {
        Console::Split
    };
    logging::init_subscriber(args.verbose, args.command.name(), console);
    let log = Logger::new(args.command.name());

    let result = match args.command {
        Command::Sync(opts) => commands::sync::run(&opts, &log),
        Command::Serve(opts) => commands::serve::run(&opts, &log),
        Command::Tools => commands::tools::run(&mut std::io::stdout()),
        Command::Completions(opts) => {
            commands::completions::run(opts.shell, &mut std::io::stdout())
        }
        Command::Version => commands::version::run(&mut std::io::stdout()),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::from(exit_code(&e))
        }
    }
}
