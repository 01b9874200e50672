//! Subscriber wiring: a colored console layer plus a plain-text run log.
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "mailroom::stage";
/// Target used for dry-run action lines.
pub(super) const DRY_RUN_TARGET: &str = "mailroom::dry_run";

/// Where console output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    /// Informational output on stdout, warnings and errors on stderr.
    Split,
    /// Everything on stderr; stdout is reserved for protocol traffic.
    StderrOnly,
}

/// The role an event plays in the output, decided from level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Info,
    Warn,
    Error,
    Debug,
}

impl Kind {
    fn of(event: &Event<'_>) -> Self {
        let meta = event.metadata();
        match (*meta.level(), meta.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Prefix used in the run log, where colors are unavailable.
    const fn file_tag(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::DryRun => "    [dry run] ",
            Self::Info => "    ",
            Self::Warn => "    [warn] ",
            Self::Error => "    [error] ",
            Self::Debug => "    [debug] ",
        }
    }
}

/// Pulls the formatted `message` field out of an event.
fn message_of(event: &Event<'_>) -> String {
    struct Message(String);

    impl Visit for Message {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                value.clone_into(&mut self.0);
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    let mut visitor = Message(String::new());
    event.record(&mut visitor);
    visitor.0
}

/// Appends every event, timestamped and uncolored, to the command's run log.
#[derive(Debug)]
pub(super) struct FileLayer {
    sink: Mutex<File>,
}

impl FileLayer {
    /// Run log for `command` under the cache directory, or `None` when it
    /// cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Start a fresh run log at `path` with a banner naming the build.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let version = option_env!("MAILROOM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let rule = "=".repeat(42);
        std::fs::write(
            path,
            format!("{rule}\nmailroom {version} started {}\n{rule}\n", format_utc_datetime()),
        )
        .ok()?;
        let sink = OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            sink: Mutex::new(sink),
        })
    }
}

impl<S: Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = format!(
            "[{}] {}{}",
            format_utc_time(),
            Kind::of(event).file_tag(),
            strip_ansi(&message_of(event))
        );
        if let Ok(mut sink) = self.sink.lock() {
            writeln!(sink, "{line}").ok();
        }
    }
}

/// Console rendering: bold stage arrows, indented detail lines.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let msg = message_of(event);
        match Kind::of(event) {
            Kind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Kind::Info => writeln!(writer, "  {msg}"),
            Kind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            Kind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            Kind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the process-wide subscriber.
///
/// The console shows `info` and up (`debug` with `verbose`); the run log at
/// `<cache>/mailroom/<command>.log` always records `debug` and up.  Call once,
/// before the first log line.
pub fn init_subscriber(verbose: bool, command: &str, console: Console) {
    use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt as _};
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let writer = match console {
        Console::Split => BoxMakeWriter::new(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        ),
        Console::StderrOnly => BoxMakeWriter::new(std::io::stderr),
    };
    let threshold = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ConsoleFormat)
                .with_writer(writer)
                .with_filter(threshold),
        )
        .with(FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG)))
        .init();
}
