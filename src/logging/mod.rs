//! Console and run-log output.
//!
//! Commands talk to a [`Logger`] through the [`Log`] trait; the subscriber
//! installed by [`init_subscriber`] decides where each line ends up.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::{Console, init_subscriber};
pub use types::{EntryStatus, Log, SummaryEntry};

/// A [`Logger`] whose events go only to `<tempdir>/test.log`.
///
/// The subscriber is thread-local and stays installed while the returned
/// guard is alive.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("tempdir");
    let layer = subscriber::FileLayer::at(&tmp.path().join("test.log")).expect("test log");
    let dispatch = tracing::Dispatch::new(
        tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG)),
    );
    let guard = tracing::dispatcher::set_default(&dispatch);
    (Logger::new("test"), tmp, guard)
}
