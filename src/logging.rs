//! Tracing subscriber setup for the binary and for tests.
//!
//! Human-readable logs go to stderr; an optional log file receives the same
//! events as JSON lines. The level is taken from `RUST_LOG` (default `info`).

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

fn build_and_set_global_subscriber<P>(logfile: Option<P>, is_test: bool) -> io::Result<Option<WorkerGuard>>
where
    P: AsRef<Path>,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = fmt::layer().with_writer(io::stderr);
    let r = registry().with(env_filter).with(stderr_log);

    let (json_layer, guard) = match logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            let (writer, guard) = non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file);
            let layer = fmt::layer()
                .json()
                .with_span_list(true)
                .with_current_span(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let r = r.with(json_layer);
    if is_test {
        r.try_init().ok();
    } else {
        r.init();
    }
    Ok(guard)
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so the log file is flushed.
pub fn init_logging(logfile: Option<impl AsRef<Path>>) -> io::Result<Option<WorkerGuard>> {
    build_and_set_global_subscriber(logfile, false)
}

/// Like [`init_logging`] but tolerates a subscriber already being set.
pub fn init_test_logging(logfile: Option<impl AsRef<Path>>) -> io::Result<Option<WorkerGuard>> {
    build_and_set_global_subscriber(logfile, true)
}
