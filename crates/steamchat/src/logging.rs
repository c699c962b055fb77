//! Tracing setup: stdout plus a daily rolling file in the data directory.

use crate::config::Config;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "steamchat=info,steamchat_core=info";

/// Log file prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "steamchat.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept
/// alive for the life of the process. Without a data directory, logs go to
/// stdout only.
pub fn init_tracing() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_dir = Config::data_dir().map(|dir| dir.join("logs"));

    let (file_layer, guard) = match &log_dir {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Err(e) = log_dir {
        warn!(error = ?e, "No data directory, logging to stdout only");
    }

    guard
}
