use std::path::Path;

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the log filter. `RUST_LOG` wins when set.
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("quadrant=debug,warn")
        } else {
            EnvFilter::new("quadrant=info,warn")
        }
    })
}

/// Initialize the logging system with tracing.
///
/// If `log_dir` is provided, logs are also written to a daily rolling file in
/// that directory. The returned guard flushes the file writer when dropped and
/// must be held until shutdown.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let registry = tracing_subscriber::registry().with(log_filter(verbose));

    if let Some(dir) = log_dir {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "quadrant.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        registry
            .with(fmt::layer().with_target(true))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {e}"))?;

        Ok(Some(guard))
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {e}"))?;

        Ok(None)
    }
}
