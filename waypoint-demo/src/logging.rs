//! File logging. The terminal belongs to the UI, so logs go to a file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "waypoint-demo.log";

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn setup_logging() -> anyhow::Result<WorkerGuard> {
    let dir = std::env::var_os("WAYPOINT_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("waypoint=debug,waypoint_demo=info"));

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))?;

    tracing::info!(dir = %dir.display(), file = LOG_FILE, "logging initialized");
    Ok(guard)
}
