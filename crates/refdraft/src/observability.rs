//! Logging setup: a stderr console layer plus an optional log file.
//!
//! stdout stays free for command output and the MCP stdio transport.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path.
pub const LOG_PATH_ENV: &str = "REFDRAFT_LOG_PATH";

/// Log directory; the file inside it is [`LOG_FILE_NAME`].
pub const LOG_DIR_ENV: &str = "REFDRAFT_LOG_DIR";

/// File name used when only a directory is known.
pub const LOG_FILE_NAME: &str = "refdraft.log";

/// Where log output goes besides stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log file, if file logging is on.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured directory.
    ///
    /// `REFDRAFT_LOG_PATH` beats `REFDRAFT_LOG_DIR`, which beats `config_dir`.
    pub fn from_env_with_overrides(config_dir: Option<PathBuf>) -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let log_file = non_empty(LOG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| non_empty(LOG_DIR_ENV).map(|dir| PathBuf::from(dir).join(LOG_FILE_NAME)))
            .or_else(|| config_dir.map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

/// Build the filter. `RUST_LOG` wins; otherwise `-q` and `-v` adjust the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when file logging is on; keep it alive
/// until exit so buffered lines are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let Some(ref path) = config.log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::never(&dir, file_name));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(Some(guard))
}
