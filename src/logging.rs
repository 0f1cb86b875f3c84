use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The terminal owns stdout and stderr; only a configured file is used.
    FileOnly,
    /// Falls back to stderr when no file is configured.
    FileOrStderr,
}

/// `RUST_LOG` wins over the configured filter.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Installs the global subscriber. Returns whether one was installed.
pub fn init(config: &LogConfig, sink: LogSink) -> AppResult<bool> {
    let filter = env_filter(config);

    let result = match (&config.file, sink) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| {
                    AppError::io_with_context(
                        source,
                        format!("failed to open log file: {}", path.display()),
                    )
                })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        (None, LogSink::FileOrStderr) => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        (None, LogSink::FileOnly) => return Ok(false),
    };

    result.map_err(|err| AppError::invalid_argument(format!("failed to install logger: {err}")))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{LogSink, init};
    use crate::config::LogConfig;

    #[test]
    fn terminal_mode_without_file_installs_nothing() {
        let installed = init(&LogConfig::default(), LogSink::FileOnly).expect("init should pass");
        assert!(!installed);
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let config = LogConfig {
            file: Some(std::env::temp_dir().join("tryrepl-missing-dir").join("x").join("log")),
            ..LogConfig::default()
        };
        assert!(init(&config, LogSink::FileOnly).is_err());
    }
}
