use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOGGING_VAR: &str = "GUARDCHANNEL_LOGGING";
pub const LOG_FILE_VAR: &str = "GUARDCHANNEL_LOG_FILE";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("GUARDCHANNEL_LOGGING must be 'true' or 'false', got '{0}'")]
    InvalidFlag(String),
    #[error("failed to open log file {path}: {source}")]
    LogFile { path: String, source: std::io::Error },
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Initializes logging based on environment variables:
/// - GUARDCHANNEL_LOGGING: enables/disables logging (true/false, unset = false)
/// - GUARDCHANNEL_LOG_FILE: appends to this file instead of stderr
/// - RUST_LOG: level filter, `info` when unset
///
/// Returns whether a subscriber was installed.
pub fn init_logging() -> Result<bool, LoggingError> {
    let enabled = match env::var(LOGGING_VAR) {
        Ok(value) => match value.as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(LoggingError::InvalidFlag(value)),
        },
        Err(_) => false,
    };
    if !enabled {
        return Ok(false);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_thread_names(true);

    let installed = match env::var(LOG_FILE_VAR) {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LoggingError::LogFile { path, source })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        Err(_) => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))?;
    Ok(true)
}
