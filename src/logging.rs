use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::domain::{SVConfig, SVError};

/// Expands `~` and environment variables in a user supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf, SVError> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|p| PathBuf::from(p.into_owned()))
        .map_err(|e| SVError::LoggingFailed(e.to_string()))
}

/// Logs go to a file, the terminal belongs to the UI. Without a log file nothing is recorded.
pub fn init(cfg: &SVConfig) -> Result<(), SVError> {
    let Some(path) = &cfg.log_file else {
        return Ok(());
    };
    let path = expand_path(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| SVError::LoggingFailed(format!("{}: {e}", path.display())))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .map_err(|e| SVError::LoggingFailed(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| SVError::LoggingFailed(e.to_string()))
}
