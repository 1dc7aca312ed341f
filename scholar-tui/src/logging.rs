//! File-backed tracing setup.
//!
//! The terminal is owned by the UI, so log output goes to `log_path`.

use crate::config::TuiConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Global subscriber already installed")]
    AlreadyInstalled,
}

/// `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &TuiConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(format!(
            "warn,scholar_core={level},scholar_tui={level}",
            level = config.log_level.to_ascii_lowercase()
        ))?),
    }
}

pub fn init(config: &TuiConfig) -> Result<(), LoggingError> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    let filter = build_filter(config)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    tracing::info!(path = %config.log_path.display(), "logging initialised");
    Ok(())
}
