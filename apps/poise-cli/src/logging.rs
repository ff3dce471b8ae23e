//! Log subscriber setup
//!
//! The menu owns stdout, so log output goes to stderr or to a file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Error types for logging setup
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    FileOpen(String),

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Where and how to log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
    pub json: bool,
}

impl LogOptions {
    /// Filter used when `RUST_LOG` is not set
    #[must_use]
    pub fn default_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_level()))
    }
}

/// Install the global subscriber
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is already installed
pub fn init_logging(options: &LogOptions) -> Result<()> {
    match &options.log_file {
        Some(path) => init_file_logging(path, options),
        None => init_stderr_logging(options),
    }
}

fn init_stderr_logging(options: &LogOptions) -> Result<()> {
    let registry = tracing_subscriber::registry().with(options.filter());

    if options.json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_target(true);

        registry
            .with(json_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))
    } else {
        let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))
    }
}

/// Initialize file-based logging, appending to `log_file`
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is already installed
pub fn init_file_logging(log_file: &Path, options: &LogOptions) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| LoggingError::FileOpen(format!("{}: {e}", log_file.display())))?;
    let writer = Mutex::new(file);

    let registry = tracing_subscriber::registry().with(options.filter());

    if options.json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        registry
            .with(json_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE);

        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))?;
    }

    info!("File logging initialized: {}", log_file.display());
    Ok(())
}
