//! Diagnostic logging.  The terminal belongs to the game, so logs only go
//! anywhere if a log file has been configured.
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Environment variable holding the log filter directives
pub(crate) const FILTER_ENV_VAR: &str = "POWERSNAKE_LOG";

/// Environment variable that, if set, overrides the configured log file
pub(crate) const FILE_ENV_VAR: &str = "POWERSNAKE_LOG_FILE";

/// Install a global subscriber appending to `path`
pub(crate) fn init(path: &Path) -> Result<(), LogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_env(FILTER_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to open log file")]
    Open(#[from] std::io::Error),
    #[error("failed to install log subscriber")]
    Install(#[from] TryInitError),
}
