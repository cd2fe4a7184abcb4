//! Log file initialization.
//!
//! The terminal belongs to the console, so logs go to `<data_dir>/minewatch.log`
//! without ANSI colors.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::{ConsoleConfig, DEFAULT_LOG_FILTER};

/// Build the filter from `directive`, falling back to the default when it is
/// empty or does not parse.
pub fn env_filter(directive: &str) -> EnvFilter {
    if directive.trim().is_empty() {
        return EnvFilter::new(DEFAULT_LOG_FILTER);
    }
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber writing to the log file.
///
/// Returns an error only when the log file cannot be opened. A subscriber
/// that is already installed is left in place.
pub fn init_logging(config: &ConsoleConfig) -> io::Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    let installed = tracing_subscriber::registry()
        .with(env_filter(&config.log_filter))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    if installed.is_ok() {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            api_url = %config.api_url,
            "Logging initialized"
        );
    }
    Ok(())
}
