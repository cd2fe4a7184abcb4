//! Console configuration.
//!
//! Defaults point at a backend on localhost; every field can be overridden
//! from the environment or through the builder.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_PAGE_SIZE;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "info,minewatch=debug";

/// Directory name under the home directory.
const DATA_DIR_NAME: &str = ".minewatch";

/// API prefix stripped to find the service root.
const API_PREFIX: &str = "/api/v1";

/// Configuration for the console and the CLI commands.
///
/// # Example
///
/// ```ignore
/// use minewatch::startup::ConsoleConfig;
///
/// let config = ConsoleConfig::from_env()
///     .with_api_url("https://mines.example.com/api/v1")
///     .with_page_size(50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Base URL every API path is appended to
    pub api_url: String,
    /// Where the session file and the log live
    pub data_dir: PathBuf,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// `limit` sent with list calls
    pub page_size: u32,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            request_timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Create a new ConsoleConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. Trailing slashes are dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the list page size (at least 1).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Build config from `MINEWATCH_*` environment variables.
    ///
    /// Unset, empty or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_env_checked().0
    }

    /// Like [`from_env`](Self::from_env), also returning the values that
    /// were set but unusable, for reporting once logging is up.
    pub fn from_env_checked() -> (Self, Vec<IgnoredSetting>) {
        let mut config = Self::default();
        let mut ignored = Vec::new();

        if let Some(url) = env_value("MINEWATCH_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(home) = env_value("MINEWATCH_HOME") {
            config = config.with_data_dir(home);
        }
        if let Some(secs) = env_value("MINEWATCH_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config = config.with_request_timeout(Some(Duration::from_secs(secs)))
                }
                _ => ignored.push(IgnoredSetting {
                    name: "MINEWATCH_TIMEOUT_SECS",
                    value: secs,
                }),
            }
        }
        if let Some(filter) = env_value("MINEWATCH_LOG") {
            config = config.with_log_filter(filter);
        }

        (config, ignored)
    }

    /// Service root health endpoint, outside the versioned API prefix.
    pub fn health_url(&self) -> String {
        let root = self
            .api_url
            .strip_suffix(API_PREFIX)
            .unwrap_or(&self.api_url);
        format!("{}/health", root.trim_end_matches('/'))
    }

    /// Path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("minewatch.log")
    }
}

/// An environment override that was set but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredSetting {
    pub name: &'static str,
    pub value: String,
}

impl fmt::Display for IgnoredSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ignoring invalid {}={:?}", self.name, self.value)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
