//! Startup: configuration, logging and wiring.
//!
//! - [`config`] - `ConsoleConfig`, builder and environment overrides
//! - [`logging`] - log file subscriber
//! - [`context`] - adapters, session and API client assembled for a front end
//!
//! # Usage
//!
//! ```ignore
//! use minewatch::startup::{init_logging, ConsoleConfig, ConsoleContext};
//!
//! let (config, ignored) = ConsoleConfig::from_env_checked();
//! init_logging(&config)?;
//! for setting in &ignored {
//!     tracing::warn!("{}", setting);
//! }
//! let context = ConsoleContext::build(config)?;
//! let state = context.restore().await;
//! ```

pub mod config;
pub mod context;
pub mod logging;

pub use config::{ConsoleConfig, IgnoredSetting, DEFAULT_API_URL, DEFAULT_LOG_FILTER};
pub use context::{ConsoleContext, StartupError};
pub use logging::init_logging;
