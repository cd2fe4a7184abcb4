//! Typed access to the monitoring backend.
//!
//! [`ApiClient`] owns transport, headers and the session-expiry rule. The
//! per-area modules wrap it with one method per endpoint; list filters are
//! turned into query strings there, and local range checks fail with
//! [`ApiError::Validation`](crate::error::ApiError::Validation) before any
//! request is sent.

pub mod alerts;
pub mod auth;
pub mod client;
pub mod environment;
pub mod equipment;
pub mod maintenance;
pub mod mines;
pub mod query;
pub mod system;

pub use alerts::AlertsApi;
pub use auth::AuthApi;
pub use client::{ApiClient, Auth};
pub use environment::EnvironmentApi;
pub use equipment::EquipmentApi;
pub use maintenance::MaintenanceApi;
pub use mines::MinesApi;
pub use query::{Page, Query, DEFAULT_PAGE_SIZE};
pub use system::SystemApi;

use std::ops::RangeInclusive;

use crate::error::{ApiError, ApiResult};

/// Reject `value` outside `range` the way the backend would.
pub(crate) fn ensure_range(name: &str, value: u32, range: RangeInclusive<u32>) -> ApiResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "{} must be between {} and {}",
            name,
            range.start(),
            range.end()
        )))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_range() {
        assert!(ensure_range("hours", 1, 1..=168).is_ok());
        assert!(ensure_range("hours", 168, 1..=168).is_ok());
        assert_eq!(
            ensure_range("hours", 0, 1..=168),
            Err(ApiError::validation("hours must be between 1 and 168"))
        );
        assert!(ensure_range("days", 31, 1..=30).is_err());
    }
}
