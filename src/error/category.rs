//! Coarse grouping of [`ApiError`](super::ApiError) variants.

use std::fmt;

/// Where a failure came from, which decides the hint shown with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No response: refused, unresolved, timed out.
    Network,
    /// No session, an expired one, or missing permission.
    Auth,
    /// 5xx and statuses the console has no meaning for.
    Server,
    /// A success body that did not match the expected record.
    Client,
    /// Input rejected locally or by the backend, or a missing record.
    User,
}

impl ErrorCategory {
    /// Transient failures worth a manual refresh.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
        }
    }

    /// What the user can do about it.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "check MINEWATCH_API_URL and that the service is running",
            ErrorCategory::Auth => "sign in again with `minewatch --login`",
            ErrorCategory::Server => "the service reported a fault; try again shortly",
            ErrorCategory::Client => "the console and service versions may not match",
            ErrorCategory::User => "check the values and try again",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCategory::Client.to_string(), "client");
    }
}
