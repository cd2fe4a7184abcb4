//! Errors surfaced by backend calls.
//!
//! Every failure of an API call lands in one of these variants. The client
//! adapter only intercepts [`ApiError::Authentication`] from session calls;
//! everything else passes through to the resource hooks untouched.

use serde_json::Value;
use thiserror::Error;

use super::ErrorCategory;
use crate::traits::HttpError;

/// Longest raw body excerpt kept in an error message.
const MAX_BODY_EXCERPT: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Rejected input: 400/409/422 or a local precondition.
    #[error("{message}")]
    Validation { message: String },

    /// The session is not (or no longer) valid.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Authenticated, but not allowed.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Referenced record does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The request could not complete.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Any other non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A success response that does not match the expected shape.
    #[error("Unexpected response: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        ApiError::Authentication {
            message: message.into(),
        }
    }

    /// Error for a session call attempted while signed out.
    pub fn not_signed_in() -> Self {
        ApiError::authentication("Not signed in")
    }

    /// Map a non-2xx response to its error variant.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = extract_detail(status, body);
        match status {
            400 | 409 | 422 => ApiError::Validation { message },
            401 => ApiError::Authentication { message },
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            _ => ApiError::Server { status, message },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Validation { .. } => ErrorCategory::User,
            ApiError::Authentication { .. } | ApiError::Forbidden { .. } => ErrorCategory::Auth,
            ApiError::NotFound { .. } => ErrorCategory::User,
            ApiError::Network { .. } => ErrorCategory::Network,
            ApiError::Server { .. } => ErrorCategory::Server,
            ApiError::Decode { .. } => ErrorCategory::Client,
        }
    }

    /// Informational only; nothing in the console retries automatically.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Server { status, .. } => *status >= 500,
            ApiError::Network { .. } => true,
            _ => false,
        }
    }

    pub fn requires_reauth(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }

    /// Message shown next to the view that triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message } => message.clone(),
            ApiError::Authentication { message } => {
                if message.is_empty() {
                    "Your session has expired. Please sign in again.".to_string()
                } else {
                    message.clone()
                }
            }
            ApiError::Forbidden { .. } => {
                "Access denied. You don't have permission for this action.".to_string()
            }
            ApiError::NotFound { message } => message.clone(),
            ApiError::Network { .. } => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Server { status, message } => match *status {
                502..=504 => "The server is temporarily unavailable. Please try again later."
                    .to_string(),
                _ => format!("Server error ({}): {}", status, message),
            },
            ApiError::Decode { .. } => "The server sent an unexpected response.".to_string(),
        }
    }

    /// Short code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "E_API_VALIDATION",
            ApiError::Authentication { .. } => "E_API_AUTH",
            ApiError::Forbidden { .. } => "E_API_FORBIDDEN",
            ApiError::NotFound { .. } => "E_API_NOT_FOUND",
            ApiError::Network { .. } => "E_API_NETWORK",
            ApiError::Server { .. } => "E_API_SERVER",
            ApiError::Decode { .. } => "E_API_DECODE",
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Handles `{"detail": "..."}`, the validation-list form
/// `{"detail": [{"loc": [...], "msg": "..."}]}` and `{"message": "..."}`.
/// Falls back to the raw text, then to the status line.
pub fn extract_detail(status: u16, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(detail) = value.get("detail") {
            match detail {
                Value::String(text) => return text.clone(),
                Value::Array(items) => {
                    let parts: Vec<String> = items.iter().filter_map(describe_item).collect();
                    if !parts.is_empty() {
                        return parts.join("; ");
                    }
                }
                Value::Null => {}
                other => return other.to_string(),
            }
        }
        if let Some(Value::String(message)) = value.get("message") {
            return message.clone();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return status_reason(status).to_string();
    }
    match text.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

fn describe_item(item: &Value) -> Option<String> {
    let msg = item.get("msg")?.as_str()?;
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .map(|last| match last {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    Some(match field {
        Some(field) => format!("{}: {}", field, msg),
        None => msg.to_string(),
    })
}

fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not found",
        409 => "Conflict",
        422 => "Unprocessable entity",
        500 => "Internal server error",
        502 => "Bad gateway",
        503 => "Service unavailable",
        504 => "Gateway timeout",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_verbatim() {
        let body = br#"{"detail": "The user with this email already exists in the system."}"#;
        let err = ApiError::from_status(400, body);
        assert_eq!(
            err,
            ApiError::Validation {
                message: "The user with this email already exists in the system.".to_string()
            }
        );
        assert_eq!(err.user_message(), "The user with this email already exists in the system.");
    }

    #[test]
    fn test_detail_list_is_flattened() {
        let body = br#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "password"], "msg": "field required", "type": "missing"}
        ]}"#;
        assert_eq!(
            extract_detail(422, body),
            "email: value is not a valid email address; password: field required"
        );
    }

    #[test]
    fn test_message_body() {
        assert_eq!(extract_detail(500, br#"{"message": "boom"}"#), "boom");
    }

    #[test]
    fn test_non_json_body() {
        assert_eq!(extract_detail(502, b"<html>Bad Gateway</html>"), "<html>Bad Gateway</html>");
        assert_eq!(extract_detail(503, b""), "Service unavailable");
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(500);
        let detail = extract_detail(500, body.as_bytes());
        assert!(detail.ends_with('…'));
        assert_eq!(detail.chars().count(), MAX_BODY_EXCERPT + 1);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(401, b""), ApiError::Authentication { .. }));
        assert!(matches!(ApiError::from_status(403, b""), ApiError::Forbidden { .. }));
        assert!(matches!(ApiError::from_status(404, b""), ApiError::NotFound { .. }));
        assert!(matches!(ApiError::from_status(409, b""), ApiError::Validation { .. }));
        assert!(matches!(
            ApiError::from_status(500, b""),
            ApiError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn test_categories_and_codes() {
        let err = ApiError::Network {
            message: "refused".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_API_NETWORK");

        let err = ApiError::not_signed_in();
        assert!(err.requires_reauth());
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_http_error() {
        let err: ApiError = HttpError::Connect("refused".to_string()).into();
        assert_eq!(
            err,
            ApiError::Network {
                message: "Connection failed: refused".to_string()
            }
        );
    }
}
