use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_string, timestamp};

/// Console role of an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Operator,
    Viewer,
    /// Any role this build does not know about
    #[serde(other)]
    Other,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Operator => "operator",
            UserRole::Viewer => "viewer",
            UserRole::Other => "other",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated account as returned by the profile endpoint.
///
/// Never mutated locally; a fresh copy only arrives through a profile fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Name to show in headers: full name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Username/password pair sent to the token endpoint.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for account registration.
#[derive(Clone, Serialize, PartialEq)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
            role: UserRole::Operator,
            is_active: true,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        self.full_name = if full_name.trim().is_empty() {
            None
        } else {
            Some(full_name)
        };
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Credentials for the login that follows a successful registration.
    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(self.username.clone(), self.password.clone())
    }
}

impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Response of the token-issuing endpoints.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_backend_shape() {
        let json = r#"{
            "id": 7,
            "username": "zhang",
            "email": "zhang@example.com",
            "full_name": null,
            "role": "admin",
            "is_active": true,
            "is_superuser": false,
            "created_at": "2024-01-02T03:04:05",
            "updated_at": null,
            "last_login": null
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.role, UserRole::Admin);
        assert!(profile.full_name.is_none());
        assert!(profile.created_at.is_some());
        assert_eq!(profile.display_name(), "zhang");
    }

    #[test]
    fn test_unknown_role_is_tolerated() {
        let json = r#"{"id": 1, "username": "u", "email": "u@x", "role": "auditor"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, UserRole::Other);
        assert!(profile.is_active);
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let json = r#"{"id": 1, "username": "u", "email": "u@x", "full_name": "Li Wei"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "Li Wei");
    }

    #[test]
    fn test_user_create_serializes_without_empty_full_name() {
        let payload = UserCreate::new("u", "u@x", "secret").with_full_name("  ");
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("full_name").is_none());
        assert_eq!(value["role"], "operator");
        assert_eq!(value["is_active"], true);
    }

    #[test]
    fn test_secrets_are_not_debug_printed() {
        let creds = LoginCredentials::new("u", "hunter2");
        assert!(!format!("{:?}", creds).contains("hunter2"));
        let payload = UserCreate::new("u", "u@x", "hunter2");
        assert!(!format!("{:?}", payload).contains("hunter2"));
    }

    #[test]
    fn test_token_response_defaults_type() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }
}
