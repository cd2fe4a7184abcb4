//! Session state held in memory.
//!
//! The console is either anonymous or authenticated with both a token and a
//! profile. There is no representable state with only one of the two.

use crate::models::{TokenResponse, UserProfile};

/// Opaque bearer credential issued by the token endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    access_token: String,
    token_type: String,
}

impl AuthToken {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
        }
    }

    /// Raw token value.
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Value for the `Authorization` header.
    ///
    /// The backend reports `token_type: "bearer"`; the scheme is always sent
    /// capitalized.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl From<TokenResponse> for AuthToken {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.token_type)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// A token together with the profile it was verified against.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: AuthToken,
    user: UserProfile,
}

impl Session {
    pub fn new(token: AuthToken, user: UserProfile) -> Self {
        Self { token, user }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Same user, new token. Used after a refresh.
    pub fn with_token(&self, token: AuthToken) -> Self {
        Self {
            token,
            user: self.user.clone(),
        }
    }
}

/// In-memory session state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session().map(Session::user)
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.session().map(Session::token)
    }
}

/// Notifications broadcast to every subscriber of a [`super::SessionHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A login, registration or refresh committed a session.
    SignedIn(UserProfile),
    /// The user asked to sign out.
    SignedOut,
    /// The backend rejected the session token; the session was purged.
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    pub(crate) fn profile(username: &str) -> UserProfile {
        UserProfile {
            id: 1,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            full_name: None,
            role: UserRole::Operator,
            is_active: true,
            is_superuser: false,
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AuthToken::new("abc.def.ghi", "bearer");
        let printed = format!("{:?}", token);
        assert!(!printed.contains("abc.def.ghi"));
        assert!(printed.contains("bearer"));
    }

    #[test]
    fn test_authorization_header_value() {
        let token = AuthToken::new("t0k3n", "bearer");
        assert_eq!(token.authorization(), "Bearer t0k3n");
    }

    #[test]
    fn test_token_from_response() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"xyz","token_type":"bearer"}"#).unwrap();
        let token = AuthToken::from(response);
        assert_eq!(token.secret(), "xyz");
        assert_eq!(token.token_type(), "bearer");
    }

    #[test]
    fn test_state_accessors() {
        let anonymous = SessionState::Anonymous;
        assert!(!anonymous.is_authenticated());
        assert!(anonymous.user().is_none());
        assert!(anonymous.token().is_none());

        let session = Session::new(AuthToken::new("t", "bearer"), profile("li"));
        let state = SessionState::Authenticated(session);
        assert!(state.is_authenticated());
        assert_eq!(state.user().map(|u| u.username.as_str()), Some("li"));
        assert_eq!(state.token().map(AuthToken::secret), Some("t"));
    }

    #[test]
    fn test_with_token_keeps_user() {
        let session = Session::new(AuthToken::new("old", "bearer"), profile("wang"));
        let refreshed = session.with_token(AuthToken::new("new", "bearer"));
        assert_eq!(refreshed.user(), session.user());
        assert_eq!(refreshed.token().secret(), "new");
    }
}
