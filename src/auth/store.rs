//! Sign-in, sign-out and session restore.
//!
//! [`SessionStore`] composes the auth endpoints with the shared
//! [`SessionHandle`]. A login is committed only after both the token and the
//! profile have been obtained, and only if no sign-out or purge happened while
//! it was in flight.

use std::future::Future;

use super::handle::SessionHandle;
use super::state::{AuthToken, Session, SessionState};
use super::stored::StoredSession;
use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{LoginCredentials, UserCreate, UserProfile};
use crate::traits::PersistenceError;

#[derive(Debug, Clone)]
pub struct SessionStore {
    api: ApiClient,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn handle(&self) -> &SessionHandle {
        self.api.session()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.handle().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.handle().is_authenticated()
    }

    /// Adopt whatever session storage holds. Never touches the network.
    ///
    /// Storage that is empty, partial or unreadable leaves the process signed
    /// out. Calling this twice with unchanged storage changes nothing.
    pub async fn restore(&self) -> SessionState {
        let stored = match self.handle().persistence().load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored session: {}", e);
                None
            }
        };

        match stored.and_then(StoredSession::into_session) {
            Some(session) => {
                if self.handle().adopt(session) {
                    tracing::info!(
                        user = ?self.handle().current_user().map(|u| u.username),
                        "Restored stored session"
                    );
                }
            }
            None => {
                if self.handle().reset() {
                    tracing::info!("Stored session gone; now signed out");
                }
            }
        }

        self.handle().snapshot()
    }

    /// Exchange credentials for a token, fetch the profile, then commit both.
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<Session> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(ApiError::validation("Username and password are required"));
        }

        let started_at = self.handle().generation();
        tracing::info!(user = %credentials.username, "Signing in");

        let token = AuthToken::from(self.api.auth().login(credentials).await?);
        let profile = self.api.auth().profile_for(&token).await?;
        if !profile.is_active {
            return Err(ApiError::authentication("Inactive user"));
        }

        let session = Session::new(token, profile);
        self.handle().establish(session.clone(), started_at).await?;
        Ok(session)
    }

    /// Create an account, then sign in with the same credentials.
    pub async fn register(&self, new_user: &UserCreate) -> ApiResult<Session> {
        if new_user.username.trim().is_empty() {
            return Err(ApiError::validation("Username is required"));
        }
        if new_user.email.trim().is_empty() {
            return Err(ApiError::validation("Email is required"));
        }
        if new_user.password.is_empty() {
            return Err(ApiError::validation("Password is required"));
        }

        let created = self.api.auth().register(new_user).await?;
        tracing::info!(user = %created.username, "Registered account");
        self.login(&new_user.credentials()).await
    }

    /// Sign out now; the returned future clears storage.
    pub fn logout(&self) -> impl Future<Output = Result<(), PersistenceError>> + Send + 'static {
        self.handle().sign_out()
    }

    /// Swap the current token for a fresh one, keeping the profile.
    pub async fn refresh_token(&self) -> ApiResult<Session> {
        let started_at = self.handle().generation();
        let current = match self.handle().snapshot() {
            SessionState::Authenticated(session) => session,
            SessionState::Anonymous => return Err(ApiError::not_signed_in()),
        };

        let token = AuthToken::from(self.api.auth().refresh().await?);
        let session = current.with_token(token);
        self.handle().establish(session.clone(), started_at).await?;
        tracing::debug!("Session token refreshed");
        Ok(session)
    }

    /// Ask the backend who the current token belongs to.
    ///
    /// A rejected token purges the session like any other authenticated call.
    pub async fn verify(&self) -> ApiResult<UserProfile> {
        self.api.auth().current_profile().await
    }
}
