//! Authentication endpoints.

use super::client::ApiClient;
use crate::auth::AuthToken;
use crate::error::ApiResult;
use crate::models::{LoginCredentials, TokenResponse, UserCreate, UserProfile};

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi {
        AuthApi {
            client: self.clone(),
        }
    }
}

impl AuthApi {
    /// Exchange credentials for a token (OAuth2 password form).
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<TokenResponse> {
        self.client
            .post_form_public(
                "/auth/login",
                &[
                    ("username", credentials.username.as_str()),
                    ("password", credentials.password.as_str()),
                    ("grant_type", "password"),
                ],
            )
            .await
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, new_user: &UserCreate) -> ApiResult<UserProfile> {
        self.client.post_public("/auth/register", new_user).await
    }

    /// Fetch the profile belonging to `token`, which need not be the
    /// session's token.
    pub async fn profile_for(&self, token: &AuthToken) -> ApiResult<UserProfile> {
        self.client.post_with_token("/auth/test-token", token).await
    }

    /// Fetch the profile of the current session.
    pub async fn current_profile(&self) -> ApiResult<UserProfile> {
        self.client.post_empty("/auth/test-token").await
    }

    /// Ask for a fresh token for the current session.
    pub async fn refresh(&self) -> ApiResult<TokenResponse> {
        self.client.post_empty("/auth/refresh").await
    }
}
