//! Wiring of the adapters, session and API client.
//!
//! Both the TUI and the CLI commands start from a [`ConsoleContext`]: the
//! concrete HTTP client and session file behind the trait seams, the shared
//! session handle, and the session store.

use std::sync::Arc;

use super::config::ConsoleConfig;
use crate::adapters::{FileSessionStore, ReqwestHttpClient};
use crate::api::ApiClient;
use crate::auth::{SessionHandle, SessionState, SessionStore};
use crate::resources::Hooks;
use crate::traits::{HttpClient, HttpError, SessionPersistence};

/// Error type for console startup.
#[derive(Debug)]
pub enum StartupError {
    /// The HTTP client could not be built
    Http(HttpError),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::Http(e) => write!(f, "HTTP client setup failed: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Http(e) => Some(e),
        }
    }
}

impl From<HttpError> for StartupError {
    fn from(e: HttpError) -> Self {
        StartupError::Http(e)
    }
}

/// Everything a console front end needs.
#[derive(Debug, Clone)]
pub struct ConsoleContext {
    pub config: ConsoleConfig,
    pub api: ApiClient,
    pub store: SessionStore,
}

impl ConsoleContext {
    /// Build with reqwest and the session file under `config.data_dir`.
    pub fn build(config: ConsoleConfig) -> Result<Self, StartupError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        let persistence = FileSessionStore::new(&config.data_dir);
        tracing::debug!(path = %persistence.path().display(), "Using session file");
        Ok(Self::with_adapters(
            config,
            Arc::new(http),
            Arc::new(persistence),
        ))
    }

    /// Build on caller-supplied adapters.
    pub fn with_adapters(
        config: ConsoleConfig,
        http: Arc<dyn HttpClient>,
        persistence: Arc<dyn SessionPersistence>,
    ) -> Self {
        let session = SessionHandle::new(persistence);
        let api = ApiClient::new(&config, http, session);
        let store = SessionStore::new(api.clone());
        Self { config, api, store }
    }

    pub fn session(&self) -> &SessionHandle {
        self.api.session()
    }

    /// Fresh hooks over this context's client.
    pub fn hooks(&self) -> Hooks {
        Hooks::new(&self.api)
    }

    /// Restore the stored session. No network.
    pub async fn restore(&self) -> SessionState {
        self.store.restore().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySession, MockHttpClient};
    use crate::auth::StoredSession;
    use crate::api::test_support::operator;

    #[tokio::test]
    async fn test_restore_through_context() {
        let storage = InMemorySession::with_stored(StoredSession {
            access_token: Some("abc".to_string()),
            token_type: Some("bearer".to_string()),
            user: Some(operator()),
        });
        let http = MockHttpClient::new();
        let context = ConsoleContext::with_adapters(
            ConsoleConfig::new(),
            Arc::new(http.clone()),
            Arc::new(storage),
        );

        let state = context.restore().await;

        assert!(state.is_authenticated());
        assert!(context.session().is_authenticated());
        assert!(http.get_requests().is_empty());
    }

    #[test]
    fn test_build_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let context =
            ConsoleContext::build(ConsoleConfig::new().with_data_dir(dir.path())).unwrap();
        assert!(!context.session().is_authenticated());
    }
}
