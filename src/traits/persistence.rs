//! Session persistence trait abstraction.
//!
//! The single seam through which the stored token and profile are read and
//! written. Production uses a JSON file; tests use an in-memory fake.

use async_trait::async_trait;

use crate::auth::StoredSession;

/// Session persistence errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// Failed to load the stored session
    LoadFailed(String),
    /// Failed to save the session
    SaveFailed(String),
    /// Failed to clear the stored session
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Stored data could not be (de)serialized
    Serialization(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            PersistenceError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            PersistenceError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            PersistenceError::Io(msg) => write!(f, "IO error: {}", msg),
            PersistenceError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err.to_string())
    }
}

/// Durable storage for the current session.
///
/// # Example
///
/// ```ignore
/// use minewatch::traits::SessionPersistence;
///
/// async fn signed_in<P: SessionPersistence>(store: &P) -> bool {
///     matches!(store.load().await, Ok(Some(stored)) if stored.into_session().is_some())
/// }
/// ```
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Load the stored session.
    ///
    /// # Returns
    /// - `Ok(Some(stored))` if something is stored (it may still be partial)
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if reading or parsing failed
    async fn load(&self) -> Result<Option<StoredSession>, PersistenceError>;

    /// Replace the stored session.
    async fn save(&self, stored: &StoredSession) -> Result<(), PersistenceError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), PersistenceError>;
}
