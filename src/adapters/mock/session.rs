//! In-memory session persistence for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::auth::StoredSession;
use crate::traits::{PersistenceError, SessionPersistence};

/// In-memory session store for testing.
///
/// Clones share the same storage, so a test can keep one clone to inspect
/// what the session handle wrote through another.
///
/// # Example
///
/// ```ignore
/// use minewatch::adapters::mock::InMemorySession;
/// use minewatch::traits::SessionPersistence;
///
/// let storage = InMemorySession::new();
/// assert!(storage.load().await?.is_none());
///
/// storage.set_load_should_fail(true);
/// assert!(storage.load().await.is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    stored: Arc<Mutex<Option<StoredSession>>>,
    save_should_fail: Arc<AtomicBool>,
    load_should_fail: Arc<AtomicBool>,
    clear_should_fail: Arc<AtomicBool>,
    save_count: Arc<AtomicUsize>,
    clear_count: Arc<AtomicUsize>,
}

impl InMemorySession {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `stored`.
    pub fn with_stored(stored: StoredSession) -> Self {
        let store = Self::new();
        store.set_stored(Some(stored));
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        self.save_should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        self.load_should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        self.clear_should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Current contents, read synchronously.
    pub fn stored(&self) -> Option<StoredSession> {
        self.stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the contents synchronously.
    pub fn set_stored(&self, stored: Option<StoredSession>) {
        *self.stored.lock().unwrap_or_else(|e| e.into_inner()) = stored;
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Number of successful clears.
    pub fn clear_count(&self) -> usize {
        self.clear_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionPersistence for InMemorySession {
    async fn load(&self) -> Result<Option<StoredSession>, PersistenceError> {
        if self.load_should_fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.stored())
    }

    async fn save(&self, stored: &StoredSession) -> Result<(), PersistenceError> {
        if self.save_should_fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_stored(Some(stored.clone()));
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        if self.clear_should_fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::ClearFailed("Mock clear failure".to_string()));
        }
        self.set_stored(None);
        self.clear_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
