//! File-based session persistence adapter.
//!
//! Wraps [`SessionFile`] and implements [`SessionPersistence`].

use async_trait::async_trait;
use std::path::Path;

use crate::auth::{SessionFile, StoredSession};
use crate::traits::{PersistenceError, SessionPersistence};

/// File-based session store.
///
/// The session is stored in `<data_dir>/session.json`.
///
/// # Example
///
/// ```ignore
/// use minewatch::adapters::FileSessionStore;
/// use minewatch::traits::SessionPersistence;
///
/// let store = FileSessionStore::new(&config.data_dir);
/// if let Some(stored) = store.load().await? {
///     println!("found a stored session: {}", stored.is_complete());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file: SessionFile,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: SessionFile::new(data_dir),
        }
    }

    /// Get the path to the session file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl SessionPersistence for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, PersistenceError> {
        let stored = self.file.load()?;
        // An empty object left by hand-editing counts as nothing stored
        Ok(stored.filter(|s| *s != StoredSession::default()))
    }

    async fn save(&self, stored: &StoredSession) -> Result<(), PersistenceError> {
        self.file.save(stored)
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        self.file.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_empty_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        let stored = StoredSession {
            access_token: Some("abc".to_string()),
            token_type: Some("bearer".to_string()),
            user: None,
        };

        store.save(&stored).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(stored));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_empty_object_is_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        std::fs::write(store.path(), "{}").unwrap();

        assert!(store.load().await.unwrap().is_none());
    }
}
