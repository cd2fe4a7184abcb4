//! On-disk session record.
//!
//! The token and the profile are written together in one JSON document at
//! `<data_dir>/session.json`, so a reader never sees one without the other
//! unless the file was edited by hand. Partial records are treated as
//! anonymous by [`StoredSession::into_session`].

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::state::{AuthToken, Session};
use crate::models::UserProfile;
use crate::traits::PersistenceError;

/// The session file name inside the data directory.
const SESSION_FILE: &str = "session.json";

/// Serialized form of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl StoredSession {
    pub fn from_session(session: &Session) -> Self {
        Self {
            access_token: Some(session.token().secret().to_string()),
            token_type: Some(session.token().token_type().to_string()),
            user: Some(session.user().clone()),
        }
    }

    /// Returns a session only when both token and profile are present.
    pub fn into_session(self) -> Option<Session> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        let user = self.user?;
        let token_type = self.token_type.unwrap_or_else(|| "bearer".to_string());
        Some(Session::new(AuthToken::new(access_token, token_type), user))
    }

    pub fn is_complete(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty()) && self.user.is_some()
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Session file inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, `Ok(None)` when no file exists.
    pub fn load(&self) -> Result<Option<StoredSession>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .map_err(|e| PersistenceError::LoadFailed(format!("{}: {}", self.path.display(), e)))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map(Some)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    /// Write the session, creating the data directory when missing.
    ///
    /// The document is written to a sibling temp file and renamed into place.
    pub fn save(&self, stored: &StoredSession) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    PersistenceError::SaveFailed(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let file = File::create(&tmp_path)
            .map_err(|e| PersistenceError::SaveFailed(format!("{}: {}", tmp_path.display(), e)))?;
        restrict_permissions(&file)?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, stored)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp_path, &self.path)
            .map_err(|e| PersistenceError::SaveFailed(format!("{}: {}", self.path.display(), e)))
    }

    /// Remove the session file. Succeeds when there is nothing to remove.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::ClearFailed(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> Result<(), PersistenceError> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> Result<(), PersistenceError> {
    Ok(())
}
