//! Process-wide session handle.
//!
//! Every component that needs to know "who is signed in" holds a clone of
//! [`SessionHandle`]. Memory is the source of truth for the running process;
//! storage is written behind it. A generation counter is bumped on every
//! transition so in-flight work started under an older session can tell that
//! it has been superseded.

use std::future::Future;
use std::sync::{Arc, RwLock};

use tokio::sync::{broadcast, Mutex};

use super::state::{AuthToken, Session, SessionEvent, SessionState};
use super::stored::StoredSession;
use crate::error::{ApiError, ApiResult};
use crate::models::UserProfile;
use crate::traits::{PersistenceError, SessionPersistence};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Default)]
struct Slot {
    state: SessionState,
    generation: u64,
}

struct Inner {
    slot: RwLock<Slot>,
    persist_lock: Mutex<()>,
    persistence: Arc<dyn SessionPersistence>,
    events: broadcast::Sender<SessionEvent>,
}

/// Shared, cloneable view of the current session.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Inner>,
}

impl SessionHandle {
    /// Create an anonymous handle backed by `persistence`.
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                slot: RwLock::new(Slot::default()),
                persist_lock: Mutex::new(()),
                persistence,
                events,
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.read(|slot| slot.state.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|slot| slot.state.is_authenticated())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.read(|slot| slot.state.user().cloned())
    }

    /// Monotonic transition counter.
    pub fn generation(&self) -> u64 {
        self.read(|slot| slot.generation)
    }

    /// Subscribe to sign-in, sign-out and expiry notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub(crate) fn persistence(&self) -> &Arc<dyn SessionPersistence> {
        &self.inner.persistence
    }

    /// Token to attach to an authenticated call, with the generation it
    /// belongs to.
    pub(crate) fn bearer(&self) -> Option<(AuthToken, u64)> {
        self.read(|slot| {
            slot.state
                .token()
                .map(|token| (token.clone(), slot.generation))
        })
    }

    /// Take over a session read from storage. Returns false when it was
    /// already the current session.
    pub(crate) fn adopt(&self, session: Session) -> bool {
        let next = SessionState::Authenticated(session);
        self.write(|slot| {
            if slot.state == next {
                return false;
            }
            slot.state = next;
            slot.generation += 1;
            true
        })
    }

    /// Drop to anonymous without touching storage or notifying anyone.
    pub(crate) fn reset(&self) -> bool {
        self.write(|slot| {
            if !slot.state.is_authenticated() {
                return false;
            }
            slot.state = SessionState::Anonymous;
            slot.generation += 1;
            true
        })
    }

    /// Commit a freshly verified session, provided nothing else changed the
    /// session since `expected_generation` was read.
    pub(crate) async fn establish(
        &self,
        session: Session,
        expected_generation: u64,
    ) -> ApiResult<()> {
        let committed = self.write(|slot| {
            if slot.generation != expected_generation {
                return None;
            }
            slot.state = SessionState::Authenticated(session.clone());
            slot.generation += 1;
            Some(slot.generation)
        });

        let Some(generation) = committed else {
            tracing::info!("Discarding sign-in superseded by a newer session change");
            return Err(ApiError::authentication("Session was reset while signing in"));
        };

        tracing::info!(user = %session.user().username, "Session established");
        let _ = self
            .inner
            .events
            .send(SessionEvent::SignedIn(session.user().clone()));

        if let Err(e) = self.save(&session, generation).await {
            tracing::warn!("Failed to persist session: {}", e);
        }
        Ok(())
    }

    /// Sign out. Memory flips to anonymous before this returns; the returned
    /// future clears storage.
    pub fn sign_out(&self) -> impl Future<Output = Result<(), PersistenceError>> + Send + 'static {
        let was_authenticated = self.write(|slot| {
            let was = slot.state.is_authenticated();
            slot.state = SessionState::Anonymous;
            slot.generation += 1;
            was
        });

        if was_authenticated {
            tracing::info!("Signed out");
            let _ = self.inner.events.send(SessionEvent::SignedOut);
        }

        let handle = self.clone();
        async move { handle.clear_storage().await }
    }

    /// Purge the session after the backend rejected a token issued at
    /// `request_generation`. A stale rejection, or a second rejection for a
    /// session already purged, does nothing.
    pub(crate) async fn expire(&self, request_generation: u64) -> bool {
        let purged = self.write(|slot| {
            if slot.generation != request_generation || !slot.state.is_authenticated() {
                return false;
            }
            slot.state = SessionState::Anonymous;
            slot.generation += 1;
            true
        });

        if !purged {
            tracing::debug!(
                generation = request_generation,
                "Ignoring rejection for a session that is no longer current"
            );
            return false;
        }

        tracing::warn!("Session rejected by the server; signing out");
        let _ = self.inner.events.send(SessionEvent::Expired);
        if let Err(e) = self.clear_storage().await {
            tracing::warn!("Failed to clear expired session: {}", e);
        }
        true
    }

    async fn save(&self, session: &Session, generation: u64) -> Result<(), PersistenceError> {
        let _guard = self.inner.persist_lock.lock().await;
        if self.generation() != generation {
            tracing::debug!("Skipping save of a session that is no longer current");
            return Ok(());
        }
        self.inner
            .persistence
            .save(&StoredSession::from_session(session))
            .await
    }

    async fn clear_storage(&self) -> Result<(), PersistenceError> {
        let _guard = self.inner.persist_lock.lock().await;
        if self.is_authenticated() {
            return Ok(());
        }
        self.inner.persistence.clear().await
    }

    fn read<R>(&self, f: impl FnOnce(&Slot) -> R) -> R {
        let slot = self.inner.slot.read().unwrap_or_else(|e| e.into_inner());
        f(&slot)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Slot) -> R) -> R {
        let mut slot = self.inner.slot.write().unwrap_or_else(|e| e.into_inner());
        f(&mut slot)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.read(|slot| {
            f.debug_struct("SessionHandle")
                .field("state", &slot.state)
                .field("generation", &slot.generation)
                .finish_non_exhaustive()
        })
    }
}
