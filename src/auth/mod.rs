//! Session management for the console.
//!
//! - [`state`]: the two-state session machine and its token/profile pair
//! - [`stored`]: the persisted form and the JSON session file
//! - [`handle`]: the shared handle with its generation counter and events
//! - [`store`]: restore, login, register, logout and token refresh

pub mod handle;
pub mod state;
pub mod store;
pub mod stored;

pub use handle::SessionHandle;
pub use state::{AuthToken, Session, SessionEvent, SessionState};
pub use store::SessionStore;
pub use stored::{SessionFile, StoredSession};
