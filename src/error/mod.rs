//! Error handling for the console.
//!
//! - **Error Categories**: high-level classification for presentation
//! - **API Errors**: the taxonomy every backend call fails with
//!
//! Persistence failures live with their seam in [`crate::traits::PersistenceError`].
//!
//! | Variant | Status | Category |
//! |---------|--------|----------|
//! | Validation | 400, 409, 422, local checks | User |
//! | Authentication | 401, signed out | Auth |
//! | Forbidden | 403 | Auth |
//! | NotFound | 404 | User |
//! | Network | transport failure | Network |
//! | Server | other non-2xx | Server |
//! | Decode | malformed 2xx body | Client |

mod api;
mod category;

pub use api::{extract_detail, ApiError};
pub use category::ErrorCategory;

/// Result alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;
