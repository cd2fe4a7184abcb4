//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - sends one [`HttpRequest`], returns status and body
//! - [`SessionPersistence`] - durable session storage (load, save, clear)

pub mod http;
pub mod persistence;

pub use http::{Headers, HttpClient, HttpError, HttpRequest, Method, Response};
pub use persistence::{PersistenceError, SessionPersistence};
