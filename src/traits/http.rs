//! Transport seam under the API client.
//!
//! [`HttpClient`] moves one fully built [`HttpRequest`] and hands back the raw
//! status and body. Status codes are not errors here; only failing to get a
//! response at all is an [`HttpError`].

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// Header name to value.
pub type Headers = HashMap<String, String>;

/// The verbs the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A request with headers set and body already encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    /// Attach `body` sent as `content_type`.
    pub fn body(self, content_type: &str, body: String) -> Self {
        let mut request = self.header("Content-Type", content_type);
        request.body = Some(body);
        request
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Serialize `value` as the body.
    pub fn json_body<T: serde::Serialize>(status: u16, value: &T) -> Self {
        Self::new(status, serde_json::to_vec(value).unwrap_or_default())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// No response was obtained.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Could not read the response: {0}")]
    Body(String),
    #[error("Invalid request: {0}")]
    Request(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Sends requests to the backend.
///
/// Implemented by the reqwest adapter and by the recording mock.
///
/// ```ignore
/// use minewatch::traits::{HttpClient, HttpRequest, Method};
///
/// let response = client
///     .send(HttpRequest::new(Method::Get, "http://localhost:8000/health"))
///     .await?;
/// assert!(response.is_success());
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError>;
}
