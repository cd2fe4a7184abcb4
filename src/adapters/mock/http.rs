//! Recording HTTP client for tests.
//!
//! Answers each request from a table of canned responses and keeps every
//! request it saw, so tests can assert on URLs, headers and bodies.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, HttpRequest, Response};

/// A request as the backend would have received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// `GET`, `POST`, `PUT` or `DELETE`
    pub method: String,
    /// Full URL including the query string
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Header lookup ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl From<HttpRequest> for RecordedRequest {
    fn from(request: HttpRequest) -> Self {
        Self {
            method: request.method.as_str().to_string(),
            url: request.url,
            headers: request.headers,
            body: request.body,
        }
    }
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    /// Fail without a response
    Error(HttpError),
    /// Answer after sleeping, for racing calls against each other
    Delayed(Duration, Response),
}

impl MockResponse {
    pub fn json<T: serde::Serialize>(status: u16, value: &T) -> Self {
        MockResponse::Success(Response::json_body(status, value))
    }

    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, body.to_string()))
    }
}

type ResponseKey = (Option<String>, String);

/// Canned-response HTTP client.
///
/// Lookup order: method and URL, then URL for any method, each first by exact
/// URL and then by the longest registered prefix, so a response registered
/// for `.../alerts` also answers `.../alerts?skip=0`. The default response
/// answers everything else.
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.set_response("http://api.test/api/v1/mines/", MockResponse::status(200, "[]"));
/// let api = ApiClient::new(&config, Arc::new(http.clone()), session);
/// api.mines().list(api.page()).await?;
/// assert_eq!(http.requests_for("GET").len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<ResponseKey, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` for any method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.lock_responses().insert((None, url.to_string()), response);
    }

    /// Answer `url` for one method only.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        self.lock_responses()
            .insert((Some(method.to_uppercase()), url.to_string()), response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        *self
            .default_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn clear_responses(&self) {
        self.lock_responses().clear();
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, HashMap<ResponseKey, MockResponse>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lookup(&self, method: &str, url: &str) -> Option<MockResponse> {
        let responses = self.lock_responses();
        let keys = [Some(method.to_string()), None];

        let exact = keys
            .iter()
            .find_map(|key| responses.get(&(key.clone(), url.to_string())));
        let prefixed = || {
            keys.iter().find_map(|key| {
                responses
                    .iter()
                    .filter(|((m, pattern), _)| m == key && url.starts_with(pattern.as_str()))
                    .max_by_key(|((_, pattern), _)| pattern.len())
                    .map(|(_, response)| response)
            })
        };
        if let Some(found) = exact.or_else(prefixed) {
            return Some(found.clone());
        }
        drop(responses);

        self.default_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError> {
        let recorded = RecordedRequest::from(request);
        let answer = self.lookup(&recorded.method, &recorded.url);
        let (method, url) = (recorded.method.clone(), recorded.url.clone());
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(recorded);

        match answer {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Err(HttpError::Other(format!("No mock response for {} {}", method, url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Method;

    fn get(url: &str) -> HttpRequest {
        HttpRequest::new(Method::Get, url)
    }

    #[tokio::test]
    async fn test_records_requests() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::status(200, "{}"));

        client
            .send(
                HttpRequest::new(Method::Put, "http://api.test/mines/1")
                    .header("Authorization", "Bearer token123")
                    .body("application/json", r#"{"name":"x"}"#.to_string()),
            )
            .await
            .unwrap();
        client
            .send(HttpRequest::new(Method::Delete, "http://api.test/mines/1"))
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].header("authorization"), Some("Bearer token123"));
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"name":"x"}"#));
        assert_eq!(requests[1].method, "DELETE");
        assert!(requests[1].body.is_none());
        assert_eq!(client.requests_for("delete").len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://api.test/down",
            MockResponse::Error(HttpError::Connect("refused".to_string())),
        );

        let result = client.send(get("http://api.test/down")).await;

        assert_eq!(result, Err(HttpError::Connect("refused".to_string())));
    }

    #[tokio::test]
    async fn test_method_specific_response_wins() {
        let client = MockHttpClient::new();
        client.set_response("http://api.test/mines/1", MockResponse::status(200, "{}"));
        client.set_method_response(
            "delete",
            "http://api.test/mines/1",
            MockResponse::status(500, "boom"),
        );

        let read = client.send(get("http://api.test/mines/1")).await.unwrap();
        let delete = client
            .send(HttpRequest::new(Method::Delete, "http://api.test/mines/1"))
            .await
            .unwrap();

        assert_eq!(read.status, 200);
        assert_eq!(delete.status, 500);
    }

    #[tokio::test]
    async fn test_longest_prefix_match() {
        let client = MockHttpClient::new();
        client.set_response("http://api.test/alerts", MockResponse::status(200, "list"));
        client.set_response("http://api.test/alerts/5/", MockResponse::status(200, "action"));

        let list = client.send(get("http://api.test/alerts?skip=0")).await.unwrap();
        let action = client
            .send(HttpRequest::new(Method::Post, "http://api.test/alerts/5/acknowledge"))
            .await
            .unwrap();

        assert_eq!(list.text(), "list");
        assert_eq!(action.text(), "action");
    }

    #[tokio::test]
    async fn test_unconfigured_url_fails() {
        let client = MockHttpClient::new();

        let result = client.send(get("http://api.test/missing")).await;

        assert!(matches!(result, Err(HttpError::Other(_))));
        assert_eq!(client.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delayed_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Delayed(
            Duration::from_millis(10),
            Response::new(200, "late"),
        ));

        let response = client.send(get("http://api.test/slow")).await.unwrap();

        assert_eq!(response.text(), "late");
    }

    #[tokio::test]
    async fn test_clear() {
        let client = MockHttpClient::new();
        client.set_response("http://api.test", MockResponse::status(200, ""));
        client.send(get("http://api.test")).await.unwrap();

        client.clear_requests();
        client.clear_responses();

        assert!(client.get_requests().is_empty());
        assert!(client.lookup("GET", "http://api.test").is_none());
    }
}
