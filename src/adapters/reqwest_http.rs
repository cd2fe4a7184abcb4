//! Production transport over reqwest.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{HttpClient, HttpError, HttpRequest, Method, Response};

/// [`HttpClient`] backed by a shared `reqwest::Client` (rustls).
///
/// ```ignore
/// use minewatch::adapters::ReqwestHttpClient;
/// use minewatch::traits::{HttpClient, HttpRequest, Method};
///
/// let client = ReqwestHttpClient::with_timeout(None)?;
/// let response = client
///     .send(HttpRequest::new(Method::Get, "http://localhost:8000/health"))
///     .await?;
/// println!("status {}", response.status);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests give up after `timeout`; `None` waits as long as the
    /// transport allows.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map(Self::with_client).map_err(classify)
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

fn verb(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    let message = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(message)
    } else if err.is_connect() {
        HttpError::Connect(message)
    } else if err.is_builder() {
        HttpError::Request(message)
    } else if err.is_body() || err.is_decode() {
        HttpError::Body(message)
    } else {
        HttpError::Other(message)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError> {
        let mut builder = self.client.request(verb(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;
        Ok(Response::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_headers_and_status_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/mines/"))
            .and(header("Authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let response = ReqwestHttpClient::new()
            .send(
                HttpRequest::new(Method::Get, format!("{}/api/v1/mines/", server.uri()))
                    .header("Authorization", "Bearer abc"),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "[]");
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail":"gone"}"#))
            .mount(&server)
            .await;

        let response = ReqwestHttpClient::new()
            .send(HttpRequest::new(
                Method::Delete,
                format!("{}/api/v1/mines/3", server.uri()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_body_and_content_type_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"name":"East"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = ReqwestHttpClient::new()
            .send(
                HttpRequest::new(Method::Put, format!("{}/api/v1/mines/3", server.uri()))
                    .body("application/json", r#"{"name":"East"}"#.to_string()),
            )
            .await
            .unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::with_timeout(Some(Duration::from_millis(50))).unwrap();
        let result = client
            .send(HttpRequest::new(Method::Get, format!("{}/slow", server.uri())))
            .await;

        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let result = ReqwestHttpClient::new()
            .send(HttpRequest::new(Method::Get, "http://127.0.0.1:1/unreachable"))
            .await;

        assert!(matches!(result, Err(HttpError::Connect(_))));
    }
}
