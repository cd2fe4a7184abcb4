//! Authenticated HTTP client for the monitoring backend.
//!
//! Every backend call goes through [`ApiClient`]. Session calls carry the
//! current bearer token; a 401 on such a call purges the session globally
//! (once per session) before the error is handed back to the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::query::{form_encode, Page, Query};
use crate::auth::{AuthToken, SessionHandle};
use crate::error::{ApiError, ApiResult};
use crate::startup::ConsoleConfig;
use crate::traits::{HttpClient, HttpRequest, Method, Response};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// How a request is authorized.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// No credentials (login, register, health).
    Public,
    /// The current session's token; fails fast when signed out.
    Session,
    /// An explicit token not yet committed to the session.
    Bearer(&'a AuthToken),
}

enum Body {
    Empty,
    Json(String),
    Form(String),
}

/// Backend client shared by the session store and the resource hooks.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    health_url: String,
    page_size: u32,
    http: Arc<dyn HttpClient>,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig, http: Arc<dyn HttpClient>, session: SessionHandle) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            health_url: config.health_url(),
            page_size: config.page_size,
            http,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// First page with the configured page size.
    pub fn page(&self) -> Page {
        Page::first(self.page_size)
    }

    /// Full URL for `path` relative to the API base.
    pub fn url(&self, path: &str, query: &Query) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        url
    }

    /// Authenticated GET decoding a JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ApiResult<T> {
        let response = self
            .send(Method::Get, path, query, Body::Empty, Auth::Session)
            .await?;
        decode(&response)
    }

    /// Authenticated POST with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(
                Method::Post,
                path,
                &Query::new(),
                Body::Json(serde_json::to_string(body)?),
                Auth::Session,
            )
            .await?;
        decode(&response)
    }

    /// Authenticated PUT with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(
                Method::Put,
                path,
                &Query::new(),
                Body::Json(serde_json::to_string(body)?),
                Auth::Session,
            )
            .await?;
        decode(&response)
    }

    /// Authenticated PUT whose arguments travel in the query string.
    pub async fn put_query<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ApiResult<T> {
        let response = self
            .send(Method::Put, path, query, Body::Empty, Auth::Session)
            .await?;
        decode(&response)
    }

    /// Authenticated POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .send(Method::Post, path, &Query::new(), Body::Empty, Auth::Session)
            .await?;
        decode(&response)
    }

    /// Authenticated POST without a body whose response content is ignored.
    pub async fn post_action(&self, path: &str) -> ApiResult<()> {
        self.send(Method::Post, path, &Query::new(), Body::Empty, Auth::Session)
            .await
            .map(|_| ())
    }

    /// Authenticated DELETE. Success means the backend confirmed removal.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(Method::Delete, path, &Query::new(), Body::Empty, Auth::Session)
            .await
            .map(|_| ())
    }

    /// Public form-encoded POST.
    pub async fn post_form_public<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> ApiResult<T> {
        let response = self
            .send(
                Method::Post,
                path,
                &Query::new(),
                Body::Form(form_encode(fields)),
                Auth::Public,
            )
            .await?;
        decode(&response)
    }

    /// Public JSON POST.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(
                Method::Post,
                path,
                &Query::new(),
                Body::Json(serde_json::to_string(body)?),
                Auth::Public,
            )
            .await?;
        decode(&response)
    }

    /// POST without a body, authorized by an explicit token.
    pub async fn post_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &AuthToken,
    ) -> ApiResult<T> {
        let response = self
            .send(
                Method::Post,
                path,
                &Query::new(),
                Body::Empty,
                Auth::Bearer(token),
            )
            .await?;
        decode(&response)
    }

    /// Public GET of the service health endpoint.
    pub async fn get_health<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let url = self.health_url.clone();
        let response = self
            .dispatch(Method::Get, &url, "/health", Body::Empty, Auth::Public)
            .await?;
        decode(&response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Body,
        auth: Auth<'_>,
    ) -> ApiResult<Response> {
        let url = self.url(path, query);
        self.dispatch(method, &url, path, body, auth).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        path: &str,
        body: Body,
        auth: Auth<'_>,
    ) -> ApiResult<Response> {
        let mut request = HttpRequest::new(method, url).header("Accept", JSON);

        let generation = match auth {
            Auth::Public => None,
            Auth::Bearer(token) => {
                request = request.header("Authorization", token.authorization());
                None
            }
            Auth::Session => match self.session.bearer() {
                Some((token, generation)) => {
                    request = request.header("Authorization", token.authorization());
                    Some(generation)
                }
                None => {
                    tracing::debug!(path, "Rejecting session call while signed out");
                    return Err(ApiError::not_signed_in());
                }
            },
        };

        request = match body {
            Body::Empty => request,
            Body::Json(json) => request.body(JSON, json),
            Body::Form(form) => request.body(FORM, form),
        };

        tracing::debug!(method = method.as_str(), path, "Dispatching request");
        let result = self.http.send(request).await;

        let response = result.map_err(|e| {
            tracing::warn!(method = method.as_str(), path, "Request failed: {}", e);
            ApiError::from(e)
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let error = ApiError::from_status(response.status, &response.body);
        tracing::debug!(
            method = method.as_str(),
            path,
            status = response.status,
            code = error.error_code(),
            category = %error.category(),
            "Request rejected"
        );

        if response.status == 401 {
            if let Some(generation) = generation {
                self.session.expire(generation).await;
            }
        }

        Err(error)
    }
}

fn decode<T: DeserializeOwned>(response: &Response) -> ApiResult<T> {
    response.json().map_err(|e| {
        tracing::warn!(status = response.status, "Unexpected response body: {}", e);
        ApiError::from(e)
    })
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
