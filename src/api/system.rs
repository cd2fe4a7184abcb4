//! Service health.

use super::client::ApiClient;
use crate::error::ApiResult;
use crate::models::HealthStatus;

#[derive(Debug, Clone)]
pub struct SystemApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn system(&self) -> SystemApi {
        SystemApi {
            client: self.clone(),
        }
    }
}

impl SystemApi {
    /// Query the service root `/health` endpoint. Needs no session.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.client.get_health().await
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::test_support::anonymous_client;

    #[tokio::test]
    async fn test_health_is_public() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(
            200,
            r#"{"status":"healthy","timestamp":"2024-06-01T00:00:00","version":"1.0.0","service":"mine-safety"}"#,
        ));

        let health = anonymous_client(&http).system().health().await.unwrap();

        assert!(health.is_healthy());
        assert_eq!(health.version.as_deref(), Some("1.0.0"));
        assert_eq!(http.get_requests()[0].header("Authorization"), None);
    }
}
