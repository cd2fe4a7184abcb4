//! Alerts with filter, lifecycle transitions and the summary overview.

use std::sync::{Arc, Mutex};

use super::state::{Resource, ResourceState};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Alert, AlertCreate, AlertFilter, AlertSummary, AlertUpdate};

#[derive(Debug, Clone)]
pub struct AlertsHook {
    api: ApiClient,
    resource: Resource<Alert>,
    filter: Arc<Mutex<AlertFilter>>,
}

impl AlertsHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            resource: Resource::new(),
            filter: Arc::new(Mutex::new(AlertFilter::default())),
        }
    }

    pub fn snapshot(&self) -> ResourceState<Alert> {
        self.resource.snapshot()
    }

    pub fn resource(&self) -> &Resource<Alert> {
        &self.resource
    }

    /// Filter of the most recent fetch.
    pub fn filter(&self) -> AlertFilter {
        self.filter.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Fetch alerts matching `filter`.
    ///
    /// Records that the backend returns despite not matching are dropped, so
    /// the list only ever holds matching alerts.
    pub async fn fetch_all(&self, filter: &AlertFilter) -> ApiResult<Vec<Alert>> {
        *self.filter.lock().unwrap_or_else(|e| e.into_inner()) = filter.clone();
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .alerts()
            .list(filter, self.api.page())
            .await
            .map(|alerts| {
                let fetched = alerts.len();
                let kept: Vec<Alert> = alerts.into_iter().filter(|a| filter.matches(a)).collect();
                if kept.len() != fetched {
                    tracing::debug!(
                        fetched,
                        kept = kept.len(),
                        "Dropped alerts outside the requested filter"
                    );
                }
                kept
            });
        self.resource.finish_list(ticket, result)
    }

    /// Fetch again with the last filter.
    pub async fn refetch(&self) -> ApiResult<Vec<Alert>> {
        let filter = self.filter();
        self.fetch_all(&filter).await
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Alert> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().get(id).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn create(&self, alert: &AlertCreate) -> ApiResult<Alert> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().create(alert).await;
        let filter = self.filter();
        match result {
            Ok(created) if !filter.matches(&created) => self.resource.finish(ticket, Ok(created)),
            other => self.resource.finish_insert(ticket, other),
        }
    }

    pub async fn update(&self, id: i64, changes: &AlertUpdate) -> ApiResult<Alert> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().update(id, changes).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().delete(id).await;
        self.resource.finish_remove(ticket, id, result)
    }

    /// Acknowledge, then refetch to observe the new status.
    pub async fn acknowledge(&self, id: i64) -> ApiResult<Vec<Alert>> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().acknowledge(id).await;
        self.resource.finish(ticket, result)?;
        tracing::info!(alert = id, "Alert acknowledged");
        self.refetch().await
    }

    /// Resolve, then refetch to observe the new status.
    pub async fn resolve(&self, id: i64) -> ApiResult<Vec<Alert>> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().resolve(id).await;
        self.resource.finish(ticket, result)?;
        tracing::info!(alert = id, "Alert resolved");
        self.refetch().await
    }

    pub async fn summary(&self) -> ApiResult<AlertSummary> {
        let ticket = self.resource.begin();
        let result = self.api.alerts().summary().await;
        self.resource.finish(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::test_support::{signed_in_client, BASE};
    use crate::models::AlertStatus;

    fn alert_json(id: i64, status: &str) -> String {
        format!(
            r#"{{"id":{},"monitoring_point_id":2,"alert_type":"environmental_hazard",
                "severity":"high","status":"{}","title":"Gas","detected_at":"2024-06-01T10:00:00"}}"#,
            id, status
        )
    }

    fn seeded() -> String {
        format!(
            "[{},{},{},{}]",
            alert_json(1, "active"),
            alert_json(2, "acknowledged"),
            alert_json(3, "resolved"),
            alert_json(4, "false_alarm")
        )
    }

    #[tokio::test]
    async fn test_status_filter_returns_only_matching() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, &seeded()));
        let hook = AlertsHook::new(signed_in_client(&http).await);

        let alerts = hook
            .fetch_all(&AlertFilter::new().with_status(AlertStatus::Active))
            .await
            .unwrap();

        assert_eq!(alerts.len(), 1);
        assert!(hook
            .snapshot()
            .items
            .iter()
            .all(|a| a.status == AlertStatus::Active));
        assert!(http.get_requests()[0].url.contains("status=active"));
    }

    #[tokio::test]
    async fn test_acknowledge_refetches_with_last_filter() {
        let http = MockHttpClient::new();
        http.set_method_response(
            "POST",
            &format!("{}/alerts/1/acknowledge", BASE),
            MockResponse::status(200, r#"{"message":"Alert acknowledged successfully"}"#),
        );
        http.set_method_response("GET", &format!("{}/alerts/", BASE), MockResponse::status(200, &seeded()));
        let hook = AlertsHook::new(signed_in_client(&http).await);
        let filter = AlertFilter::new().with_status(AlertStatus::Acknowledged);
        hook.fetch_all(&filter).await.unwrap();

        hook.acknowledge(1).await.unwrap();

        let gets = http.requests_for("GET");
        assert_eq!(gets.len(), 2);
        assert!(gets[1].url.contains("status=acknowledged"));
        assert_eq!(hook.snapshot().items.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_resolve_does_not_refetch() {
        let http = MockHttpClient::new();
        http.set_method_response(
            "POST",
            &format!("{}/alerts/1/resolve", BASE),
            MockResponse::status(404, r#"{"detail":"Alert not found"}"#),
        );
        let hook = AlertsHook::new(signed_in_client(&http).await);

        let err = hook.resolve(1).await.unwrap_err();

        assert_eq!(err.user_message(), "Alert not found");
        assert_eq!(hook.snapshot().error.as_deref(), Some("Alert not found"));
        assert!(http.requests_for("GET").is_empty());
    }
}
