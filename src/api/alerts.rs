//! Safety alerts.

use super::client::ApiClient;
use super::query::{Page, Query};
use crate::error::ApiResult;
use crate::models::{Alert, AlertCreate, AlertFilter, AlertSummary, AlertUpdate};

#[derive(Debug, Clone)]
pub struct AlertsApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn alerts(&self) -> AlertsApi {
        AlertsApi {
            client: self.clone(),
        }
    }
}

/// Query parameters for an alert listing.
pub fn alert_query(filter: &AlertFilter, page: Page) -> Query {
    Query::page(page)
        .push_opt("status", filter.status.map(|s| s.as_str()))
        .push_opt("severity", filter.severity.map(|s| s.as_str()))
        .push_opt("mine_id", filter.mine_id)
        .push_time("start_date", filter.start_date)
        .push_time("end_date", filter.end_date)
}

impl AlertsApi {
    /// Alerts matching `filter`, with monitoring point and user details.
    pub async fn list(&self, filter: &AlertFilter, page: Page) -> ApiResult<Vec<Alert>> {
        self.client.get("/alerts/", &alert_query(filter, page)).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Alert> {
        self.client.get(&format!("/alerts/{}", id), &Query::new()).await
    }

    pub async fn create(&self, alert: &AlertCreate) -> ApiResult<Alert> {
        self.client.post("/alerts/", alert).await
    }

    pub async fn update(&self, id: i64, changes: &AlertUpdate) -> ApiResult<Alert> {
        self.client.put(&format!("/alerts/{}", id), changes).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/alerts/{}", id)).await
    }

    pub async fn acknowledge(&self, id: i64) -> ApiResult<()> {
        self.client
            .post_action(&format!("/alerts/{}/acknowledge", id))
            .await
    }

    pub async fn resolve(&self, id: i64) -> ApiResult<()> {
        self.client
            .post_action(&format!("/alerts/{}/resolve", id))
            .await
    }

    pub async fn summary(&self) -> ApiResult<AlertSummary> {
        self.client
            .get("/alerts/summary/overview", &Query::new())
            .await
    }
}
