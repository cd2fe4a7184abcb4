//! Maintenance records and reports.

use chrono::{DateTime, Utc};

use super::client::ApiClient;
use super::ensure_range;
use super::query::{segment, Page, Query};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CostAnalysis, MaintenanceCreate, MaintenanceFilter, MaintenanceRecord, MaintenanceStatistics,
    MaintenanceUpdate,
};

#[derive(Debug, Clone)]
pub struct MaintenanceApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn maintenance(&self) -> MaintenanceApi {
        MaintenanceApi {
            client: self.clone(),
        }
    }
}

pub fn maintenance_query(filter: &MaintenanceFilter, page: Page) -> Query {
    Query::page(page)
        .push_opt("equipment_id", filter.equipment_id)
        .push_opt("maintenance_type", filter.maintenance_type.as_deref())
        .push_opt("status", filter.status.as_deref())
        .push_opt("performed_by", filter.performed_by.as_deref())
        .push_time("start_date", filter.start_date)
        .push_time("end_date", filter.end_date)
}

impl MaintenanceApi {
    pub async fn list(
        &self,
        filter: &MaintenanceFilter,
        page: Page,
    ) -> ApiResult<Vec<MaintenanceRecord>> {
        self.client
            .get("/maintenance/", &maintenance_query(filter, page))
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<MaintenanceRecord> {
        self.client
            .get(&format!("/maintenance/{}", id), &Query::new())
            .await
    }

    pub async fn create(&self, record: &MaintenanceCreate) -> ApiResult<MaintenanceRecord> {
        self.client.post("/maintenance/", record).await
    }

    pub async fn update(&self, id: i64, changes: &MaintenanceUpdate) -> ApiResult<MaintenanceRecord> {
        self.client
            .put(&format!("/maintenance/{}", id), changes)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/maintenance/{}", id)).await
    }

    /// Statistics over the last `days` (1..=365), optionally for one machine.
    pub async fn statistics(
        &self,
        equipment_id: Option<i64>,
        days: u32,
    ) -> ApiResult<MaintenanceStatistics> {
        ensure_range("days", days, 1..=365)?;
        self.client
            .get(
                "/maintenance/statistics/",
                &Query::new()
                    .push_opt("equipment_id", equipment_id)
                    .push("days", days),
            )
            .await
    }

    /// Scheduled work within the next `days` (1..=30).
    pub async fn upcoming(&self, days: u32) -> ApiResult<Vec<MaintenanceRecord>> {
        ensure_range("days", days, 1..=30)?;
        self.client
            .get("/maintenance/upcoming/", &Query::new().push("days", days))
            .await
    }

    pub async fn by_equipment_type(
        &self,
        equipment_type: &str,
        page: Page,
    ) -> ApiResult<Vec<MaintenanceRecord>> {
        self.client
            .get(
                "/maintenance/by-equipment-type/",
                &Query::page(page).push("equipment_type", equipment_type),
            )
            .await
    }

    pub async fn by_mine(&self, mine_id: i64, page: Page) -> ApiResult<Vec<MaintenanceRecord>> {
        self.client
            .get(
                "/maintenance/by-mine/",
                &Query::page(page).push("mine_id", mine_id),
            )
            .await
    }

    /// Spending between `start` and `end`; `start` must precede `end`.
    pub async fn cost_analysis(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        mine_id: Option<i64>,
    ) -> ApiResult<CostAnalysis> {
        if start >= end {
            return Err(ApiError::validation("start date must be before end date"));
        }
        self.client
            .get(
                "/maintenance/cost-analysis/",
                &Query::new()
                    .push_time("start_date", Some(start))
                    .push_time("end_date", Some(end))
                    .push_opt("mine_id", mine_id),
            )
            .await
    }

    pub async fn equipment_history(
        &self,
        equipment_id: i64,
        page: Page,
    ) -> ApiResult<Vec<MaintenanceRecord>> {
        self.client
            .get(
                &format!("/maintenance/equipment/{}/history", equipment_id),
                &Query::page(page),
            )
            .await
    }

    pub async fn performer_history(
        &self,
        performer: &str,
        page: Page,
    ) -> ApiResult<Vec<MaintenanceRecord>> {
        if performer.trim().is_empty() {
            return Err(ApiError::validation("performer is required"));
        }
        self.client
            .get(
                &format!("/maintenance/performer/{}/history", segment(performer)),
                &Query::page(page),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::test_support::signed_in_client;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_cost_analysis_checks_range_locally() {
        let http = MockHttpClient::new();
        let api = signed_in_client(&http).await;
        let day = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let result = api.maintenance().cost_analysis(day, day, None).await;

        assert!(matches!(result, Err(ApiError::Validation { .. })));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_upcoming_days_window() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, "[]"));
        let api = signed_in_client(&http).await;

        assert!(api.maintenance().upcoming(31).await.is_err());
        api.maintenance().upcoming(7).await.unwrap();

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "http://api.test/api/v1/maintenance/upcoming/?days=7"
        );
    }

    #[tokio::test]
    async fn test_performer_name_is_path_encoded() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, "[]"));
        let api = signed_in_client(&http).await;

        api.maintenance()
            .performer_history("Wang Fang", Page::new(0, 10))
            .await
            .unwrap();

        assert_eq!(
            http.get_requests()[0].url,
            "http://api.test/api/v1/maintenance/performer/Wang%20Fang/history?skip=0&limit=10"
        );
    }

    #[tokio::test]
    async fn test_statistics_with_type_breakdown() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(
            200,
            r#"{"total_records":3,"type_statistics":{"preventive":{"count":2,"cost":800.0,"duration":6.0}}}"#,
        ));
        let api = signed_in_client(&http).await;

        let stats = api.maintenance().statistics(Some(4), 30).await.unwrap();

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.type_statistics["preventive"].count, 2);
        assert_eq!(
            http.get_requests()[0].url,
            "http://api.test/api/v1/maintenance/statistics/?equipment_id=4&days=30"
        );
    }
}
