//! Environment readings, statistics and trends.

use super::client::ApiClient;
use super::ensure_range;
use super::query::{Page, Query};
use crate::error::ApiResult;
use crate::models::{
    EnvironmentReading, EnvironmentReadingCreate, EnvironmentReadingUpdate, EnvironmentStatistics,
    MineEnvironmentSummary, ReadingField, ReadingFilter, TrendReport,
};

/// Window accepted by the statistics, trend and summary endpoints.
pub const MAX_WINDOW_HOURS: u32 = 168;

#[derive(Debug, Clone)]
pub struct EnvironmentApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn environment(&self) -> EnvironmentApi {
        EnvironmentApi {
            client: self.clone(),
        }
    }
}

pub fn reading_query(filter: &ReadingFilter, page: Page) -> Query {
    Query::page(page)
        .push_opt("monitoring_point_id", filter.monitoring_point_id)
        .push_opt("mine_id", filter.mine_id)
        .push_time("start_time", filter.start_time)
        .push_time("end_time", filter.end_time)
}

impl EnvironmentApi {
    pub async fn list(&self, filter: &ReadingFilter, page: Page) -> ApiResult<Vec<EnvironmentReading>> {
        self.client
            .get("/environment-data/", &reading_query(filter, page))
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<EnvironmentReading> {
        self.client
            .get(&format!("/environment-data/{}", id), &Query::new())
            .await
    }

    pub async fn create(&self, reading: &EnvironmentReadingCreate) -> ApiResult<EnvironmentReading> {
        self.client.post("/environment-data/", reading).await
    }

    pub async fn update(
        &self,
        id: i64,
        changes: &EnvironmentReadingUpdate,
    ) -> ApiResult<EnvironmentReading> {
        self.client
            .put(&format!("/environment-data/{}", id), changes)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client
            .delete(&format!("/environment-data/{}", id))
            .await
    }

    /// Most recent reading of a monitoring point.
    pub async fn latest(&self, monitoring_point_id: i64) -> ApiResult<EnvironmentReading> {
        self.client
            .get(
                &format!("/environment-data/latest/{}", monitoring_point_id),
                &Query::new(),
            )
            .await
    }

    pub async fn statistics(
        &self,
        monitoring_point_id: i64,
        hours: u32,
    ) -> ApiResult<EnvironmentStatistics> {
        ensure_range("hours", hours, 1..=MAX_WINDOW_HOURS)?;
        self.client
            .get(
                &format!("/environment-data/statistics/{}", monitoring_point_id),
                &Query::new().push("hours", hours),
            )
            .await
    }

    pub async fn trends(
        &self,
        monitoring_point_id: i64,
        field: ReadingField,
        hours: u32,
    ) -> ApiResult<TrendReport> {
        ensure_range("hours", hours, 1..=MAX_WINDOW_HOURS)?;
        self.client
            .get(
                &format!("/environment-data/trends/{}", monitoring_point_id),
                &Query::new()
                    .push("field", field.as_str())
                    .push("hours", hours),
            )
            .await
    }

    /// Readings of a monitoring point that crossed a safety threshold.
    pub async fn threshold_alerts(
        &self,
        monitoring_point_id: i64,
        page: Page,
    ) -> ApiResult<Vec<EnvironmentReading>> {
        self.client
            .get(
                &format!("/environment-data/alerts/{}", monitoring_point_id),
                &Query::page(page),
            )
            .await
    }

    pub async fn mine_summary(&self, mine_id: i64, hours: u32) -> ApiResult<MineEnvironmentSummary> {
        ensure_range("hours", hours, 1..=MAX_WINDOW_HOURS)?;
        self.client
            .get(
                &format!("/environment-data/summary/mine/{}", mine_id),
                &Query::new().push("hours", hours),
            )
            .await
    }
}
