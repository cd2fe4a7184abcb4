//! Environment readings and the derived reports.

use super::state::{Resource, ResourceState};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    latest_per_point, EnvironmentReading, EnvironmentReadingCreate, EnvironmentStatistics, MineEnvironmentSummary,
    ReadingField, ReadingFilter, TrendReport,
};

#[derive(Debug, Clone)]
pub struct EnvironmentHook {
    api: ApiClient,
    resource: Resource<EnvironmentReading>,
}

impl EnvironmentHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            resource: Resource::new(),
        }
    }

    pub fn snapshot(&self) -> ResourceState<EnvironmentReading> {
        self.resource.snapshot()
    }

    pub fn resource(&self) -> &Resource<EnvironmentReading> {
        &self.resource
    }

    pub async fn fetch(&self, filter: &ReadingFilter) -> ApiResult<Vec<EnvironmentReading>> {
        let ticket = self.resource.begin_fetch();
        let result = self.api.environment().list(filter, self.api.page()).await;
        self.resource.finish_list(ticket, result)
    }

    /// Replace the list with the newest reading of each monitoring point
    /// matching `filter`.
    pub async fn fetch_latest_per_point(
        &self,
        filter: &ReadingFilter,
    ) -> ApiResult<Vec<EnvironmentReading>> {
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .environment()
            .list(filter, self.api.page())
            .await
            .map(latest_per_point);
        self.resource.finish_list(ticket, result)
    }

    pub async fn fetch_by_mine(&self, mine_id: i64) -> ApiResult<Vec<EnvironmentReading>> {
        self.fetch(&ReadingFilter::for_mine(mine_id)).await
    }

    pub async fn fetch_by_monitoring_point(
        &self,
        monitoring_point_id: i64,
    ) -> ApiResult<Vec<EnvironmentReading>> {
        self.fetch(&ReadingFilter::for_point(monitoring_point_id))
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<EnvironmentReading> {
        let ticket = self.resource.begin();
        let result = self.api.environment().get(id).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn latest(&self, monitoring_point_id: i64) -> ApiResult<EnvironmentReading> {
        let ticket = self.resource.begin();
        let result = self.api.environment().latest(monitoring_point_id).await;
        self.resource.finish(ticket, result)
    }

    pub async fn statistics(
        &self,
        monitoring_point_id: i64,
        hours: u32,
    ) -> ApiResult<EnvironmentStatistics> {
        let ticket = self.resource.begin();
        let result = self
            .api
            .environment()
            .statistics(monitoring_point_id, hours)
            .await;
        self.resource.finish(ticket, result)
    }

    pub async fn trends(
        &self,
        monitoring_point_id: i64,
        field: ReadingField,
        hours: u32,
    ) -> ApiResult<TrendReport> {
        let ticket = self.resource.begin();
        let result = self
            .api
            .environment()
            .trends(monitoring_point_id, field, hours)
            .await;
        self.resource.finish(ticket, result)
    }

    /// Replace the list with the readings of a point that crossed a threshold.
    pub async fn threshold_alerts(
        &self,
        monitoring_point_id: i64,
    ) -> ApiResult<Vec<EnvironmentReading>> {
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .environment()
            .threshold_alerts(monitoring_point_id, self.api.page())
            .await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn mine_summary(&self, mine_id: i64, hours: u32) -> ApiResult<MineEnvironmentSummary> {
        let ticket = self.resource.begin();
        let result = self.api.environment().mine_summary(mine_id, hours).await;
        self.resource.finish(ticket, result)
    }

    pub async fn create(&self, reading: &EnvironmentReadingCreate) -> ApiResult<EnvironmentReading> {
        let ticket = self.resource.begin();
        let result = self.api.environment().create(reading).await;
        self.resource.finish_insert(ticket, result)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let ticket = self.resource.begin();
        let result = self.api.environment().delete(id).await;
        self.resource.finish_remove(ticket, id, result)
    }
}
