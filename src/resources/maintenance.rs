//! Maintenance records, schedule and reports.

use chrono::{DateTime, Utc};

use super::state::{Resource, ResourceState};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    CostAnalysis, MaintenanceCreate, MaintenanceFilter, MaintenanceRecord, MaintenanceStatistics,
    MaintenanceUpdate,
};

#[derive(Debug, Clone)]
pub struct MaintenanceHook {
    api: ApiClient,
    resource: Resource<MaintenanceRecord>,
}

impl MaintenanceHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            resource: Resource::new(),
        }
    }

    pub fn snapshot(&self) -> ResourceState<MaintenanceRecord> {
        self.resource.snapshot()
    }

    pub fn resource(&self) -> &Resource<MaintenanceRecord> {
        &self.resource
    }

    pub async fn fetch_all(&self, filter: &MaintenanceFilter) -> ApiResult<Vec<MaintenanceRecord>> {
        let ticket = self.resource.begin_fetch();
        let result = self.api.maintenance().list(filter, self.api.page()).await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<MaintenanceRecord> {
        let ticket = self.resource.begin();
        let result = self.api.maintenance().get(id).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn create(&self, record: &MaintenanceCreate) -> ApiResult<MaintenanceRecord> {
        let ticket = self.resource.begin();
        let result = self.api.maintenance().create(record).await;
        self.resource.finish_insert(ticket, result)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: &MaintenanceUpdate,
    ) -> ApiResult<MaintenanceRecord> {
        let ticket = self.resource.begin();
        let result = self.api.maintenance().update(id, changes).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let ticket = self.resource.begin();
        let result = self.api.maintenance().delete(id).await;
        self.resource.finish_remove(ticket, id, result)
    }

    /// Replace the list with work scheduled in the next `days`.
    pub async fn upcoming(&self, days: u32) -> ApiResult<Vec<MaintenanceRecord>> {
        let ticket = self.resource.begin_fetch();
        let result = self.api.maintenance().upcoming(days).await;
        self.resource.finish_list(ticket, result)
    }

    /// Replace the list with the records of equipment at `mine_id`.
    pub async fn by_mine(&self, mine_id: i64) -> ApiResult<Vec<MaintenanceRecord>> {
        let ticket = self.resource.begin_fetch();
        let result = self.api.maintenance().by_mine(mine_id, self.api.page()).await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn by_equipment_type(
        &self,
        equipment_type: &str,
    ) -> ApiResult<Vec<MaintenanceRecord>> {
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .maintenance()
            .by_equipment_type(equipment_type, self.api.page())
            .await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn equipment_history(&self, equipment_id: i64) -> ApiResult<Vec<MaintenanceRecord>> {
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .maintenance()
            .equipment_history(equipment_id, self.api.page())
            .await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn performer_history(&self, performer: &str) -> ApiResult<Vec<MaintenanceRecord>> {
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .maintenance()
            .performer_history(performer, self.api.page())
            .await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn statistics(
        &self,
        equipment_id: Option<i64>,
        days: u32,
    ) -> ApiResult<MaintenanceStatistics> {
        let ticket = self.resource.begin();
        let result = self.api.maintenance().statistics(equipment_id, days).await;
        self.resource.finish(ticket, result)
    }

    pub async fn cost_analysis(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        mine_id: Option<i64>,
    ) -> ApiResult<CostAnalysis> {
        let ticket = self.resource.begin();
        let result = self.api.maintenance().cost_analysis(start, end, mine_id).await;
        self.resource.finish(ticket, result)
    }
}
