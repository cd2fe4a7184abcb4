//! Mines and the monitoring points of one mine.

use std::sync::{Arc, Mutex};

use super::state::{Resource, ResourceState};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    Mine, MineCreate, MineUpdate, MonitoringPoint, MonitoringPointCreate, MonitoringPointUpdate,
};

#[derive(Debug, Clone)]
pub struct MinesHook {
    api: ApiClient,
    resource: Resource<Mine>,
}

impl MinesHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            resource: Resource::new(),
        }
    }

    pub fn snapshot(&self) -> ResourceState<Mine> {
        self.resource.snapshot()
    }

    pub fn resource(&self) -> &Resource<Mine> {
        &self.resource
    }

    pub async fn fetch_all(&self) -> ApiResult<Vec<Mine>> {
        let ticket = self.resource.begin_fetch();
        let result = self.api.mines().list(self.api.page()).await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Mine> {
        let ticket = self.resource.begin();
        let result = self.api.mines().get(id).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn create(&self, mine: &MineCreate) -> ApiResult<Mine> {
        let ticket = self.resource.begin();
        let result = self.api.mines().create(mine).await;
        self.resource.finish_insert(ticket, result)
    }

    pub async fn update(&self, id: i64, changes: &MineUpdate) -> ApiResult<Mine> {
        let ticket = self.resource.begin();
        let result = self.api.mines().update(id, changes).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let ticket = self.resource.begin();
        let result = self.api.mines().delete(id).await;
        self.resource.finish_remove(ticket, id, result)
    }
}

/// Monitoring points, scoped to the mine last fetched.
#[derive(Debug, Clone)]
pub struct MonitoringPointsHook {
    api: ApiClient,
    resource: Resource<MonitoringPoint>,
    mine_id: Arc<Mutex<Option<i64>>>,
}

impl MonitoringPointsHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            resource: Resource::new(),
            mine_id: Arc::new(Mutex::new(None)),
        }
    }

    pub fn snapshot(&self) -> ResourceState<MonitoringPoint> {
        self.resource.snapshot()
    }

    pub fn resource(&self) -> &Resource<MonitoringPoint> {
        &self.resource
    }

    /// Mine whose points are currently listed.
    pub fn mine_id(&self) -> Option<i64> {
        *self.mine_id.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub async fn fetch_for_mine(&self, mine_id: i64) -> ApiResult<Vec<MonitoringPoint>> {
        *self.mine_id.lock().unwrap_or_else(|e| e.into_inner()) = Some(mine_id);
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .mines()
            .monitoring_points(mine_id, self.api.page())
            .await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn create(&self, point: &MonitoringPointCreate) -> ApiResult<MonitoringPoint> {
        let ticket = self.resource.begin();
        let result = self.api.mines().create_monitoring_point(point).await;
        let scoped = self.mine_id() == Some(point.mine_id);
        match result {
            Ok(created) if !scoped => self.resource.finish(ticket, Ok(created)),
            other => self.resource.finish_insert(ticket, other),
        }
    }

    pub async fn update(
        &self,
        mine_id: i64,
        point_id: i64,
        changes: &MonitoringPointUpdate,
    ) -> ApiResult<MonitoringPoint> {
        let ticket = self.resource.begin();
        let result = self
            .api
            .mines()
            .update_monitoring_point(mine_id, point_id, changes)
            .await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn delete(&self, mine_id: i64, point_id: i64) -> ApiResult<()> {
        let ticket = self.resource.begin();
        let result = self
            .api
            .mines()
            .delete_monitoring_point(mine_id, point_id)
            .await;
        self.resource.finish_remove(ticket, point_id, result)
    }
}
