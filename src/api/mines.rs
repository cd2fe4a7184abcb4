//! Mines and their monitoring points.

use super::client::ApiClient;
use super::query::{Page, Query};
use crate::error::ApiResult;
use crate::models::{
    Mine, MineCreate, MineUpdate, MonitoringPoint, MonitoringPointCreate, MonitoringPointUpdate,
};

#[derive(Debug, Clone)]
pub struct MinesApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn mines(&self) -> MinesApi {
        MinesApi {
            client: self.clone(),
        }
    }
}

impl MinesApi {
    pub async fn list(&self, page: Page) -> ApiResult<Vec<Mine>> {
        self.client.get("/mines/", &Query::page(page)).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Mine> {
        self.client.get(&format!("/mines/{}", id), &Query::new()).await
    }

    pub async fn create(&self, mine: &MineCreate) -> ApiResult<Mine> {
        self.client.post("/mines/", mine).await
    }

    pub async fn update(&self, id: i64, changes: &MineUpdate) -> ApiResult<Mine> {
        self.client.put(&format!("/mines/{}", id), changes).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/mines/{}", id)).await
    }

    pub async fn monitoring_points(&self, mine_id: i64, page: Page) -> ApiResult<Vec<MonitoringPoint>> {
        self.client
            .get(
                &format!("/mines/{}/monitoring-points", mine_id),
                &Query::page(page),
            )
            .await
    }

    pub async fn create_monitoring_point(
        &self,
        point: &MonitoringPointCreate,
    ) -> ApiResult<MonitoringPoint> {
        self.client
            .post(&format!("/mines/{}/monitoring-points", point.mine_id), point)
            .await
    }

    pub async fn update_monitoring_point(
        &self,
        mine_id: i64,
        point_id: i64,
        changes: &MonitoringPointUpdate,
    ) -> ApiResult<MonitoringPoint> {
        self.client
            .put(
                &format!("/mines/{}/monitoring-points/{}", mine_id, point_id),
                changes,
            )
            .await
    }

    pub async fn delete_monitoring_point(&self, mine_id: i64, point_id: i64) -> ApiResult<()> {
        self.client
            .delete(&format!("/mines/{}/monitoring-points/{}", mine_id, point_id))
            .await
    }
}
