//! Equipment inventory.

use super::client::ApiClient;
use super::query::{segment, Page, Query};
use crate::error::{ApiError, ApiResult};
use crate::models::equipment::EquipmentEnvelope;
use crate::models::{
    Equipment, EquipmentCreate, EquipmentFilter, EquipmentStatistics, EquipmentStatus,
    EquipmentUpdate,
};

#[derive(Debug, Clone)]
pub struct EquipmentApi {
    client: ApiClient,
}

impl ApiClient {
    pub fn equipment(&self) -> EquipmentApi {
        EquipmentApi {
            client: self.clone(),
        }
    }
}

pub fn equipment_query(filter: &EquipmentFilter, page: Page) -> Query {
    Query::page(page)
        .push_opt("mine_id", filter.mine_id)
        .push_opt("equipment_type", filter.equipment_type.as_deref())
        .push_opt("status", filter.status.map(|s| s.as_str()))
        .push_opt("manufacturer", filter.manufacturer.as_deref())
        .push_opt("model", filter.model.as_deref())
}

impl EquipmentApi {
    pub async fn list(&self, filter: &EquipmentFilter, page: Page) -> ApiResult<Vec<Equipment>> {
        self.client
            .get("/equipment/", &equipment_query(filter, page))
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Equipment> {
        self.client
            .get(&format!("/equipment/{}", id), &Query::new())
            .await
    }

    pub async fn create(&self, equipment: &EquipmentCreate) -> ApiResult<Equipment> {
        self.client.post("/equipment/", equipment).await
    }

    pub async fn update(&self, id: i64, changes: &EquipmentUpdate) -> ApiResult<Equipment> {
        self.client
            .put(&format!("/equipment/{}", id), changes)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/equipment/{}", id)).await
    }

    pub async fn operational(
        &self,
        mine_id: Option<i64>,
        page: Page,
    ) -> ApiResult<Vec<Equipment>> {
        self.client
            .get(
                "/equipment/operational/",
                &Query::page(page).push_opt("mine_id", mine_id),
            )
            .await
    }

    pub async fn in_maintenance(
        &self,
        mine_id: Option<i64>,
        page: Page,
    ) -> ApiResult<Vec<Equipment>> {
        self.client
            .get(
                "/equipment/maintenance/",
                &Query::page(page).push_opt("mine_id", mine_id),
            )
            .await
    }

    pub async fn needing_maintenance(
        &self,
        mine_id: Option<i64>,
        page: Page,
    ) -> ApiResult<Vec<Equipment>> {
        self.client
            .get(
                "/equipment/needing-maintenance/",
                &Query::page(page).push_opt("mine_id", mine_id),
            )
            .await
    }

    /// Change the status; returns the updated record.
    pub async fn set_status(&self, id: i64, status: EquipmentStatus) -> ApiResult<Equipment> {
        let envelope: EquipmentEnvelope = self
            .client
            .put_query(
                &format!("/equipment/{}/status", id),
                &Query::new().push("status", status.as_str()),
            )
            .await?;
        Ok(envelope.equipment)
    }

    /// Add `hours` to the running total; returns the updated record.
    pub async fn add_operating_hours(&self, id: i64, hours: f64) -> ApiResult<Equipment> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ApiError::validation("hours must be a non-negative number"));
        }
        let envelope: EquipmentEnvelope = self
            .client
            .put_query(
                &format!("/equipment/{}/operating-hours", id),
                &Query::new().push("hours", hours),
            )
            .await?;
        Ok(envelope.equipment)
    }

    /// Counts across all mines, or only `mine_id`'s equipment.
    pub async fn statistics(&self, mine_id: Option<i64>) -> ApiResult<EquipmentStatistics> {
        self.client
            .get(
                "/equipment/statistics/",
                &Query::new().push_opt("mine_id", mine_id),
            )
            .await
    }

    pub async fn by_serial(&self, serial_number: &str) -> ApiResult<Equipment> {
        if serial_number.trim().is_empty() {
            return Err(ApiError::validation("serial number is required"));
        }
        self.client
            .get(
                &format!("/equipment/by-serial/{}", segment(serial_number)),
                &Query::new(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::test_support::signed_in_client;

    const UPDATED: &str = r#"{"message":"Equipment status updated successfully",
        "equipment":{"id":5,"mine_id":1,"name":"Fan 2","equipment_type":"ventilation",
        "status":"maintenance","operating_hours":120.0}}"#;

    #[tokio::test]
    async fn test_set_status_unwraps_envelope() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, UPDATED));
        let api = signed_in_client(&http).await;

        let equipment = api
            .equipment()
            .set_status(5, EquipmentStatus::Maintenance)
            .await
            .unwrap();

        assert_eq!(equipment.status, "maintenance");
        let request = &http.get_requests()[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(
            request.url,
            "http://api.test/api/v1/equipment/5/status?status=maintenance"
        );
    }

    #[tokio::test]
    async fn test_negative_hours_rejected_locally() {
        let http = MockHttpClient::new();
        let api = signed_in_client(&http).await;

        let result = api.equipment().add_operating_hours(5, -1.0).await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_filter_query() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, "[]"));
        let api = signed_in_client(&http).await;

        let filter = EquipmentFilter {
            status: Some(EquipmentStatus::Offline),
            manufacturer: Some("Sandvik AB".to_string()),
            ..EquipmentFilter::for_mine(3)
        };
        api.equipment().list(&filter, Page::new(0, 20)).await.unwrap();

        assert_eq!(
            http.get_requests()[0].url,
            "http://api.test/api/v1/equipment/?skip=0&limit=20&mine_id=3&status=offline&manufacturer=Sandvik%20AB"
        );
    }

    #[tokio::test]
    async fn test_statistics_accepts_empty_object() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, "{}"));
        let api = signed_in_client(&http).await;

        let stats = api.equipment().statistics(None).await.unwrap();
        assert_eq!(stats, EquipmentStatistics::default());
    }

    #[tokio::test]
    async fn test_mine_scope_reaches_the_query() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, "[]"));
        let api = signed_in_client(&http).await;

        api.equipment()
            .needing_maintenance(Some(2), Page::new(0, 50))
            .await
            .unwrap();
        api.equipment().operational(None, Page::new(0, 50)).await.unwrap();

        let requests = http.get_requests();
        assert_eq!(
            requests[0].url,
            "http://api.test/api/v1/equipment/needing-maintenance/?skip=0&limit=50&mine_id=2"
        );
        assert_eq!(
            requests[1].url,
            "http://api.test/api/v1/equipment/operational/?skip=0&limit=50"
        );
    }
}
