//! Equipment inventory.

use std::sync::{Arc, Mutex};

use super::state::{Resource, ResourceState};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    Equipment, EquipmentCreate, EquipmentFilter, EquipmentStatistics, EquipmentStatus,
    EquipmentUpdate,
};

#[derive(Debug, Clone)]
pub struct EquipmentHook {
    api: ApiClient,
    resource: Resource<Equipment>,
    filter: Arc<Mutex<EquipmentFilter>>,
}

impl EquipmentHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            resource: Resource::new(),
            filter: Arc::new(Mutex::new(EquipmentFilter::default())),
        }
    }

    pub fn snapshot(&self) -> ResourceState<Equipment> {
        self.resource.snapshot()
    }

    pub fn resource(&self) -> &Resource<Equipment> {
        &self.resource
    }

    pub fn filter(&self) -> EquipmentFilter {
        self.filter.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub async fn fetch_all(&self, filter: &EquipmentFilter) -> ApiResult<Vec<Equipment>> {
        *self.filter.lock().unwrap_or_else(|e| e.into_inner()) = filter.clone();
        let ticket = self.resource.begin_fetch();
        let result = self.api.equipment().list(filter, self.api.page()).await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Equipment> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().get(id).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn create(&self, equipment: &EquipmentCreate) -> ApiResult<Equipment> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().create(equipment).await;
        self.resource.finish_insert(ticket, result)
    }

    pub async fn update(&self, id: i64, changes: &EquipmentUpdate) -> ApiResult<Equipment> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().update(id, changes).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().delete(id).await;
        self.resource.finish_remove(ticket, id, result)
    }

    pub async fn set_status(&self, id: i64, status: EquipmentStatus) -> ApiResult<Equipment> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().set_status(id, status).await;
        self.resource.finish_replace(ticket, result)
    }

    pub async fn add_operating_hours(&self, id: i64, hours: f64) -> ApiResult<Equipment> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().add_operating_hours(id, hours).await;
        self.resource.finish_replace(ticket, result)
    }

    /// Replace the list with equipment due or overdue for maintenance,
    /// optionally only at `mine_id`.
    pub async fn needing_maintenance(&self, mine_id: Option<i64>) -> ApiResult<Vec<Equipment>> {
        let ticket = self.resource.begin_fetch();
        let result = self
            .api
            .equipment()
            .needing_maintenance(mine_id, self.api.page())
            .await;
        self.resource.finish_list(ticket, result)
    }

    pub async fn statistics(&self, mine_id: Option<i64>) -> ApiResult<EquipmentStatistics> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().statistics(mine_id).await;
        self.resource.finish(ticket, result)
    }

    pub async fn by_serial(&self, serial_number: &str) -> ApiResult<Equipment> {
        let ticket = self.resource.begin();
        let result = self.api.equipment().by_serial(serial_number).await;
        self.resource.finish(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::test_support::{signed_in_client, BASE};

    const FAN: &str = r#"{"id":5,"mine_id":1,"name":"Fan 2","equipment_type":"ventilation","status":"operational","operating_hours":100.0}"#;

    #[tokio::test]
    async fn test_add_hours_replaces_with_server_copy() {
        let http = MockHttpClient::new();
        http.set_method_response("GET", &format!("{}/equipment/", BASE), MockResponse::status(200, &format!("[{}]", FAN)));
        http.set_method_response(
            "PUT",
            &format!("{}/equipment/5/operating-hours", BASE),
            MockResponse::status(
                200,
                r#"{"message":"ok","equipment":{"id":5,"mine_id":1,"name":"Fan 2","equipment_type":"ventilation","status":"operational","operating_hours":112.5}}"#,
            ),
        );
        let hook = EquipmentHook::new(signed_in_client(&http).await);
        hook.fetch_all(&EquipmentFilter::default()).await.unwrap();

        hook.add_operating_hours(5, 12.5).await.unwrap();

        assert_eq!(hook.snapshot().items[0].operating_hours, 112.5);
    }

    #[tokio::test]
    async fn test_invalid_hours_surface_in_state() {
        let http = MockHttpClient::new();
        let hook = EquipmentHook::new(signed_in_client(&http).await);

        assert!(hook.add_operating_hours(5, f64::NAN).await.is_err());
        assert_eq!(
            hook.snapshot().error.as_deref(),
            Some("hours must be a non-negative number")
        );
    }

    #[tokio::test]
    async fn test_needing_maintenance_replaces_list() {
        let http = MockHttpClient::new();
        http.set_method_response("GET", &format!("{}/equipment/", BASE), MockResponse::status(200, &format!("[{}]", FAN)));
        http.set_method_response(
            "GET",
            &format!("{}/equipment/needing-maintenance/", BASE),
            MockResponse::status(
                200,
                r#"[{"id":9,"mine_id":1,"name":"Hoist 1","equipment_type":"hoist","status":"operational","operating_hours":4980.0}]"#,
            ),
        );
        let hook = EquipmentHook::new(signed_in_client(&http).await);
        hook.fetch_all(&EquipmentFilter::default()).await.unwrap();

        hook.needing_maintenance(Some(1)).await.unwrap();

        let state = hook.snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 9);
        assert!(http.get_requests()[1].url.ends_with("mine_id=1"));
    }

    #[tokio::test]
    async fn test_by_serial_encodes_the_path_and_keeps_the_list() {
        let http = MockHttpClient::new();
        http.set_method_response("GET", &format!("{}/equipment/", BASE), MockResponse::status(200, &format!("[{}]", FAN)));
        http.set_method_response(
            "GET",
            &format!("{}/equipment/by-serial/", BASE),
            MockResponse::status(200, FAN),
        );
        let hook = EquipmentHook::new(signed_in_client(&http).await);
        hook.fetch_all(&EquipmentFilter::default()).await.unwrap();

        let found = hook.by_serial("VF 2/7").await.unwrap();

        assert_eq!(found.id, 5);
        assert_eq!(
            http.get_requests()[1].url,
            format!("{}/equipment/by-serial/VF%202%2F7", BASE)
        );
        assert_eq!(hook.snapshot().items.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_serial_is_rejected_locally() {
        let http = MockHttpClient::new();
        let hook = EquipmentHook::new(signed_in_client(&http).await);

        assert!(hook.by_serial("  ").await.is_err());
        assert_eq!(hook.snapshot().error.as_deref(), Some("serial number is required"));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_statistics_for_one_mine() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::status(200, r#"{"total_equipment":4}"#));
        let hook = EquipmentHook::new(signed_in_client(&http).await);

        let stats = hook.statistics(Some(3)).await.unwrap();

        assert_eq!(stats.total_equipment, 4);
        assert_eq!(
            http.get_requests()[0].url,
            format!("{}/equipment/statistics/?mine_id=3", BASE)
        );
    }
}
