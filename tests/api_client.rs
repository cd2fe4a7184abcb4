//! The reqwest-backed client against a wiremock backend.

mod common;

use common::{context, mount_sign_in, TOKEN};
use minewatch::error::ApiError;
use minewatch::models::{EquipmentStatus, LoginCredentials};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_health_is_public_and_outside_the_api_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "version": "1.0.0",
            "service": "mine-safety"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let health = context(&server, dir.path()).api.system().health().await.unwrap();

    assert!(health.is_healthy());
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_posts_a_password_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::token_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/test-token"))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::profile_json("op")))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&server, dir.path());

    let session = ctx
        .store
        .login(&LoginCredentials::new("op", "s3cret"))
        .await
        .unwrap();

    assert_eq!(session.token().secret(), TOKEN);
}

#[tokio::test]
async fn test_authenticated_calls_without_session_send_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let err = context(&server, dir.path()).hooks().mines.fetch_all().await.unwrap_err();

    assert!(err.requires_reauth());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_out_of_range_window_is_rejected_locally() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "op").await;
    let ctx = context(&server, dir.path());
    ctx.store
        .login(&LoginCredentials::new("op", "s3cret"))
        .await
        .unwrap();
    let before = server.received_requests().await.unwrap().len();

    let err = ctx.api.environment().statistics(11, 500).await.unwrap_err();

    assert_eq!(err, ApiError::validation("hours must be between 1 and 168"));
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_status_change_unwraps_the_envelope() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "op").await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/equipment/5/status"))
        .and(query_param("status", "maintenance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Equipment status updated",
            "equipment": {
                "id": 5,
                "mine_id": 1,
                "name": "Conveyor B",
                "equipment_type": "conveyor",
                "status": "maintenance",
                "operating_hours": 1200.0
            }
        })))
        .mount(&server)
        .await;
    let ctx = context(&server, dir.path());
    ctx.store
        .login(&LoginCredentials::new("op", "s3cret"))
        .await
        .unwrap();

    let equipment = ctx
        .api
        .equipment()
        .set_status(5, EquipmentStatus::Maintenance)
        .await
        .unwrap();

    assert_eq!(equipment.status, "maintenance");
    assert_eq!(equipment.name, "Conveyor B");
}

#[tokio::test]
async fn test_forbidden_keeps_the_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "op").await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/mines/1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"detail": "Not enough permissions"})),
        )
        .mount(&server)
        .await;
    let ctx = context(&server, dir.path());
    ctx.store
        .login(&LoginCredentials::new("op", "s3cret"))
        .await
        .unwrap();

    let err = ctx.api.mines().delete(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden { .. }));
    assert!(ctx.store.is_authenticated());
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = minewatch::startup::ConsoleConfig::new()
        .with_api_url("http://127.0.0.1:9/api/v1")
        .with_data_dir(dir.path());
    let ctx = minewatch::startup::ConsoleContext::build(config).unwrap();

    let err = ctx
        .store
        .login(&LoginCredentials::new("op", "s3cret"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }));
    assert!(err.is_retryable());
}
