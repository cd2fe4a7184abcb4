//! Shared fixtures for the integration tests.
//!
//! Tests run the real reqwest client and session file against a wiremock
//! backend mounted under `/api/v1`.

#![allow(dead_code)]

use std::path::Path;

use minewatch::startup::{ConsoleConfig, ConsoleContext};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-access-token";

/// Context talking to `server`, storing its session under `data_dir`.
pub fn context(server: &MockServer, data_dir: &Path) -> ConsoleContext {
    let config = ConsoleConfig::new()
        .with_api_url(format!("{}/api/v1", server.uri()))
        .with_data_dir(data_dir);
    ConsoleContext::build(config).expect("context should build")
}

pub fn token_json() -> Value {
    json!({ "access_token": TOKEN, "token_type": "bearer" })
}

pub fn profile_json(username: &str) -> Value {
    json!({
        "id": 3,
        "username": username,
        "email": format!("{}@example.com", username),
        "full_name": "Shift Supervisor",
        "role": "operator",
        "is_active": true,
        "is_superuser": false
    })
}

pub fn mine_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "location": "North ridge",
        "depth": 420.5,
        "status": "active",
        "created_at": "2024-05-01T06:00:00"
    })
}

pub fn alert_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "monitoring_point_id": 11,
        "alert_type": "environmental_hazard",
        "severity": "high",
        "status": status,
        "title": title,
        "detected_at": "2024-06-01T12:00:00"
    })
}

/// Mount the login and profile endpoints for `username`.
pub async fn mount_sign_in(server: &MockServer, username: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(username)))
        .mount(server)
        .await;
}
