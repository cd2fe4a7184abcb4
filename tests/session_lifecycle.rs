//! Sign-in, restore, sign-out and expiry through the session file.

mod common;

use common::{context, mount_sign_in, TOKEN};
use minewatch::adapters::FileSessionStore;
use minewatch::auth::SessionEvent;
use minewatch::error::ApiError;
use minewatch::models::LoginCredentials;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_persists_and_restores_in_a_new_process() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "supervisor").await;

    let first = context(&server, dir.path());
    let session = first
        .store
        .login(&LoginCredentials::new("supervisor", "pit-4"))
        .await
        .unwrap();
    assert_eq!(session.user().username, "supervisor");
    assert!(FileSessionStore::new(dir.path()).path().exists());

    let second = context(&server, dir.path());
    assert!(!second.store.is_authenticated());
    let state = second.restore().await;

    assert!(state.is_authenticated());
    assert_eq!(state.user().map(|u| u.username.as_str()), Some("supervisor"));
    assert_eq!(state.token().map(|t| t.secret()), Some(TOKEN));
}

#[tokio::test]
async fn test_restore_makes_no_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let state = context(&server, dir.path()).restore().await;

    assert!(!state.is_authenticated());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_corrupt_session_file_means_signed_out() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = FileSessionStore::new(dir.path());
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(file.path(), "{ not json").unwrap();

    let state = context(&server, dir.path()).restore().await;

    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn test_logout_removes_the_session_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "supervisor").await;
    let ctx = context(&server, dir.path());
    ctx.store
        .login(&LoginCredentials::new("supervisor", "pit-4"))
        .await
        .unwrap();
    let mut events = ctx.session().subscribe();

    ctx.store.logout().await.unwrap();

    assert!(!ctx.store.is_authenticated());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
    assert!(!context(&server, dir.path()).restore().await.is_authenticated());
}

#[tokio::test]
async fn test_wrong_password_leaves_storage_untouched() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Incorrect username or password"})),
        )
        .mount(&server)
        .await;
    let ctx = context(&server, dir.path());

    let err = ctx
        .store
        .login(&LoginCredentials::new("supervisor", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Authentication { .. }));
    assert_eq!(err.user_message(), "Incorrect username or password");
    assert!(!FileSessionStore::new(dir.path()).path().exists());
}

#[tokio::test]
async fn test_rejected_token_expires_the_session_once() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "supervisor").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/mines/"))
        .and(header("Authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({"detail": "Could not validate credentials"}),
        ))
        .mount(&server)
        .await;
    let ctx = context(&server, dir.path());
    ctx.store
        .login(&LoginCredentials::new("supervisor", "pit-4"))
        .await
        .unwrap();
    let mut events = ctx.session().subscribe();
    let hooks = ctx.hooks();

    let (first, second) = tokio::join!(hooks.mines.fetch_all(), hooks.mines.fetch_all());

    assert!(first.is_err());
    assert!(second.is_err());
    assert!(!ctx.store.is_authenticated());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
    assert!(events.try_recv().is_err());
    assert!(!FileSessionStore::new(dir.path()).path().exists());
}

#[tokio::test]
async fn test_calls_after_an_expiry_send_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_sign_in(&server, "supervisor").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/mines/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({"detail": "Could not validate credentials"}),
        ))
        .mount(&server)
        .await;
    let ctx = context(&server, dir.path());
    ctx.store
        .login(&LoginCredentials::new("supervisor", "pit-4"))
        .await
        .unwrap();
    let hooks = ctx.hooks();

    assert!(hooks.mines.fetch_all().await.is_err());
    let sent = server.received_requests().await.unwrap().len();

    let err = hooks
        .alerts
        .fetch_all(&Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Authentication { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), sent);
    assert_eq!(hooks.alerts.snapshot().error.as_deref(), Some(err.user_message().as_str()));
}
