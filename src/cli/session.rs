//! Session and health commands.

use std::io::{self, BufRead, Write};

use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Section;

use crate::error::ApiError;
use crate::models::{LoginCredentials, UserProfile};
use crate::startup::ConsoleContext;

fn prompt_username() -> io::Result<String> {
    print!("Username: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn describe(user: &UserProfile) -> String {
    format!(
        "{} <{}> ({}{})",
        user.display_name(),
        user.email,
        user.role.as_str(),
        if user.is_superuser { ", superuser" } else { "" }
    )
}

/// The error's message, with what to do about it as a suggestion.
fn report(error: ApiError) -> Report {
    eyre!(error.user_message()).suggestion(error.category().recovery_hint())
}

/// Sign in with `credentials` and store the session.
pub async fn login_with(context: &ConsoleContext, credentials: &LoginCredentials) -> Result<UserProfile> {
    let session = context
        .store
        .login(credentials)
        .await
        .map_err(report)?;
    Ok(session.user().clone())
}

/// `--login [username]`: prompt for what is missing, then sign in.
pub async fn handle_login(context: &ConsoleContext, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(name) => name,
        None => prompt_username()?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    let user = login_with(context, &LoginCredentials::new(username, password)).await?;
    println!("Signed in as {}", describe(&user));
    Ok(())
}

/// `--logout`
pub async fn handle_logout(context: &ConsoleContext) -> Result<()> {
    let was_signed_in = context.restore().await.is_authenticated();
    context
        .store
        .logout()
        .await
        .map_err(|e| eyre!("Signed out, but the session file could not be removed: {}", e))?;
    if was_signed_in {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

/// `--whoami [--verify]`
pub async fn handle_whoami(context: &ConsoleContext, verify: bool) -> Result<()> {
    let state = context.restore().await;
    let Some(stored) = state.user() else {
        return Err(eyre!("Not signed in. Run `minewatch --login` first."));
    };
    let user = if verify {
        context
            .store
            .verify()
            .await
            .map_err(report)?
    } else {
        stored.clone()
    };
    println!("{}", describe(&user));
    if let Some(last_login) = user.last_login {
        println!("Last login: {}", last_login.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

/// `--health`
pub async fn handle_health(context: &ConsoleContext) -> Result<()> {
    let health = context
        .api
        .system()
        .health()
        .await
        .map_err(|e| {
            let hint = e.category().recovery_hint();
            eyre!("{} is unreachable: {}", context.config.health_url(), e.user_message())
                .suggestion(hint)
        })?;
    let version = health.version.as_deref().unwrap_or("unknown version");
    println!("{}: {} ({})", context.config.health_url(), health.status, version);
    if !health.is_healthy() {
        return Err(eyre!("Service reports status {}", health.status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySession, MockHttpClient, MockResponse};
    use crate::api::test_support::{operator, BASE};
    use crate::auth::StoredSession;
    use crate::startup::ConsoleConfig;
    use std::sync::Arc;

    fn context(http: &MockHttpClient, storage: InMemorySession) -> ConsoleContext {
        ConsoleContext::with_adapters(
            ConsoleConfig::new().with_api_url(BASE),
            Arc::new(http.clone()),
            Arc::new(storage),
        )
    }

    #[tokio::test]
    async fn test_whoami_without_session_fails_offline() {
        let http = MockHttpClient::new();
        let ctx = context(&http, InMemorySession::new());

        let result = handle_whoami(&ctx, false).await;

        assert!(result.unwrap_err().to_string().contains("Not signed in"));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_whoami_reads_stored_profile_without_network() {
        let http = MockHttpClient::new();
        let storage = InMemorySession::with_stored(StoredSession {
            access_token: Some("abc".to_string()),
            token_type: Some("bearer".to_string()),
            user: Some(operator()),
        });
        let ctx = context(&http, storage);

        handle_whoami(&ctx, false).await.unwrap();

        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_with_reports_backend_message() {
        let http = MockHttpClient::new();
        http.set_response(
            &format!("{}/auth/login", BASE),
            MockResponse::status(401, r#"{"detail":"Incorrect username or password"}"#),
        );
        let ctx = context(&http, InMemorySession::new());

        let err = login_with(&ctx, &LoginCredentials::new("op", "nope"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn test_logout_clears_storage() {
        let http = MockHttpClient::new();
        let storage = InMemorySession::with_stored(StoredSession {
            access_token: Some("abc".to_string()),
            token_type: Some("bearer".to_string()),
            user: Some(operator()),
        });
        let ctx = context(&http, storage.clone());

        handle_logout(&ctx).await.unwrap();

        assert!(!ctx.session().is_authenticated());
        assert!(storage.stored().is_none());
    }
}
