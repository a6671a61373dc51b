#![allow(dead_code)]

use async_trait::async_trait;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use user_auth::auth::{CredentialVerifier, TokenIssuer};
use user_auth::configuration::JwtSettings;
use user_auth::error::{AppError, CacheError};
use user_auth::session::{InMemorySessionCache, SessionCache};
use user_auth::startup::run;
use user_auth::state::AppState;
use user_auth::store::InMemoryAccountStore;

pub struct TestApp {
    pub address: String,
    pub sessions: Arc<dyn SessionCache>,
    pub jwt: JwtSettings,
    pub client: reqwest::Client,
}

pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        access_token_expiry: 1800,
        issuer: "user_auth-test".to_string(),
    }
}

/// Session cache whose backend is always down
pub struct UnavailableSessionCache;

#[async_trait]
impl SessionCache for UnavailableSessionCache {
    async fn set(&self, _: &str, _: &str, _: Duration) -> Result<(), AppError> {
        Err(CacheError::Unavailable("connection refused".to_string()).into())
    }

    async fn get(&self, _: &str) -> Result<Option<String>, AppError> {
        Err(CacheError::Unavailable("connection refused".to_string()).into())
    }
}

/// Starts the server on a random port, backed by in-memory store and cache
pub fn spawn_app() -> TestApp {
    spawn_app_with_session_cache(Arc::new(InMemorySessionCache::new()))
}

/// Starts the server with an in-memory store and the given session cache
pub fn spawn_app_with_session_cache(sessions: Arc<dyn SessionCache>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let jwt = test_jwt_settings();
    let state = AppState::new(
        Arc::new(InMemoryAccountStore::new()),
        sessions.clone(),
        TokenIssuer::new(&jwt),
        CredentialVerifier::new(4),
    );

    let server = run(listener, state).expect("Failed to create server");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        sessions,
        jwt,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub async fn post_register(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(&format!("{}/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response {
        let body = format!(
            "username={}&password={}",
            urlencoding::encode(email),
            urlencoding::encode(password)
        );
        self.client
            .post(&format!("{}/login", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_me(&self, token: &str) -> reqwest::Response {
        self.client
            .get(&format!("{}/users/me", &self.address))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post_register(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .await;
        assert_eq!(201, response.status().as_u16());
        response.json().await.expect("Failed to parse response")
    }

    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.post_login(email, password).await;
        assert_eq!(200, response.status().as_u16());
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("No access token in response")
            .to_string()
    }
}
