mod common;

use common::{spawn_app, spawn_app_with_session_cache, UnavailableSessionCache};
use serde_json::{json, Value};
use std::sync::Arc;

// --- Registration Tests ---

#[tokio::test]
async fn register_returns_201_with_public_fields() {
    let app = spawn_app();

    let response = app
        .post_register(&json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": "pw1"
        }))
        .await;

    assert_eq!(201, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_returns_400_for_duplicate_email() {
    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let response = app
        .post_register(&json!({
            "email": "alice@example.com",
            "username": "someone-else",
            "password": "pw2"
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn error_body_and_header_share_the_request_id() {
    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let response = app
        .client
        .post(&format!("{}/register", &app.address))
        .header("x-request-id", "dup-email-1")
        .json(&json!({
            "email": "alice@example.com",
            "username": "alice2",
            "password": "pw1"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    assert_eq!(response.headers().get("x-request-id").unwrap(), "dup-email-1");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error_id"], "dup-email-1");
}

#[tokio::test]
async fn register_returns_400_for_duplicate_username() {
    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let response = app
        .post_register(&json!({
            "email": "other@example.com",
            "username": "alice",
            "password": "pw2"
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "DUPLICATE_USERNAME");
}

#[tokio::test]
async fn register_returns_400_for_invalid_email() {
    let app = spawn_app();

    for invalid_email in ["notanemail", "user@", "@example.com", "user@@example.com"] {
        let response = app
            .post_register(&json!({
                "email": invalid_email,
                "username": "tester",
                "password": "pw1"
            }))
            .await;

        assert_eq!(400, response.status().as_u16(),
            "Should reject invalid email: {}", invalid_email);
    }
}

#[tokio::test]
async fn register_returns_400_for_missing_fields() {
    let app = spawn_app();

    let test_cases = vec![
        (json!({"email": "test@example.com", "password": "pw1"}), "missing username"),
        (json!({"username": "test", "password": "pw1"}), "missing email"),
        (json!({"username": "test", "email": "test@example.com"}), "missing password"),
        (json!({}), "missing all fields"),
    ];

    for (body, reason) in test_cases {
        let response = app.post_register(&body).await;

        assert_eq!(400, response.status().as_u16(),
            "Should reject request: {}", reason);
    }
}

#[tokio::test]
async fn register_rejects_password_longer_than_72_bytes() {
    let app = spawn_app();

    let response = app
        .post_register(&json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": format!("{}correct-suffix", "A".repeat(72))
        }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// --- Login Tests ---

#[tokio::test]
async fn login_returns_bearer_token_for_valid_credentials() {
    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let response = app.post_login("alice@example.com", "pw1").await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["access_token"].as_str().is_some());
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], app.jwt.access_token_expiry);
}

#[tokio::test]
async fn login_stores_token_in_session_cache() {
    use user_auth::session::SessionCache;

    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let token = app.login_token("alice@example.com", "pw1").await;

    let cached = app.sessions.get("alice@example.com").await.unwrap();
    assert_eq!(cached, Some(token));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let wrong_password = app.post_login("alice@example.com", "wrong").await;
    let unknown_email = app.post_login("nobody@example.com", "pw1").await;

    assert_eq!(400, wrong_password.status().as_u16());
    assert_eq!(400, unknown_email.status().as_u16());

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password["code"], "INVALID_CREDENTIALS");
    assert_eq!(wrong_password["code"], unknown_email["code"]);
    assert_eq!(wrong_password["message"], unknown_email["message"]);
}

#[tokio::test]
async fn login_rejects_password_sharing_the_first_72_bytes() {
    let app = spawn_app();
    let password = "A".repeat(72);
    app.register("alice", "alice@example.com", &password).await;

    let response = app
        .post_login("alice@example.com", &format!("{}totally-different", password))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    app.login_token("alice@example.com", &password).await;
}

#[tokio::test]
async fn login_returns_503_when_session_cache_is_down() {
    let app = spawn_app_with_session_cache(Arc::new(UnavailableSessionCache));
    app.register("alice", "alice@example.com", "pw1").await;

    let response = app.post_login("alice@example.com", "pw1").await;

    assert_eq!(503, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "CACHE_UNAVAILABLE");
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn login_rejects_json_body() {
    let app = spawn_app();
    app.register("alice", "alice@example.com", "pw1").await;

    let response = app
        .client
        .post(&format!("{}/login", &app.address))
        .json(&json!({"username": "alice@example.com", "password": "pw1"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn login_returns_400_for_missing_fields() {
    let app = spawn_app();

    for (body, reason) in [
        ("username=alice%40example.com", "missing password"),
        ("password=pw1", "missing username"),
        ("", "missing both"),
    ] {
        let response = app
            .client
            .post(&format!("{}/login", &app.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(400, response.status().as_u16(),
            "Should reject request: {}", reason);
    }
}

// --- Listing ---

#[tokio::test]
async fn list_users_returns_all_registered_users() {
    let app = spawn_app();

    let response = app
        .client
        .get(&format!("{}/users", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"users": []}));

    app.register("alice", "alice@example.com", "pw1").await;
    app.register("bob", "bob@example.com", "pw2").await;

    let body: Value = app
        .client
        .get(&format!("{}/users", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({"users": [
            {"id": 1, "username": "alice", "email": "alice@example.com"},
            {"id": 2, "username": "bob", "email": "bob@example.com"}
        ]})
    );
}
