//! Integration tests for the service liveness endpoint

mod common;

use common::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app();

    let response = app
        .client
        .get(&format!("{}/health_check", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app();

    let response = app
        .client
        .get(&format!("{}/health_check", app.address))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-123"
    );

    // Rejected by the session guard before reaching a handler
    let response = app
        .client
        .get(&format!("{}/users/me", app.address))
        .header("x-request-id", "trace-me-456")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-456"
    );
}

#[tokio::test]
async fn generated_request_id_is_echoed_on_guard_rejection() {
    let app = spawn_app();

    let response = app
        .client
        .get(&format!("{}/users/me", app.address))
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(401, response.status().as_u16());
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Missing x-request-id")
        .to_str()
        .unwrap()
        .to_string();
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error_id"], request_id.as_str());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = spawn_app();

    let response = app
        .client
        .get(&format!("{}/does-not-exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(404, response.status().as_u16());
}
