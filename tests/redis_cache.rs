//! Session cache tests against a live Redis.
//! Run with `cargo test -- --ignored` once `configuration.yaml` points at a server.

use std::time::Duration;
use user_auth::configuration::get_configuration;
use user_auth::session::{RedisSessionCache, SessionCache};

async fn connect() -> RedisSessionCache {
    let configuration = get_configuration().expect("Failed to read configuration.");
    RedisSessionCache::connect(&configuration.redis.url)
        .await
        .expect("Failed to connect to Redis")
}

fn unique_email() -> String {
    format!("{}@example.com", uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn set_overwrites_and_get_returns_latest() {
    let cache = connect().await;
    let email = unique_email();

    assert_eq!(cache.get(&email).await.unwrap(), None);

    cache.set(&email, "first", Duration::from_secs(60)).await.unwrap();
    cache.set(&email, "second", Duration::from_secs(60)).await.unwrap();

    assert_eq!(cache.get(&email).await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn entry_expires_with_ttl() {
    let cache = connect().await;
    let email = unique_email();

    cache.set(&email, "token", Duration::from_secs(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2100)).await;

    assert_eq!(cache.get(&email).await.unwrap(), None);
}
