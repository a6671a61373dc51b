use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use user_auth::auth::{CredentialVerifier, TokenIssuer};
use user_auth::configuration::get_configuration;
use user_auth::session::RedisSessionCache;
use user_auth::startup::run;
use user_auth::state::AppState;
use user_auth::store::PgAccountStore;
use user_auth::telemetry::init_telemetry;

fn startup_error(kind: std::io::ErrorKind, message: &str) -> std::io::Error {
    std::io::Error::new(kind, message.to_string())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let configuration = match get_configuration() {
        Ok(config) => config,
        Err(e) => {
            // Telemetry is not up yet
            eprintln!("Failed to read configuration: {}", e);
            return Err(startup_error(std::io::ErrorKind::InvalidInput, "Configuration error"));
        }
    };

    init_telemetry(&configuration.application.log_level);
    tracing::info!("Configuration loaded successfully");

    if let Err(e) = configuration.jwt.validate() {
        tracing::error!("Invalid JWT configuration: {}", e);
        return Err(startup_error(std::io::ErrorKind::InvalidInput, "Configuration error"));
    }
    if let Err(e) = configuration.application.validate() {
        tracing::error!("Invalid application configuration: {}", e);
        return Err(startup_error(std::io::ErrorKind::InvalidInput, "Configuration error"));
    }

    // Account store
    tracing::info!("Attempting to connect to database");
    let pool = PgPoolOptions::new()
        .max_connections(configuration.database.max_connections)
        .connect(&configuration.database.connection_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            startup_error(std::io::ErrorKind::ConnectionRefused, "Database connection error")
        })?;

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        tracing::error!("Failed to migrate the database: {}", e);
        startup_error(std::io::ErrorKind::Other, "Database migration error")
    })?;
    tracing::info!("Database ready");

    // Session cache
    let sessions = RedisSessionCache::connect(&configuration.redis.url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to session cache: {}", e);
            startup_error(std::io::ErrorKind::ConnectionRefused, "Session cache connection error")
        })?;
    tracing::info!("Session cache connected");

    let state = AppState::new(
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(sessions),
        TokenIssuer::new(&configuration.jwt),
        CredentialVerifier::new(configuration.application.password_hash_cost),
    );

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, state)?;
    let result = server.await;

    tracing::info!("Server stopped, closing connections");
    pool.close().await;

    result
}
