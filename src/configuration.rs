use config::ConfigError;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub redis: RedisSettings,
    pub jwt: JwtSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl ApplicationSettings {
    /// Rejects a bcrypt cost that would fail every registration
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        let allowed = crate::auth::MIN_COST..=crate::auth::MAX_COST;
        if !allowed.contains(&self.password_hash_cost) {
            return Err(crate::error::ConfigError::InvalidValue(format!(
                "application.password_hash_cost must be within {}..={}, got {}",
                crate::auth::MIN_COST,
                crate::auth::MAX_COST,
                self.password_hash_cost
            )));
        }
        Ok(())
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct RedisSettings {
    /// e.g. redis://127.0.0.1:6379
    pub url: String,
}

/// JWT access token settings
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64, // seconds (e.g., 1800 for 30 minutes)
    pub issuer: String,
}

impl JwtSettings {
    /// Rejects settings that would mint unusable tokens or session entries
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(crate::error::ConfigError::MissingRequired(
                "jwt.secret".to_string(),
            ));
        }
        if self.access_token_expiry <= 0 {
            return Err(crate::error::ConfigError::InvalidValue(format!(
                "jwt.access_token_expiry must be positive, got {}",
                self.access_token_expiry
            )));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_password_hash_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_max_connections() -> u32 {
    5
}

/// Loads `configuration.{yaml,toml,json}` if present, then `APP_*` environment
/// overrides such as `APP_JWT__SECRET` or `APP_REDIS__URL`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .try_parsing(true)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
