use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter: `RUST_LOG` wins, then `default_directive`,
/// then plain `info` if that does not parse.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes structured JSON logging on stdout.
/// `log` records (actix, the request logger) are bridged into tracing.
pub fn init_telemetry(default_directive: &str) {
    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .json();

    tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(formatting_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_falls_back() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(env_filter("debug").to_string(), "debug");
        assert_eq!(env_filter("user_auth=notalevel").to_string(), "info");
    }
}
