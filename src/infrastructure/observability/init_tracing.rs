use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log output knobs, read from the environment.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let json_format =
            std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
        Self {
            environment,
            json_format,
        }
    }
}

/// Initialize the tracing subscriber with structured logging.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,locutor=debug,tower_http=debug"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    let fmt_layer = if config.json_format {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(
        port = port,
        environment = %config.environment,
        json_format = config.json_format,
        "Server initialized"
    );
}
