/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | RESTOCK_CAP | false | clamp stock increments to the recorded allocation |
///
/// Logging (`LOG_LEVEL`, `LOG_DIR`) is configured separately at process
/// startup, before this struct exists; see `setup_environment`.
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 RESTOCK_CAP=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Restock-cap policy: when true, stock increments are clamped so a
    /// product never exceeds its recorded allocation (creation-time stock,
    /// raised by explicit restocks). When false, increments are unbounded.
    pub restock_cap: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            restock_cap: std::env::var("RESTOCK_CAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Override selected values, typically for tests
    pub fn with_overrides(http_port: u16, restock_cap: bool) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.restock_cap = restock_cap;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
