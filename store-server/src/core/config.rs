/// Server configuration
///
/// Every setting can be overridden through an environment variable:
///
/// | Env var | Default | Meaning |
/// |---------|---------|---------|
/// | STORE_DB_PATH | store.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (unset) | daily rolling log file directory |
/// | ENVIRONMENT | development | development / staging / production |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level filter
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("STORE_DB_PATH").unwrap_or_else(|_| "store.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
