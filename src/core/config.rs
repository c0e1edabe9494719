use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable  | Default          | Description                          |
/// |-----------|------------------|--------------------------------------|
/// | HTTP_PORT | 8000             | HTTP API listen port                 |
/// | DB_PATH   | `data/wercha.db` | SQLite database file                 |
/// | LOG_LEVEL | info             | trace, debug, info, warn or error    |
/// | LOG_DIR   | (unset)          | write daily-rotated log files here   |
///
/// JWT settings are documented on [`JwtConfig::from_env`].
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DB_PATH=/data/wercha.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// SQLite database file path
    pub db_path: String,
    /// Log level filter
    pub log_level: String,
    /// Log directory; file output is disabled when unset
    pub log_dir: Option<String>,
    /// JWT authentication configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "data/wercha.db".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::from_env(),
        }
    }
}
