//! Client configuration loaded from environment variables.

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Backend endpoint configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `ORDERS_API_URL` — backend base URL (default: `"http://localhost:8000"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub log_level: String,
}

impl ApiConfig {
    /// Creates a configuration for the given base URL.
    ///
    /// Trailing slashes are trimmed so path joining stays uniform
    /// regardless of how the URL was written.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            log_level: "info".to_string(),
        }
    }

    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("ORDERS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );
        config.log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        config
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
