//! API configuration.

use std::path::PathBuf;

use folio_gallery::DEFAULT_PAGE_SIZE;

/// Which object store backs the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Cloudflare R2 via the S3 API
    R2,
    /// Process-local store, for development
    Memory,
}

impl StorageBackend {
    fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Self::Memory,
            _ => Self::R2,
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second, per client IP
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Shared secret expected in `X-Custom-Auth-Key`. Unset rejects every
    /// authenticated request.
    pub auth_key_secret: Option<String>,
    /// Manifest served by the gallery API
    pub manifest_path: PathBuf,
    /// Gallery grid page size
    pub page_size: usize,
    pub storage_backend: StorageBackend,
    pub metrics_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 512 * 1024 * 1024, // 512MB
            environment: "development".to_string(),
            auth_key_secret: None,
            manifest_path: PathBuf::from("./src/data/videos.json"),
            page_size: DEFAULT_PAGE_SIZE,
            storage_backend: StorageBackend::R2,
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            auth_key_secret: std::env::var("AUTH_KEY_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            manifest_path: std::env::var("MANIFEST_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.manifest_path),
            page_size: std::env::var("GALLERY_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            storage_backend: std::env::var("STORAGE_BACKEND")
                .map(|s| StorageBackend::parse(&s))
                .unwrap_or(defaults.storage_backend),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
