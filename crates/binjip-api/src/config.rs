use std::env;
use std::path::PathBuf;

use binjip_core::config::{LayeredConfig, MapSettings};
use binjip_core::error::Result;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub config_path: Option<PathBuf>,
    pub max_upload_mb: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            cors_origin: "http://localhost:3000".to_string(),
            config_path: None,
            max_upload_mb: 64,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("BINJIP_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port);

        let cors_origin = env::var("BINJIP_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let config_path = env::var("BINJIP_CONFIG").ok().map(PathBuf::from);

        let max_upload_mb = env::var("BINJIP_MAX_UPLOAD_MB")
            .ok()
            .and_then(|m| m.parse().ok())
            .filter(|m| *m > 0)
            .unwrap_or(defaults.max_upload_mb);

        Self {
            port,
            cors_origin,
            config_path,
            max_upload_mb,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Map settings from defaults, the optional config file, and the environment
    pub fn map_settings(&self) -> Result<MapSettings> {
        let mut config = LayeredConfig::with_defaults();
        if let Some(path) = &self.config_path {
            config = config.load_from_file(path)?;
        }
        Ok(config.load_from_env().settings())
    }
}
