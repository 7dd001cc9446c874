//! Application configuration
//!
//! Settings are resolved in order: built-in defaults, then an optional TOML
//! config file, then environment variables. The config is passed explicitly
//! to the components that need it; there is no global instance.

use crate::core::error::{QuestError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the backend service URL
pub const ENV_BACKEND_URL: &str = "CODEQUEST_BACKEND_URL";

/// Environment variable overriding the guest storage directory
pub const ENV_GUEST_DIR: &str = "CODEQUEST_GUEST_DIR";

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the backend service
    pub backend_url: String,

    /// Timeout for a single HTTP request, in seconds
    ///
    /// Applies to every remote call. Progress saves retry once, so the
    /// worst-case wait for a failed save is twice this value.
    pub request_timeout_secs: u64,

    /// Directory holding the guest progress blob
    pub guest_storage_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8001".into(),
            request_timeout_secs: 10,
            guest_storage_dir: PathBuf::from(".codequest"),
        }
    }
}

impl AppConfig {
    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load from a TOML file, then apply environment variable overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&content)
            .map_err(|e| QuestError::InvalidArgument(format!("config parse error: {}", e)))?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_BACKEND_URL) {
            self.backend_url = url;
        }
        if let Ok(dir) = std::env::var(ENV_GUEST_DIR) {
            self.guest_storage_dir = PathBuf::from(dir);
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(format!(
                "backend_url ({}) must start with http:// or https://",
                self.backend_url
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be positive".into());
        }

        Ok(())
    }
}
