// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod credentials;
mod models;

pub use credentials::ApiKey;
pub use models::*;

use crate::error::{AnalyzerError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest, prefix `GEMLENS__`)
    /// 2. Config file (`path`, or `~/.gemlens/config.toml` when absent)
    /// 3. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // e.g. GEMLENS__GEMINI__MODEL=gemini-2.5-pro
            .add_source(Environment::with_prefix("GEMLENS").separator("__"))
            .build()
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AnalyzerError::Config(e.to_string()))
    }

    /// Resolve the API key from config or the process environment.
    ///
    /// Called once at startup so that a missing key fails before any request
    /// can be attempted.
    pub fn require_api_key(&self) -> Result<ApiKey> {
        ApiKey::resolve(self.gemini.api_key.as_deref())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gemlens")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
