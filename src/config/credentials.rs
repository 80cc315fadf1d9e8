//! Static API key handling.
//!
//! The key is resolved once at startup and handed to the Gemini client as an
//! explicit value. Its memory is wiped on drop and it never shows up in
//! `Debug` output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::{AnalyzerError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variables consulted, in order, when no key is configured.
pub const API_KEY_ENV_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

/// A non-empty Gemini API key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let mut value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            value.zeroize();
            return Err(AnalyzerError::Config("API key is empty".to_string()));
        }
        let key = Self(trimmed.to_string());
        value.zeroize();
        Ok(key)
    }

    /// Resolve from an explicitly configured value, then the process environment.
    pub fn resolve(configured: Option<&str>) -> Result<Self> {
        Self::resolve_with(configured, |name| std::env::var(name).ok())
    }

    /// Same as [`ApiKey::resolve`] with an injectable environment lookup.
    pub fn resolve_with<F>(configured: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = configured.filter(|v| !v.trim().is_empty()) {
            return Self::new(value);
        }

        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .map(Self::new)
            .unwrap_or_else(|| {
                Err(AnalyzerError::Config(format!(
                    "API key is not set (configure gemini.api_key or set one of {})",
                    API_KEY_ENV_VARS.join(", ")
                )))
            })
    }

    /// The raw key, for the request header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_value_wins() {
        let key = ApiKey::resolve_with(Some("configured"), |_| Some("env".to_string())).unwrap();
        assert_eq!(key.expose(), "configured");
    }

    #[test]
    fn test_env_fallback_order() {
        let key = ApiKey::resolve_with(None, |name| match name {
            "API_KEY" => None,
            "GEMINI_API_KEY" => Some("gemini-env".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(key.expose(), "gemini-env");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = ApiKey::resolve_with(None, |_| None).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let err = ApiKey::resolve_with(Some("   "), |_| Some("".to_string())).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_key_is_trimmed_and_redacted() {
        let key = ApiKey::new("  AIzaExample \n").unwrap();
        assert_eq!(key.expose(), "AIzaExample");
        assert_eq!(format!("{:?}", key), "ApiKey([REDACTED])");
    }
}
