//! Structured logging and secret redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the Gemini API key from leaking into logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{AnalyzerError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Whether [`scrub`] redacts. Set from `LoggingConfig::sanitize_secrets`.
static SANITIZE: AtomicBool = AtomicBool::new(true);

/// Google API keys and `key=` query parameters
static SECRET_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_secret_regex() -> &'static Regex {
    SECRET_REGEX.get_or_init(|| {
        Regex::new(r#"AIza[0-9A-Za-z_\-]{20,}|([?&]key=)[^&\s"')]+"#).expect("Invalid regex pattern")
    })
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`. Logs go to stderr so that CLI output on
/// stdout stays clean.
pub fn init(config: &LoggingConfig) -> Result<()> {
    SANITIZE.store(config.sanitize_secrets, Ordering::Relaxed);

    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AnalyzerError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let result = match config.format.as_str() {
        "json" => registry.with(fmt_layer.json()).try_init(),
        "compact" => registry.with(fmt_layer.compact()).try_init(),
        _ => registry.with(fmt_layer.pretty()).try_init(),
    };

    result.map_err(|e| AnalyzerError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Redacts API keys from text before it is logged or surfaced.
///
/// Replaces Google API keys (`AIza...`) with `[REDACTED_API_KEY]` and the
/// value of any `key=` query parameter with `[REDACTED]`. Returns the input
/// unchanged when sanitizing is disabled.
pub fn scrub(input: &str) -> Cow<'_, str> {
    if !SANITIZE.load(Ordering::Relaxed) {
        return Cow::Borrowed(input);
    }
    sanitize(input)
}

/// Unconditional form of [`scrub`].
pub fn sanitize(input: &str) -> Cow<'_, str> {
    get_secret_regex().replace_all(input, |caps: &regex::Captures| match caps.get(1) {
        Some(param) => format!("{}[REDACTED]", param.as_str()),
        None => "[REDACTED_API_KEY]".to_string(),
    })
}
