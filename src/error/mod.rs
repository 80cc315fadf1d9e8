// Error types for gemlens
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Message shown when analysis is requested without an image.
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image first.";

/// Message shown for any failure of the inference call itself.
pub const PROVIDER_FAILURE_MESSAGE: &str =
    "Analysis failed: the analysis service returned an error.";

/// Message shown when the model's output cannot be interpreted.
pub const INVALID_RESPONSE_MESSAGE: &str =
    "Analysis failed: Failed to get a valid JSON response from the API.";

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("No image selected")]
    MissingImage,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("No analysis is in progress")]
    NoAnalysisInFlight,

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid analysis response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse failure classes of the analyze operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Input,
    Busy,
    Provider,
    ResponseShape,
    Internal,
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::Config(_) | AnalyzerError::ConfigParsing(_) => ErrorKind::Configuration,
            AnalyzerError::MissingImage
            | AnalyzerError::InvalidImage(_)
            | AnalyzerError::InvalidRequest(_) => ErrorKind::Input,
            AnalyzerError::AnalysisInFlight => ErrorKind::Busy,
            AnalyzerError::GeminiApi(_) | AnalyzerError::Http(_) => ErrorKind::Provider,
            AnalyzerError::InvalidResponse(_) | AnalyzerError::Json(_) => ErrorKind::ResponseShape,
            AnalyzerError::NoAnalysisInFlight
            | AnalyzerError::Io(_)
            | AnalyzerError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The single message a user sees for this failure.
    ///
    /// Provider and response-shape failures collapse to generic messages; the
    /// underlying detail only goes to the logs.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::MissingImage => MISSING_IMAGE_MESSAGE.to_string(),
            AnalyzerError::InvalidImage(reason) => format!("Unable to use this image: {}", reason),
            AnalyzerError::AnalysisInFlight => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            _ => match self.kind() {
                ErrorKind::Provider => PROVIDER_FAILURE_MESSAGE.to_string(),
                ErrorKind::ResponseShape => INVALID_RESPONSE_MESSAGE.to_string(),
                _ => self.to_string(),
            },
        }
    }
}

// Convert AnalyzerError to HTTP responses for Axum
impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self.kind() {
            ErrorKind::Input => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            ErrorKind::Busy => (StatusCode::CONFLICT, "busy_error"),
            ErrorKind::Configuration => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            ErrorKind::Provider => (StatusCode::BAD_GATEWAY, "api_error"),
            ErrorKind::ResponseShape => (StatusCode::BAD_GATEWAY, "invalid_response_error"),
            ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": self.user_message(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
