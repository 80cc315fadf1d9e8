// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::analysis::Language;
use crate::error::{AnalyzerError, Result};
use crate::metrics::gather_metrics;
use crate::models::analysis::AnalysisResult;
use crate::vision::{ImageInput, ImageSource};
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Body of `POST /v1/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Absent or null means no image was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    /// Falls back to `analysis.default_language`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    checks.insert(
        "model".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Model: {}", state.analyzer.model()),
        },
    );

    checks.insert(
        "configuration".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API base: {}", state.config.gemini.api_base_url),
        },
    );

    Json(HealthResponse {
        status: HealthStatus::Healthy,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

/// Handler for `/v1/analyze`: one image in, one structured analysis out.
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: String, // Raw JSON, deserialized manually for better error messages
) -> Result<Json<AnalysisResult>> {
    let req: AnalyzeRequest = serde_json::from_str(&body).map_err(|e| {
        error!("Failed to deserialize analyze request: {}", e);
        AnalyzerError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })?;

    let source = req.image.ok_or(AnalyzerError::MissingImage)?;
    let image = ImageInput::from_source(&source)?;
    let language = req
        .language
        .unwrap_or_else(|| Language::new(state.config.analysis.default_language.clone()));

    info!(
        "Received analyze request: {} ({} bytes), language={}",
        image.mime_type(),
        image.len(),
        language
    );

    let result = state.analyzer.analyze(&image, &language).await?;

    debug!("Returning analysis with {} objects", result.objects_detected.len());
    Ok(Json(result))
}
