//! The analyze operation: build the request, call the model, interpret the
//! answer.
//!
//! Control flow is strictly linear. [`Analyzer`] composes the pure request
//! builder and response interpreter around exactly one call to an
//! [`InferenceBackend`]. [`session::AnalysisSession`] layers the
//! user-facing state machine on top, and [`render`] projects results and
//! states to text.
//!
//! # Submodules
//!
//! - `language`: Output language selection.
//! - `request`: Instruction text, response schema, and request assembly.
//! - `response`: Envelope text extraction and strict result parsing.
//! - `session`: Idle/Loading/Succeeded/Failed state with an in-flight guard.
//! - `render`: Plain-text presentation.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod language;
pub mod render;
pub mod request;
pub mod response;
pub mod session;

pub use language::Language;
pub use request::{build_request, response_schema, system_instruction};
pub use response::{extract_text, interpret, parse_analysis};
pub use session::{AnalysisFailure, AnalysisSession, AnalysisState, PendingAnalysis};

use crate::error::{AnalyzerError, Result};
use crate::gemini::InferenceBackend;
use crate::metrics;
use crate::models::analysis::AnalysisResult;
use crate::vision::ImageInput;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};

/// Runs single-shot analyses against an inference backend.
#[derive(Clone)]
pub struct Analyzer {
    backend: Arc<dyn InferenceBackend>,
    model: String,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn InferenceBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Analyze one image: encode → one call → parse.
    ///
    /// Each invocation builds its own payload and shares nothing with
    /// earlier ones. Errors are returned as-is; no retry is attempted.
    pub async fn analyze(&self, image: &ImageInput, language: &Language) -> Result<AnalysisResult> {
        let request_id = uuid::Uuid::new_v4().simple().to_string();
        let span = info_span!(
            "analysis",
            request_id = %request_id,
            model = %self.model,
            language = %language
        );

        let outcome = async {
            info!("Analyzing {} image ({} bytes)", image.mime_type(), image.len());

            let request = build_request(image, language);
            let response = self.backend.generate_content(request, &self.model).await?;
            let result = interpret(response)?;

            info!(
                "Analysis complete: {} objects, has_text={}",
                result.objects_detected.len(),
                result.text_in_image.has_text
            );
            Ok::<_, AnalyzerError>(result)
        }
        .instrument(span.clone())
        .await;

        if let Err(e) = &outcome {
            span.in_scope(|| error!("Analysis failed: {}", e));
        }
        metrics::record_analysis(&outcome);
        outcome
    }
}
