// Response interpretation (Gemini envelope → AnalysisResult)
// Author: kelexine (https://github.com/kelexine)

use crate::error::{AnalyzerError, Result};
use crate::models::analysis::AnalysisResult;
use crate::models::gemini::GenerateContentResponse;
use tracing::{debug, warn};

/// Pull the model's answer text out of a `generateContent` response.
///
/// Concatenates the non-thought text parts of the first candidate.
pub fn extract_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(AnalyzerError::GeminiApi(format!(
            "Prompt blocked by Gemini: {}",
            reason
        )));
    }

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        AnalyzerError::InvalidResponse("No candidates in Gemini response".to_string())
    })?;

    debug!("Response finish_reason: {:?}", candidate.finish_reason);

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.as_answer_text())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalyzerError::InvalidResponse(format!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

/// Parse the model's text into an [`AnalysisResult`].
///
/// All-or-nothing: invalid JSON, a missing required field, or a field of the
/// wrong type is an `InvalidResponse` naming the problem.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    serde_json::from_str(text.trim()).map_err(|e| {
        warn!("Rejected analysis response: {}", e);
        AnalyzerError::InvalidResponse(e.to_string())
    })
}

/// [`extract_text`] followed by [`parse_analysis`].
pub fn interpret(response: GenerateContentResponse) -> Result<AnalysisResult> {
    let text = extract_text(response)?;
    parse_analysis(&text)
}
