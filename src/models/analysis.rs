//! Typed records of a structured image analysis.
//!
//! These mirror the response schema sent to Gemini one-to-one. Every field is
//! required: deserializing JSON that lacks one fails instead of producing an
//! empty placeholder. Unknown extra fields are ignored.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// Sentinel the model uses for findings it cannot determine.
pub const UNCERTAIN: &str = "uncertain";

/// Sentinel the model uses when no image data was available.
pub const UNAVAILABLE: &str = "unavailable";

/// Whether a finding is one of the sentinel values rather than real content.
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case(UNCERTAIN) || value.eq_ignore_ascii_case(UNAVAILABLE)
}

/// Root of a structured analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One-sentence summary of the image.
    pub summary: String,
    /// Paragraph-long description of content and context.
    pub detailed_description: String,
    pub objects_detected: Vec<DetectedObject>,
    pub environment_context: EnvironmentContext,
    pub visual_quality_analysis: VisualQualityAnalysis,
    pub text_in_image: TextInImage,
    pub potential_use_cases: Vec<String>,
    pub safety_and_sensitive_content: SafetyAndSensitiveContent,
    /// Suggested next step for the user, e.g. "Enhance lighting".
    pub next_action_suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    pub attributes: Vec<String>,
    pub estimated_role: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    pub setting_type: String,
    pub time_context: String,
    pub mood_or_tone: String,
    pub activity_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualQualityAnalysis {
    pub focus_and_sharpness: String,
    pub lighting: String,
    pub framing_and_composition: String,
    pub aesthetic_notes: String,
}

/// Text found in the image. The string fields only carry meaning when
/// `has_text` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInImage {
    pub has_text: bool,
    pub transcribed_text: String,
    pub meaning_or_purpose: String,
}

impl TextInImage {
    /// Transcription and meaning, when the image contains text.
    pub fn detected(&self) -> Option<(&str, &str)> {
        self.has_text
            .then(|| (self.transcribed_text.as_str(), self.meaning_or_purpose.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAndSensitiveContent {
    pub is_sensitive: bool,
    pub notes: String,
}
