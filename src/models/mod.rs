//! Data models for the Gemini wire format and the analysis result.
//!
//! # Submodules
//!
//! - `analysis`: Typed records produced from the model's JSON output.
//! - `gemini`: Request/response envelopes of the `generateContent` API.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod analysis;
pub mod gemini;

pub use analysis::{
    AnalysisResult, DetectedObject, EnvironmentContext, SafetyAndSensitiveContent, TextInImage,
    VisualQualityAnalysis,
};
