// Plain-text presentation of analysis results
// Author: kelexine (https://github.com/kelexine)

use super::session::AnalysisState;
use crate::models::analysis::{is_sentinel, AnalysisResult};
use std::fmt::Write;

pub const IDLE_TEXT: &str = "Analysis results will appear here.";
pub const LOADING_TEXT: &str = "Performing deep analysis...";
pub const NO_TEXT_DETECTED: &str = "No text detected in the image.";
pub const SENSITIVE_DETECTED: &str = "Sensitive Content Potentially Detected";
pub const NO_SENSITIVE_CONTENT: &str = "No Sensitive Content Detected";

/// Render whatever the session currently shows. A failure renders as its
/// single message and nothing else.
pub fn render_state(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Idle => format!("{}\n", IDLE_TEXT),
        AnalysisState::Loading => format!("{}\n", LOADING_TEXT),
        AnalysisState::Succeeded(result) => render_text(result),
        AnalysisState::Failed(failure) => format!("Error: {}\n", failure.message),
    }
}

/// Render an analysis as titled sections, one per facet.
pub fn render_text(result: &AnalysisResult) -> String {
    // Writing into a String cannot fail
    let mut out = String::new();

    section(&mut out, "Summary");
    let _ = writeln!(out, "{}", result.summary);

    section(&mut out, "Detailed Description");
    let _ = writeln!(out, "{}", result.detailed_description);

    section(&mut out, "Objects Detected");
    for object in &result.objects_detected {
        let _ = writeln!(out, "- {}", object.name);
        let _ = writeln!(out, "  Role: {}", finding(&object.estimated_role));
        let _ = writeln!(out, "  Location: {}", finding(&object.location));
        if !object.attributes.is_empty() {
            let _ = writeln!(out, "  Attributes: {}", object.attributes.join(", "));
        }
    }

    let env = &result.environment_context;
    section(&mut out, "Environment Context");
    let _ = writeln!(out, "Setting: {}", finding(&env.setting_type));
    let _ = writeln!(out, "Time: {}", finding(&env.time_context));
    let _ = writeln!(out, "Mood/Tone: {}", finding(&env.mood_or_tone));
    let _ = writeln!(out, "Activity: {}", finding(&env.activity_type));

    let quality = &result.visual_quality_analysis;
    section(&mut out, "Visual Quality");
    let _ = writeln!(out, "Focus & Sharpness: {}", finding(&quality.focus_and_sharpness));
    let _ = writeln!(out, "Lighting: {}", finding(&quality.lighting));
    let _ = writeln!(out, "Composition: {}", finding(&quality.framing_and_composition));
    let _ = writeln!(out, "Aesthetic Notes: {}", finding(&quality.aesthetic_notes));

    section(&mut out, "Text in Image");
    match result.text_in_image.detected() {
        Some((transcribed, meaning)) => {
            let _ = writeln!(out, "\"{}\"", transcribed);
            let _ = writeln!(out, "Meaning/Purpose: {}", meaning);
        }
        None => {
            let _ = writeln!(out, "{}", NO_TEXT_DETECTED);
        }
    }

    section(&mut out, "Potential Use Cases");
    for use_case in &result.potential_use_cases {
        let _ = writeln!(out, "- {}", use_case);
    }

    let safety = &result.safety_and_sensitive_content;
    section(&mut out, "Safety & Sensitive Content");
    let verdict = if safety.is_sensitive {
        SENSITIVE_DETECTED
    } else {
        NO_SENSITIVE_CONTENT
    };
    let _ = writeln!(out, "{}", verdict);
    let _ = writeln!(out, "{}", safety.notes);

    section(&mut out, "Next Action Suggestion");
    let _ = writeln!(out, "{}", result.next_action_suggestion);

    out
}

/// Labeled findings; sentinel values are shown as markers, not content.
fn finding(value: &str) -> String {
    if is_sentinel(value) {
        format!("({})", value.trim().to_lowercase())
    } else {
        value.to_string()
    }
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "## {}", title);
}
