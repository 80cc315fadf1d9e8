// Shared fixtures for integration tests
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use gemlens::error::{AnalyzerError, Result};
use gemlens::gemini::InferenceBackend;
use gemlens::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use gemlens::vision::ImageInput;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Tiny 1x1 PNG (base64 encoded)
pub const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

pub fn png_image() -> ImageInput {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD.decode(PNG_B64).unwrap();
    ImageInput::new(bytes, "image/png").unwrap()
}

/// Daytime park photo analysis with no text in the image.
pub fn park_analysis() -> Value {
    json!({
        "summary": "A park scene.",
        "detailed_description": "A sunny public park with a wide lawn, a bench and a dog running across the grass.",
        "objects_detected": [
            {
                "name": "bench",
                "attributes": ["wooden", "green"],
                "estimated_role": "seating",
                "location": "left foreground"
            },
            {
                "name": "dog",
                "attributes": [],
                "estimated_role": "pet",
                "location": "center"
            }
        ],
        "environment_context": {
            "setting_type": "outdoors",
            "time_context": "daytime",
            "mood_or_tone": "peaceful",
            "activity_type": "leisure"
        },
        "visual_quality_analysis": {
            "focus_and_sharpness": "sharp throughout",
            "lighting": "bright natural light",
            "framing_and_composition": "wide shot, horizon on the upper third",
            "aesthetic_notes": "uncertain"
        },
        "text_in_image": {
            "has_text": false,
            "transcribed_text": "",
            "meaning_or_purpose": ""
        },
        "potential_use_cases": ["travel brochure", "stock photography"],
        "safety_and_sensitive_content": {
            "is_sensitive": false,
            "notes": "No sensitive content."
        },
        "next_action_suggestion": "Identify main subject"
    })
}

/// A `generateContent` envelope whose single candidate answers with `text`.
pub fn envelope_json(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 300, "candidatesTokenCount": 200, "totalTokenCount": 500 }
    })
}

pub fn envelope(text: &str) -> GenerateContentResponse {
    serde_json::from_value(envelope_json(text)).unwrap()
}

/// In-memory backend that replays canned outcomes and counts calls.
#[derive(Default)]
pub struct MockBackend {
    outcomes: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(GenerateContentRequest, String)>>,
}

impl MockBackend {
    pub fn replying(outcomes: Vec<Result<GenerateContentResponse>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(GenerateContentRequest, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
        model: &str,
    ) -> Result<GenerateContentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((request, model.to_string()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalyzerError::Internal("no canned outcome left".to_string())))
    }
}
