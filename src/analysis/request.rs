// Request building (image + language → Gemini request)
// Author: kelexine (https://github.com/kelexine)

use super::language::Language;
use crate::models::analysis::{UNAVAILABLE, UNCERTAIN};
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerationConfig, Part, Schema, SystemInstruction,
};
use crate::vision::ImageInput;
use tracing::debug;

/// User turn sent alongside the image.
pub const USER_PROMPT: &str = "Analyze this image based on your instructions.";

/// Structured output MIME type.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Instruction text conditioning the model for one output language.
pub fn system_instruction(language: &Language) -> String {
    format!(
        "You are a professional image analysis service. Analyze the provided image deeply and \
         return your findings strictly in the specified JSON format. The entire JSON response, \
         including all string values, must be in {language}. Be detailed, visual, and factual \
         in your descriptions. If any piece of information is uncertain, use the string \
         \"{UNCERTAIN}\". If no image is provided, fill all string fields with \"{UNAVAILABLE}\". \
         You are not a chat assistant; do not provide any text or prose outside of the JSON \
         structure."
    )
}

/// The fixed response schema. Identical for every language.
pub fn response_schema() -> Schema {
    let detected_object = Schema::object([
        ("name", Schema::string()),
        ("attributes", Schema::array(Schema::string())),
        ("estimated_role", Schema::string()),
        ("location", Schema::string()),
    ]);

    let environment_context = Schema::object([
        (
            "setting_type",
            Schema::string().with_description("e.g., 'indoors', 'outdoors', 'urban', 'natural'"),
        ),
        (
            "time_context",
            Schema::string().with_description("e.g., 'daytime', 'night', 'golden hour'"),
        ),
        (
            "mood_or_tone",
            Schema::string().with_description("e.g., 'joyful', 'somber', 'energetic', 'peaceful'"),
        ),
        (
            "activity_type",
            Schema::string().with_description(
                "The main activity depicted, e.g., 'celebration', 'work', 'leisure'",
            ),
        ),
    ]);

    let visual_quality_analysis = Schema::object([
        ("focus_and_sharpness", Schema::string()),
        ("lighting", Schema::string()),
        ("framing_and_composition", Schema::string()),
        ("aesthetic_notes", Schema::string()),
    ]);

    let text_in_image = Schema::object([
        ("has_text", Schema::boolean()),
        ("transcribed_text", Schema::string()),
        ("meaning_or_purpose", Schema::string()),
    ]);

    let safety = Schema::object([
        ("is_sensitive", Schema::boolean()),
        ("notes", Schema::string()),
    ]);

    Schema::object([
        (
            "summary",
            Schema::string().with_description("A brief, one-sentence summary of the image."),
        ),
        (
            "detailed_description",
            Schema::string().with_description(
                "A comprehensive, paragraph-long description of the image content and context.",
            ),
        ),
        ("objects_detected", Schema::array(detected_object)),
        ("environment_context", environment_context),
        ("visual_quality_analysis", visual_quality_analysis),
        ("text_in_image", text_in_image),
        ("potential_use_cases", Schema::array(Schema::string())),
        ("safety_and_sensitive_content", safety),
        (
            "next_action_suggestion",
            Schema::string().with_description(
                "A suggested next step for a user, like 'Enhance lighting' or 'Identify main subject'.",
            ),
        ),
    ])
}

/// Build the complete `generateContent` request for one analysis.
///
/// Pure: every call constructs a fresh payload.
pub fn build_request(image: &ImageInput, language: &Language) -> GenerateContentRequest {
    debug!(
        "Building analysis request: {} ({} bytes), language={}",
        image.mime_type(),
        image.len(),
        language
    );

    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::InlineData {
                    inline_data: image.to_inline_data(),
                },
                Part::text(USER_PROMPT),
            ],
        }],
        system_instruction: Some(SystemInstruction {
            parts: vec![Part::text(system_instruction(language))],
        }),
        generation_config: Some(GenerationConfig {
            response_mime_type: Some(RESPONSE_MIME_TYPE.to_string()),
            response_schema: Some(response_schema()),
        }),
    }
}
