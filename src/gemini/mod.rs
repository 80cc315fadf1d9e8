// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::GeminiClient;

use crate::error::Result;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;

/// Anything that can answer a `generateContent` request.
///
/// [`GeminiClient`] is the production implementation; the analyze flow only
/// depends on this trait.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Perform exactly one generation call. No retries.
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
        model: &str,
    ) -> Result<GenerateContentResponse>;
}
