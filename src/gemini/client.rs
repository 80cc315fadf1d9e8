// Gemini API client (API key authentication)
// Author: kelexine (https://github.com/kelexine)

use super::InferenceBackend;
use crate::config::{ApiKey, GeminiConfig};
use crate::error::{AnalyzerError, Result};
use crate::metrics;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::scrub;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for the Google Gemini Generative Language API.
///
/// Sends one `generateContent` call per request, authenticated with a
/// static API key. Failures are returned immediately; there is no retry.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// The API key is required up front so that a missing credential fails
    /// at startup rather than on the first analysis.
    pub fn new(config: &GeminiConfig, api_key: ApiKey) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls();

        // No timeout unless the operator asks for one
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let http_client = builder
            .build()
            .map_err(|e| AnalyzerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Gemini HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    /// The configured analysis model.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            model
        )
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        serde_json::from_str::<ErrorResponse>(response_text)
            .ok()?
            .error
            .and_then(|error| error.message.or(error.status))
    }
}

#[async_trait]
impl InferenceBackend for GeminiClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
        model: &str,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!("Calling generateContent API for model: {}", model);

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_gemini_call(model, 0, start.elapsed().as_secs_f64());
                AnalyzerError::GeminiApi(format!("HTTP error: {}", scrub(&e.to_string())))
            })?;

        let status = response.status();
        metrics::record_gemini_call(model, status.as_u16(), start.elapsed().as_secs_f64());

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                scrub(&error_text)
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(AnalyzerError::GeminiApi(format!(
                "HTTP {}: {}",
                status,
                scrub(&message)
            )));
        }

        let response_text = response.text().await.map_err(|e| {
            AnalyzerError::GeminiApi(format!("Failed to read response body: {}", e))
        })?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        let parsed: GenerateContentResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse Gemini response envelope: {}", e);
                AnalyzerError::GeminiApi(format!("Response parsing error: {}", e))
            })?;

        if let Some(usage) = &parsed.usage_metadata {
            let input = usage.prompt_token_count.unwrap_or(0);
            let output = usage.candidates_token_count.unwrap_or(0);
            debug!(
                "Token usage for {}: input={}, output={}, total={:?}",
                parsed.model_version.as_deref().unwrap_or(model),
                input,
                output,
                usage.total_token_count
            );
            metrics::record_tokens(model, input, output);
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GeminiClient {
        let config = GeminiConfig {
            api_base_url: base.to_string(),
            ..Default::default()
        };
        GeminiClient::new(&config, ApiKey::new("test-key").unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_format() {
        let client = client("https://generativelanguage.googleapis.com/v1beta/");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            GeminiClient::extract_error_message(body).as_deref(),
            Some("Resource has been exhausted")
        );
        assert_eq!(GeminiClient::extract_error_message("<html>"), None);
    }
}
