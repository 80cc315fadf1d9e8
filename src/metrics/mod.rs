// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, ANALYSES_TOTAL, GEMINI_API_CALLS, GEMINI_API_DURATION, REQUESTS_TOTAL,
    REQUEST_DURATION, TOKENS_TOTAL,
};

use crate::error::AnalyzerError;

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration_secs);
}

/// Helper to record Gemini API call metrics. `status_code` is 0 when no
/// response was received.
pub fn record_gemini_call(model: &str, status_code: u16, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

/// Helper to record token usage of one Gemini call
pub fn record_tokens(model: &str, input: u32, output: u32) {
    if input > 0 {
        TOKENS_TOTAL
            .with_label_values(&[model, "input"])
            .inc_by(input as f64);
    }
    if output > 0 {
        TOKENS_TOTAL
            .with_label_values(&[model, "output"])
            .inc_by(output as f64);
    }
}

/// Helper to record the outcome of one analyze operation
pub fn record_analysis<T>(outcome: &Result<T, AnalyzerError>) {
    let label = match outcome {
        Ok(_) => "success",
        Err(e) => match e.kind() {
            crate::error::ErrorKind::Configuration => "configuration_error",
            crate::error::ErrorKind::Input => "input_error",
            crate::error::ErrorKind::Busy => "busy",
            crate::error::ErrorKind::Provider => "provider_error",
            crate::error::ErrorKind::ResponseShape => "invalid_response",
            crate::error::ErrorKind::Internal => "internal_error",
        },
    };
    ANALYSES_TOTAL.with_label_values(&[label]).inc();
}
