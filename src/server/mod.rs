//! Axum-based HTTP server for gemlens.
//!
//! Exposes the analyze operation to browser or service clients. Every
//! `/v1/analyze` request is independent: it carries its own image and
//! language and performs exactly one Gemini call.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (analyze, health, metrics).
//! - `middleware`: Request ID propagation and request metrics.
//! - `routes`: The router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::AnalyzeRequest;
pub use routes::{create_router, AppState};
