//! Vision and image intake module.
//!
//! This module turns user-supplied images (files, raw bytes, or base64
//! payloads from the HTTP API) into validated [`ImageInput`] values and
//! encodes them into Gemini's `InlineData` format. It includes MIME type
//! detection, size validation, and base64 encoding.
//!
//! # Submodules
//!
//! - `models`: Supported formats, magic-byte detection, and size limits.
//! - `input`: The validated image type and its constructors.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod input;
pub mod models;

pub use input::ImageInput;
pub use models::{ImageFormat, ImageSource};
