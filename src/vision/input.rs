// Image intake and encoding
// Author: kelexine (https://github.com/kelexine)

use super::models::{validate_image_size, ImageFormat, ImageSource};
use crate::error::{AnalyzerError, Result};
use crate::models::gemini::InlineData;
use base64::Engine;
use bytes::Bytes;
use std::path::Path;

/// A validated image ready to be sent for analysis.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageInput {
    data: Bytes,
    format: ImageFormat,
}

impl ImageInput {
    /// Wrap raw bytes with a caller-supplied MIME type.
    pub fn new(data: impl Into<Bytes>, mime_type: &str) -> Result<Self> {
        let format = ImageFormat::from_mime_type(mime_type).ok_or_else(|| {
            AnalyzerError::InvalidImage(format!("Unsupported image format: {}", mime_type))
        })?;
        Self::with_format(data.into(), format)
    }

    /// Wrap raw bytes, detecting the format from magic bytes.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let format = ImageFormat::detect(&data).ok_or_else(|| {
            AnalyzerError::InvalidImage("Could not detect image format from data".to_string())
        })?;
        Self::with_format(data, format)
    }

    /// Decode a base64 image source, detecting the MIME type if it is absent.
    pub fn from_source(source: &ImageSource) -> Result<Self> {
        let ImageSource::Base64 { media_type, data } = source;

        // Accept data URLs as pasted from a browser
        let encoded = data
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(data);

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| AnalyzerError::InvalidImage(format!("Invalid base64 image data: {}", e)))?;
        if decoded.is_empty() {
            return Err(AnalyzerError::MissingImage);
        }

        match media_type.as_deref().filter(|mt| !mt.trim().is_empty()) {
            Some(mt) => Self::new(decoded, mt),
            None => Self::from_bytes(decoded),
        }
    }

    /// Read an image file. The format comes from its content, falling back to
    /// the file extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let size = tokio::fs::metadata(path).await?.len();
        validate_image_size(usize::try_from(size).unwrap_or(usize::MAX))
            .map_err(AnalyzerError::InvalidImage)?;

        let data = tokio::fs::read(path).await?;
        let format = ImageFormat::detect(&data)
            .or_else(|| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(ImageFormat::from_extension)
            })
            .ok_or_else(|| {
                AnalyzerError::InvalidImage(format!(
                    "Unrecognized image format: {}",
                    path.display()
                ))
            })?;
        Self::with_format(Bytes::from(data), format)
    }

    fn with_format(data: Bytes, format: ImageFormat) -> Result<Self> {
        validate_image_size(data.len()).map_err(AnalyzerError::InvalidImage)?;
        Ok(Self { data, format })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gemini expects base64 data as-is (no `data:` prefix).
    pub fn to_inline_data(&self) -> InlineData {
        InlineData {
            mime_type: self.mime_type().to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(&self.data),
        }
    }
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("mime_type", &self.mime_type())
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Tiny 1x1 PNG (base64 encoded)
    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn test_source_with_media_type() {
        let source = ImageSource::Base64 {
            media_type: Some("image/png".to_string()),
            data: PNG_B64.to_string(),
        };

        let image = ImageInput::from_source(&source).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.to_inline_data().data, PNG_B64);
    }

    #[test]
    fn test_source_without_media_type() {
        let source = ImageSource::Base64 {
            media_type: None,
            data: PNG_B64.to_string(),
        };

        let image = ImageInput::from_source(&source).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
    }

    #[test]
    fn test_source_data_url() {
        let source = ImageSource::Base64 {
            media_type: None,
            data: format!("data:image/png;base64,{}", PNG_B64),
        };

        let image = ImageInput::from_source(&source).unwrap();
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_unsupported_mime_type() {
        let result = ImageInput::new(&b"BM6\0\0\0"[..], "image/bmp");
        assert!(matches!(result, Err(AnalyzerError::InvalidImage(_))));
    }

    #[test]
    fn test_invalid_base64() {
        let source = ImageSource::Base64 {
            media_type: Some("image/png".to_string()),
            data: "not-valid-base64!!!".to_string(),
        };

        assert!(matches!(
            ImageInput::from_source(&source),
            Err(AnalyzerError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            ImageInput::new(Vec::new(), "image/jpeg"),
            Err(AnalyzerError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_empty_source_is_missing_image() {
        let source = ImageSource::Base64 {
            media_type: None,
            data: "  ".to_string(),
        };

        assert!(matches!(
            ImageInput::from_source(&source),
            Err(AnalyzerError::MissingImage)
        ));
    }

    #[test]
    fn test_debug_omits_bytes() {
        let image = ImageInput::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg").unwrap();
        assert_eq!(
            format!("{:?}", image),
            "ImageInput { mime_type: \"image/jpeg\", bytes: 4 }"
        );
    }

    #[tokio::test]
    async fn test_from_path_uses_extension_fallback() {
        let mut file = tempfile::Builder::new().suffix(".heic").tempfile().unwrap();
        file.write_all(b"not a recognizable header").unwrap();

        let image = ImageInput::from_path(file.path()).await.unwrap();
        assert_eq!(image.format(), ImageFormat::Heic);
    }

    #[tokio::test]
    async fn test_from_path_unknown_format() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain text").unwrap();

        assert!(matches!(
            ImageInput::from_path(file.path()).await,
            Err(AnalyzerError::InvalidImage(_))
        ));
    }

    #[tokio::test]
    async fn test_from_path_rejects_oversized_file_before_reading() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.as_file()
            .set_len(crate::vision::models::MAX_IMAGE_SIZE_BYTES as u64 + 1)
            .unwrap();

        match ImageInput::from_path(file.path()).await {
            Err(AnalyzerError::InvalidImage(reason)) => assert!(reason.contains("exceeds maximum")),
            other => panic!("expected oversized image error, got {:?}", other),
        }
    }
}
