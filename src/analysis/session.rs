// Analysis session state machine
// Author: kelexine (https://github.com/kelexine)

use super::{Analyzer, Language};
use crate::error::{AnalyzerError, ErrorKind, Result};
use crate::models::analysis::AnalysisResult;
use crate::vision::ImageInput;
use serde::Serialize;
use tracing::{debug, warn};

/// What a user-facing surface should currently display.
///
/// A single state replaces independent loading/error/result flags, so
/// "loading with an error" or "error next to a stale result" cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(AnalysisFailure),
}

/// A failure reduced to what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AnalyzerError> for AnalysisFailure {
    fn from(error: &AnalyzerError) -> Self {
        Self {
            kind: error.kind(),
            message: error.user_message(),
        }
    }
}

/// Inputs captured when an analysis starts.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub image: ImageInput,
    pub language: Language,
}

/// One user's analysis workflow: the selected image and language, and the
/// state of the latest analysis.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    image: Option<ImageInput>,
    language: Language,
    state: AnalysisState,
}

impl AnalysisSession {
    pub fn new(language: Language) -> Self {
        Self {
            image: None,
            language,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn image(&self) -> Option<&ImageInput> {
        self.image.as_ref()
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Select a new image. Any previous result or error is cleared; an
    /// analysis already in flight keeps its `Loading` state.
    pub fn select_image(&mut self, image: ImageInput) {
        debug!("Image selected: {:?}", image);
        self.image = Some(image);
        if !self.is_busy() {
            self.state = AnalysisState::Idle;
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, AnalysisState::Loading)
    }

    /// Whether triggering an analysis would issue a call.
    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.is_busy()
    }

    /// Start an analysis.
    ///
    /// Fails with `AnalysisInFlight` (state untouched) while one is running,
    /// and with `MissingImage` (state becomes `Failed`) when no image is
    /// selected. Otherwise clears the previous outcome and moves to `Loading`.
    pub fn begin(&mut self) -> Result<PendingAnalysis> {
        if self.is_busy() {
            warn!("Analysis requested while another is in flight");
            return Err(AnalyzerError::AnalysisInFlight);
        }

        let Some(image) = self.image.clone() else {
            let error = AnalyzerError::MissingImage;
            self.state = AnalysisState::Failed(AnalysisFailure::from(&error));
            return Err(error);
        };

        self.state = AnalysisState::Loading;
        Ok(PendingAnalysis {
            image,
            language: self.language.clone(),
        })
    }

    /// Record the outcome of the call started by [`AnalysisSession::begin`].
    ///
    /// Fails with `NoAnalysisInFlight` (state untouched) unless the session
    /// is `Loading`.
    pub fn complete(&mut self, outcome: Result<AnalysisResult>) -> Result<&AnalysisState> {
        if !self.is_busy() {
            warn!("Analysis outcome delivered with no analysis in flight");
            return Err(AnalyzerError::NoAnalysisInFlight);
        }

        self.state = match outcome {
            Ok(result) => AnalysisState::Succeeded(result),
            Err(error) => AnalysisState::Failed(AnalysisFailure::from(&error)),
        };
        Ok(&self.state)
    }

    /// `begin`, one call through `analyzer`, then `complete`.
    ///
    /// Never issues a call when `begin` refuses to start.
    pub async fn analyze(&mut self, analyzer: &Analyzer) -> &AnalysisState {
        let pending = match self.begin() {
            Ok(pending) => pending,
            Err(_) => return &self.state,
        };

        let outcome = analyzer.analyze(&pending.image, &pending.language).await;
        if let Err(e) = self.complete(outcome) {
            warn!("Dropping analysis outcome: {}", e);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg() -> ImageInput {
        ImageInput::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg").unwrap()
    }

    #[test]
    fn test_begin_without_image_fails_with_input_error() {
        let mut session = AnalysisSession::default();

        let err = session.begin().unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingImage));
        assert_eq!(
            session.state(),
            &AnalysisState::Failed(AnalysisFailure {
                kind: ErrorKind::Input,
                message: "Please upload an image first.".to_string(),
            })
        );
    }

    #[test]
    fn test_begin_rejects_second_analysis_in_flight() {
        let mut session = AnalysisSession::default();
        session.select_image(jpeg());

        let pending = session.begin().unwrap();
        assert_eq!(pending.language, Language::english());
        assert!(session.is_busy());
        assert!(!session.can_analyze());

        assert!(matches!(session.begin(), Err(AnalyzerError::AnalysisInFlight)));
        assert_eq!(session.state(), &AnalysisState::Loading);
    }

    #[test]
    fn test_failure_clears_loading_and_result() {
        let mut session = AnalysisSession::default();
        session.select_image(jpeg());
        session.begin().unwrap();

        let state = session
            .complete(Err(AnalyzerError::GeminiApi("HTTP 429".to_string())))
            .unwrap();
        match state {
            AnalysisState::Failed(failure) => {
                assert_eq!(failure.kind, ErrorKind::Provider);
                assert!(!failure.message.contains("429"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
        assert!(session.can_analyze());
    }

    #[test]
    fn test_selecting_image_resets_outcome() {
        let mut session = AnalysisSession::new(Language::armenian());
        session.begin().unwrap_err();
        assert!(matches!(session.state(), AnalysisState::Failed(_)));

        session.select_image(jpeg());
        assert_eq!(session.state(), &AnalysisState::Idle);
        assert_eq!(session.language(), &Language::armenian());
    }

    #[test]
    fn test_selecting_image_while_loading_keeps_loading() {
        let mut session = AnalysisSession::default();
        session.select_image(jpeg());
        session.begin().unwrap();

        session.select_image(jpeg());
        assert_eq!(session.state(), &AnalysisState::Loading);
    }

    #[test]
    fn test_complete_without_begin_is_rejected() {
        let mut session = AnalysisSession::default();
        session.select_image(jpeg());

        let err = session
            .complete(Err(AnalyzerError::GeminiApi("late".to_string())))
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NoAnalysisInFlight));
        assert_eq!(session.state(), &AnalysisState::Idle);

        session.begin().unwrap();
        session.complete(Err(AnalyzerError::MissingImage)).unwrap();
        assert!(matches!(
            session.complete(Err(AnalyzerError::MissingImage)),
            Err(AnalyzerError::NoAnalysisInFlight)
        ));
        assert!(matches!(session.state(), AnalysisState::Failed(_)));
    }
}
