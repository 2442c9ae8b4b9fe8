//! Cross-slide inconsistency analysis.

use std::fmt;

use slidecheck_core::SlideRecord;

use crate::error::LlmError;
use crate::prompts;
use crate::provider::TextGenerator;

/// Broad class of a failed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service could not be reached or the request timed out.
    Network,
    /// The API key was missing, invalid or not permitted.
    Authentication,
    /// Quota or rate limit exceeded.
    RateLimited,
    /// The service refused the prompt or withheld the completion.
    Rejected,
    /// The service answered with something that is not a completion.
    MalformedResponse,
    /// Any other error status from the service.
    Api,
    /// The slide content could not be rendered into a prompt.
    Prompt,
}

impl From<&LlmError> for FailureKind {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::Unauthorized(_) => FailureKind::Authentication,
            LlmError::RateLimited(_) => FailureKind::RateLimited,
            LlmError::ConnectionError(_) | LlmError::Timeout | LlmError::RequestFailed(_) => {
                FailureKind::Network
            }
            LlmError::Blocked(_) => FailureKind::Rejected,
            LlmError::InvalidResponse(_) => FailureKind::MalformedResponse,
            LlmError::ApiError { .. } => FailureKind::Api,
        }
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The model's Markdown report, verbatim.
    Report(String),
    /// The call failed; nothing was learned about the deck.
    Failure {
        /// Service that was called, e.g. "Gemini".
        service: String,
        /// What went wrong.
        kind: FailureKind,
        /// Human-readable detail from the error.
        detail: String,
    },
}

impl AnalysisOutcome {
    /// Whether the model produced a report.
    pub fn is_report(&self) -> bool {
        matches!(self, AnalysisOutcome::Report(_))
    }

    /// Text to show the user: the report itself, or a one-line error message.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisOutcome::Report(text) => f.write_str(text),
            AnalysisOutcome::Failure { service, detail, .. } => {
                write!(f, "An error occurred with the {} API: {}", service, detail)
            }
        }
    }
}

/// Sends a whole deck to a text model and asks it for inconsistencies.
pub struct InconsistencyAnalyzer<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> InconsistencyAnalyzer<G> {
    /// Create an analyzer backed by the given generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Analyze all slides in one request.
    ///
    /// Never fails: errors from the remote call come back as
    /// [`AnalysisOutcome::Failure`].
    pub fn analyze(&self, slides: &[SlideRecord]) -> AnalysisOutcome {
        log::info!(
            "Analyzing {} slides with {} (model: {})",
            slides.len(),
            self.generator.name(),
            self.generator.model()
        );

        let prompt = match prompts::build_inconsistency_prompt(slides) {
            Ok(prompt) => prompt,
            Err(e) => return self.failure(FailureKind::Prompt, e.to_string()),
        };

        match self.generator.generate(&prompt) {
            Ok(text) => AnalysisOutcome::Report(text),
            Err(e) => {
                log::error!("{} request failed: {}", self.generator.name(), e);
                self.failure(FailureKind::from(&e), e.to_string())
            }
        }
    }

    fn failure(&self, kind: FailureKind, detail: String) -> AnalysisOutcome {
        AnalysisOutcome::Failure {
            service: self.generator.name().to_string(),
            kind,
            detail,
        }
    }
}
