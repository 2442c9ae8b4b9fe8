//! Inconsistency analysis for extracted slide content.
//!
//! Renders slide records into a prompt, sends it to a hosted text model
//! and hands back the model's Markdown report.

pub mod analyzer;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod provider;

pub use analyzer::{AnalysisOutcome, FailureKind, InconsistencyAnalyzer};
pub use error::LlmError;
pub use gemini::GeminiProvider;
pub use provider::TextGenerator;
