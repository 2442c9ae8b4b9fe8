//! PPTX (Office Open XML) slide content extractor.
//!
//! Parses .pptx files, which are ZIP archives containing XML documents,
//! into one [`SlideRecord`](slidecheck_core::SlideRecord) per slide.

pub mod parser;
pub mod shapes;

pub use parser::PptxParser;
pub use shapes::{Shape, ShapeKind};

use slidecheck_core::{Presentation, Result};
use std::path::Path;

/// Extract the text and tables of every slide in the deck at `path`.
pub fn extract(path: impl AsRef<Path>) -> Result<Presentation> {
    PptxParser::new().open(path.as_ref())
}
