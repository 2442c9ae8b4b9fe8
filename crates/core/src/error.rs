//! Error types for slide content extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting slide content.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not resolve to a file.
    #[error("The file {} was not found.", .0.display())]
    DocumentNotFound(PathBuf),

    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (the package container).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error inside a package part.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A part required to read the deck is absent from the package.
    #[error("Missing package part: {0}")]
    MissingPart(String),
}

impl Error {
    /// Whether this error means the document could not be found at all,
    /// as opposed to being found but unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::DocumentNotFound(_))
    }
}
