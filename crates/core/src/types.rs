//! Domain types for representing extracted presentation content.

use serde::{Deserialize, Serialize};

/// A table as rows of trimmed cell strings. Rows may differ in length.
pub type Table = Vec<Vec<String>>;

/// Represents an entire presentation with its extracted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<SlideRecord>,
}

impl Presentation {
    /// Create a new, empty presentation with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Append the next slide, numbering it after the ones already present.
    pub fn push_slide(&mut self) -> &mut SlideRecord {
        let number = self.slides.len() + 1;
        self.slides.push(SlideRecord::new(number));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides at all.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// The text and tables found on a single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide number.
    pub slide_number: usize,

    /// Non-empty paragraphs, in shape then paragraph order.
    pub text_content: Vec<String>,

    /// One entry per table shape on the slide.
    pub table_content: Vec<Table>,
}

impl SlideRecord {
    /// Create an empty record for the given slide number.
    pub fn new(slide_number: usize) -> Self {
        Self {
            slide_number,
            text_content: Vec::new(),
            table_content: Vec::new(),
        }
    }

    /// Add a paragraph of text. The text is trimmed and dropped if empty.
    ///
    /// Returns whether the paragraph was kept.
    pub fn add_text(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.text_content.push(text.to_string());
        true
    }

    /// Add a table. Cells are expected to be trimmed already.
    pub fn add_table(&mut self, table: Table) {
        self.table_content.push(table);
    }

    /// Whether the slide carried no text and no tables.
    pub fn is_blank(&self) -> bool {
        self.text_content.is_empty() && self.table_content.is_empty()
    }
}
