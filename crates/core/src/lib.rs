//! Core domain types and report formatting for slide-deck
//! inconsistency checks.

pub mod error;
pub mod report;
pub mod types;

pub use error::{Error, Result};
pub use report::ReportFormatter;
pub use types::{Presentation, SlideRecord, Table};
