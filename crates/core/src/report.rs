//! Report text output.
//!
//! Frames the analysis text with a fixed banner:
//!
//! ```text
//!
//! ==================================================
//! INCONSISTENCY ANALYSIS REPORT
//! ==================================================
//! <report body>
//! ```

/// Title line printed between the separators.
pub const REPORT_TITLE: &str = "INCONSISTENCY ANALYSIS REPORT";

/// Formatter for the printed inconsistency report.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    /// Character repeated to build the separator lines.
    separator: char,

    /// Width of the separator lines.
    width: usize,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self {
            separator: '=',
            width: 50,
        }
    }
}

impl ReportFormatter {
    /// Create a new formatter with a 50-wide `=` separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The separator line on its own.
    pub fn separator_line(&self) -> String {
        std::iter::repeat(self.separator).take(self.width).collect()
    }

    /// The banner: a blank line, separator, title, separator.
    pub fn banner(&self) -> String {
        let line = self.separator_line();
        format!("\n{line}\n{REPORT_TITLE}\n{line}")
    }

    /// Banner followed by the report body, body left untouched.
    pub fn format(&self, body: &str) -> String {
        format!("{}\n{}", self.banner(), body)
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, body: &str) -> String {
        let formatted = self.format(body);
        if formatted.ends_with('\n') {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }
}
