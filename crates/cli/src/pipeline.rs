//! Extract, analyze and print, once per run.

use crate::config::{Config, ConfigError};
use slidecheck_core::{Presentation, ReportFormatter};
use slidecheck_llm::{InconsistencyAnalyzer, TextGenerator};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The model's report was printed.
    Reported,
    /// The remote call failed; its error text was printed in place of a report.
    AnalysisFailed,
    /// The deck has no slides, so nothing was sent.
    NothingToAnalyze,
    /// The deck could not be found or read.
    DocumentUnavailable,
    /// No API key was configured, so nothing was read or sent.
    MissingCredential,
}

impl RunStatus {
    /// Numeric exit status: 0 success, 1 no usable input, 2 remote failure.
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Reported | RunStatus::NothingToAnalyze => 0,
            RunStatus::DocumentUnavailable | RunStatus::MissingCredential => 1,
            RunStatus::AnalysisFailed => 2,
        }
    }

    /// Process exit code for this status.
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Check the configuration, then extract, analyze and report.
///
/// A configuration error is reported and ends the run before the deck is
/// opened or a generator is built.
pub fn run_with_config<G, F>(
    config: Result<Config, ConfigError>,
    input: &Path,
    make_generator: F,
    out: &mut impl Write,
) -> anyhow::Result<RunStatus>
where
    G: TextGenerator,
    F: FnOnce(Config) -> anyhow::Result<G>,
{
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            return Ok(RunStatus::MissingCredential);
        }
    };

    let analyzer = InconsistencyAnalyzer::new(make_generator(config)?);
    Ok(run(input, &analyzer, out)?)
}

/// Extract the deck at `input`, analyze it and write the report to `out`.
///
/// The analyzer is only called when the deck was read and has slides.
pub fn run<G: TextGenerator>(
    input: &Path,
    analyzer: &InconsistencyAnalyzer<G>,
    out: &mut impl Write,
) -> io::Result<RunStatus> {
    let Some(presentation) = load(input, out)? else {
        return Ok(RunStatus::DocumentUnavailable);
    };

    if presentation.is_empty() {
        writeln!(out, "The presentation has no slides; nothing to analyze.")?;
        return Ok(RunStatus::NothingToAnalyze);
    }

    eprintln!(
        "\nSending data to {} API for analysis...",
        analyzer.generator().name()
    );

    let outcome = analyzer.analyze(&presentation.slides);
    write!(out, "{}", ReportFormatter::new().format_with_newline(&outcome.text()))?;

    Ok(if outcome.is_report() {
        RunStatus::Reported
    } else {
        RunStatus::AnalysisFailed
    })
}

/// Extract the deck at `input` and write its slide records to `out` as JSON.
pub fn print_records(input: &Path, out: &mut impl Write) -> io::Result<RunStatus> {
    let Some(presentation) = load(input, out)? else {
        return Ok(RunStatus::DocumentUnavailable);
    };

    serde_json::to_writer_pretty(&mut *out, &presentation.slides)?;
    writeln!(out)?;

    Ok(if presentation.is_empty() {
        RunStatus::NothingToAnalyze
    } else {
        RunStatus::Reported
    })
}

/// Extract the deck, writing a diagnostic to `out` if it cannot be read.
fn load(input: &Path, out: &mut impl Write) -> io::Result<Option<Presentation>> {
    log::debug!("Extracting {}", input.display());

    match slidecheck_pptx::extract(input) {
        Ok(presentation) => {
            log::info!(
                "Extracted {} slides from {}",
                presentation.slide_count(),
                presentation.filename
            );
            Ok(Some(presentation))
        }
        Err(e) if e.is_not_found() => {
            writeln!(out, "Error: {}", e)?;
            Ok(None)
        }
        Err(e) => {
            writeln!(out, "Error: Could not read {}: {}", input.display(), e)?;
            Ok(None)
        }
    }
}
