//! CLI tool for finding inconsistencies across the slides of a PowerPoint deck.

mod config;
mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use slidecheck_llm::GeminiProvider;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Find factual and logical inconsistencies across the slides of a deck.
#[derive(Parser, Debug)]
#[command(name = "slidecheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx). Defaults to presentations/NoogatAssignment.pptx
    /// beside the executable's directory.
    input: Option<PathBuf>,

    /// Gemini model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120, value_name = "SECS")]
    timeout: u64,

    /// Print the extracted slide records as JSON and exit without calling the API
    #[arg(long)]
    extract_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.extract_only {
        let input = args.input.clone().unwrap_or_else(config::default_input_path);
        let status = pipeline::print_records(&input, &mut out)?;
        return Ok(status.exit_code());
    }

    // The key is checked before the deck is touched.
    let input = args.input.clone().unwrap_or_else(config::default_input_path);
    if args.verbose {
        eprintln!("Processing: {}", input.display());
    }

    let status = pipeline::run_with_config(
        Config::load(),
        &input,
        |config| {
            let provider =
                GeminiProvider::new(config.into_api_key(), Duration::from_secs(args.timeout))
                    .context("Failed to create HTTP client")?;
            Ok(match &args.model {
                Some(model) => provider.with_model(model),
                None => provider,
            })
        },
        &mut out,
    )?;
    out.flush()?;

    Ok(status.exit_code())
}
