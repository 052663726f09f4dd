//! Process command - extract identity fields from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use idex_core::models::{ExtractionOutcome, ExtractionResult, IdexConfig};
use idex_core::pipeline::ExtractionPipeline;

use super::config::default_config_path;

/// Message printed when no input path was given.
const NO_INPUT_ERROR: &str = "No PDF path provided";

/// Arguments for processing a document.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Minimum field confidence for the extraction to count as successful
    #[arg(short, long)]
    min_confidence: Option<f64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let Some(input) = args.input else {
        let outcome = ExtractionOutcome::failure(NO_INPUT_ERROR);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(ExitCode::FAILURE);
    };

    let config = load_config(config_path)?;
    let min_confidence = args
        .min_confidence
        .unwrap_or(config.extraction.min_confidence);
    if !(0.0..=1.0).contains(&min_confidence) {
        anyhow::bail!("--min-confidence must be within [0, 1], got {}", min_confidence);
    }

    info!("Processing file: {}", input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting fields from {}...", input.display()));

    let pipeline = ExtractionPipeline::with_config(config);
    let outcome = pipeline.process_with(&input, min_confidence);

    pb.finish_and_clear();

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    // Exit status 1 for any failure outcome, after the error object is printed
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Explicit config file, else the default one when it exists, else defaults.
fn load_config(config_path: Option<&Path>) -> anyhow::Result<IdexConfig> {
    if let Some(path) = config_path {
        return Ok(IdexConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(IdexConfig::from_file(&default_path)?);
    }

    Ok(IdexConfig::default())
}

fn format_outcome(outcome: &ExtractionOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => Ok(match outcome {
            ExtractionOutcome::Success(result) => format_text(result),
            ExtractionOutcome::Failure { error } => format!("Error: {}\n", error),
        }),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for (field, report) in result.fields() {
        let label = format!("{}:", capitalize(field.as_str()));
        if report.value.is_empty() {
            output.push_str(&format!("{:<9}{}\n", label, style("(not found)").dim()));
        } else {
            output.push_str(&format!(
                "{:<9}{} ({:.2}, {})\n",
                label, report.value, report.confidence, report.method
            ));
        }
    }
    output.push('\n');

    let metadata = &result.metadata;
    output.push_str(&format!(
        "File:    {} ({} bytes)\n",
        metadata.file_name, metadata.file_size
    ));
    output.push_str(&format!("Time:    {}\n", metadata.timestamp));
    let status = if metadata.extraction_successful {
        style("successful").green().to_string()
    } else {
        style("below confidence threshold").yellow().to_string()
    };
    output.push_str(&format!("Status:  {}\n", status));

    output
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
