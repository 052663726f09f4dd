//! CLI application for extracting identity fields from documents.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{config, process};

const EXIT_STATUS_HELP: &str = "\
Failures print {\"error\": \"<message>\"} and exit with status 1. Messages include:
  No PDF path provided              no input was given
  file not found: <path>            the input does not exist
  unsupported file format: <ext>    neither a PDF nor a text file
  Could not extract text from PDF   the document holds no readable text";

/// idex - Extract name, phone and address fields from documents
#[derive(Parser)]
#[command(name = "idex")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = EXIT_STATUS_HELP)]
struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: process::ProcessArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Config(args)) => config::run(args),
        None => process::run(cli.process, cli.config.as_deref()),
    }
}
