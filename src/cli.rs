//! CLI argument parsing for Veredicto

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for renderers and machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "veredicto")]
#[command(version)]
#[command(
    about = "Compare control and experiment benchmark samples phase by phase",
    long_about = None
)]
pub struct Cli {
    /// JSON file with the control samples (array of samples)
    #[arg(short = 'c', long = "control", value_name = "FILE")]
    pub control: PathBuf,

    /// JSON file with the experiment samples (array of samples)
    #[arg(short = 'e', long = "experiment", value_name = "FILE")]
    pub experiment: PathBuf,

    /// Named configuration preset (standard, strict, permissive)
    #[arg(long = "preset", value_name = "NAME", conflicts_with = "config")]
    pub preset: Option<String>,

    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
