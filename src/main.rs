use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use veredicto::cli::{Cli, OutputFormat};
use veredicto::compare::{compare_samples, ComparisonConfig, Preset};
use veredicto::sample::Sample;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read a JSON array of samples
fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse samples file: {}", path.display()))
}

/// Resolve the configuration from `--preset` or `--config`
fn load_config(cli: &Cli) -> Result<ComparisonConfig> {
    if let Some(name) = &cli.preset {
        let preset: Preset = name.parse()?;
        return Ok(ComparisonConfig::from_preset(preset));
    }

    if let Some(path) = &cli.config {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        return ComparisonConfig::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()));
    }

    Ok(ComparisonConfig::default())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    let control = load_samples(&cli.control)?;
    let experiment = load_samples(&cli.experiment)?;

    let report = compare_samples(&control, &experiment, &config)
        .context("Failed to compare control and experiment samples")?;

    match cli.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
