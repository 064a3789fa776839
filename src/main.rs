//! CLI tool for rendering a text score to a WAV file
//!
//! Usage: wav-maker <input> [-o output.wav]
//!
//! If output is not specified, writes <input>.wav

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use wav_maker::{render, RenderConfig, RenderError};

/// Render a text score to an uncompressed WAV file
#[derive(Parser)]
#[command(name = "wav-maker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the score file
    input: PathBuf,

    /// Output WAV file path (defaults to <input>.wav)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log every parsed and mixed note
    #[arg(short, long)]
    verbose: bool,
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".wav");
    PathBuf::from(name)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli.output.clone().unwrap_or_else(|| default_output(&cli.input));

    let content = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let config = RenderConfig::default();
    println!("Configuration:");
    println!("  Sample rate: {} Hz", config.sample_rate);
    println!("  Bit depth: {} bits", config.bits_per_sample);
    println!("  Base amplitude: {}", config.base_amplitude);
    println!();

    let wav = match render(&content, &config) {
        Ok(wav) => wav,
        Err(RenderError::Parse(e)) => {
            anyhow::bail!("{}: {}", cli.input.display(), e);
        }
        Err(e) => return Err(e.into()),
    };

    fs::write(&output, &wav)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("✓ Generated {} ({} bytes)", output.display(), wav.len());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
