//! mem-run: 1D Mechanical Earth Model from the command line
//!
//! # Usage
//!
//! ```bash
//! # Single well, results to stdout
//! mem-run --input well.json
//!
//! # Several wells (JSON array) in parallel, results to a file
//! mem-run --input field.json --output results.json
//!
//! # Dump the built-in constants as a starting mem_config.toml
//! mem-run --print-default-config > mem_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `MEM_CONFIG`: Path to a TOML config (default: ./mem_config.toml, then built-ins)
//! - `RUST_LOG`: Logging level (default: info)

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use mem_pipeline::{MemConfig, MemInputs, MemPipeline, RunResult};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "mem-run")]
#[command(about = "Compute a 1D Mechanical Earth Model from well logs")]
#[command(version)]
struct CliArgs {
    /// Input JSON: one well object, or an array of wells for a batch run
    #[arg(short, long, required_unless_present = "print_default_config")]
    input: Option<PathBuf>,

    /// Write the result JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config TOML (overrides MEM_CONFIG and ./mem_config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "MEM_JSON_LOGS")]
    json_logs: bool,

    /// Print the built-in configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Accepts either a single well or a batch.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Batch(Vec<MemInputs>),
    Single(Box<MemInputs>),
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Returns `Ok(false)` when at least one well failed.
fn run(args: &CliArgs) -> Result<bool> {
    if args.print_default_config {
        print!("{}", MemConfig::default().to_toml()?);
        return Ok(true);
    }

    let config = match &args.config {
        Some(path) => MemConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MemConfig::load(),
    };
    let pipeline = MemPipeline::new(config);

    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("--input is required");
    };
    let document = read_input(input)?;

    let (json, ok) = match document {
        InputDocument::Single(inputs) => {
            let result = pipeline.run(&inputs, &mut |percent: u8, message: &str| {
                info!(percent, "{}", message);
            });
            log_result(0, &result);
            let ok = result.success;
            (serde_json::to_string_pretty(&result)?, ok)
        }
        InputDocument::Batch(wells) => {
            let results = pipeline.run_batch(&wells);
            for (i, result) in results.iter().enumerate() {
                log_result(i, result);
            }
            let failed = results.iter().filter(|r| !r.success).count();
            if failed > 0 {
                warn!(failed, total = results.len(), "Some wells failed");
            }
            (serde_json::to_string_pretty(&results)?, failed == 0)
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Results written");
        }
        None => println!("{json}"),
    }

    Ok(ok)
}

fn read_input(path: &Path) -> Result<InputDocument> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid MEM input JSON in {}", path.display()))
}

fn log_result(well: usize, result: &RunResult) {
    match (&result.results, &result.quality_report) {
        (Some(profile), Some(report)) => {
            let ppg = profile.gradients_ppg();
            info!(
                well,
                score = report.score,
                sv_ppg = format_args!("{:.2}", ppg.sv),
                pp_ppg = format_args!("{:.2}", ppg.pp),
                fg_ppg = format_args!("{:.2}", ppg.fg),
                "Well complete"
            );
            for w in &report.warnings {
                warn!(well, category = ?w.category, "{}", w.message);
            }
        }
        _ => {
            error!(
                well,
                "Well failed: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}
