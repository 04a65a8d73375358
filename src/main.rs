//! `showmatch` command-line front end.
//!
//! Compares the rendering stored in one file against the reference text in
//! another, using the same normalization and field rules as the library.
//!
//! Usage:
//!   showmatch actual.txt expected.txt --config showmatch.yaml --rtol 1e-6
//!
//! Exit status: 0 on match, 1 on mismatch, 2 on a usage, I/O or config error.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use showmatch::config::ShowMatchConfig;
use showmatch::{Comparator, FloatRule, normalize};

/// Approximately compare a debug rendering against a reference string
#[derive(Parser, Debug)]
#[command(name = "showmatch", version)]
struct Args {
    /// File holding the actual rendering
    actual: PathBuf,

    /// File holding the expected reference text
    expected: PathBuf,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep bracketed sequences as printed
    #[arg(long)]
    no_simplify: bool,

    /// Relative tolerance for floating-point fields
    #[arg(long)]
    rtol: Option<f64>,

    /// Do not print the mismatch report
    #[arg(long)]
    quiet: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("showmatch: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => ShowMatchConfig::from_file(path)?,
        None => ShowMatchConfig::default(),
    };

    let mut normalize_cfg = config.normalize_config()?;
    if args.no_simplify {
        normalize_cfg = normalize_cfg.without_sequence_simplification();
    }

    let mut compare_cfg = config
        .compare_config()
        .with_raise_on_mismatch(false)
        .with_report_on_mismatch(!args.quiet);
    if let Some(rtol) = args.rtol {
        compare_cfg = compare_cfg.with_float_rule(FloatRule::Relative { rtol });
    }

    let actual = fs::read_to_string(&args.actual)?;
    let expected = fs::read_to_string(&args.expected)?;
    debug!(
        actual = %args.actual.display(),
        expected = %args.expected.display(),
        "cli_compare"
    );

    let form = normalize(&actual, &normalize_cfg)?;
    let matched = Comparator::new(compare_cfg).approx_equal(&form, expected.as_str())?;
    Ok(matched)
}
