pub mod input;
pub mod report;

use crate::cli::input::load_context;
use crate::cli::report::TextReport;
use crate::criteria_set::{BuiltinCriteria, CriteriaSet};
use crate::error::Result;
use crate::types::{ConformanceReport, EvaluatorConfig, TimepointKind};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

/// Exit status under `--strict` when any rule fails
pub const EXIT_NONCONFORMANT: i32 = 2;

/// Command-line arguments for conformance
#[derive(Parser, Debug)]
#[command(name = "conformance")]
#[command(about = "Evaluate lesion measurements against trial conformance criteria")]
#[command(version)]
pub struct Cli {
    /// Path to the measurement context (JSON)
    #[arg(value_name = "CONTEXT")]
    pub context: PathBuf,

    /// Criteria set document (JSON); overrides --preset
    #[arg(short, long, value_name = "FILE")]
    pub criteria: Option<PathBuf>,

    /// Built-in criteria set
    #[arg(short, long, default_value = "recist")]
    pub preset: PresetArg,

    /// Timepoint whose rules are evaluated
    #[arg(short, long, default_value = "baseline")]
    pub timepoint: TimepointArg,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only report rules that did not pass
    #[arg(long)]
    pub failures_only: bool,

    /// Exit with status 2 when any rule fails
    #[arg(long)]
    pub strict: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Built-in criteria sets
#[derive(Debug, Clone, ValueEnum)]
pub enum PresetArg {
    /// RECIST 1.1
    Recist,
    /// Immune-related response criteria
    Irrc,
}

impl From<PresetArg> for BuiltinCriteria {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Recist => BuiltinCriteria::Recist,
            PresetArg::Irrc => BuiltinCriteria::Irrc,
        }
    }
}

/// Timepoint selection
#[derive(Debug, Clone, ValueEnum)]
pub enum TimepointArg {
    Baseline,
    Followup,
}

impl From<TimepointArg> for TimepointKind {
    fn from(arg: TimepointArg) -> Self {
        match arg {
            TimepointArg::Baseline => TimepointKind::Baseline,
            TimepointArg::Followup => TimepointKind::Followup,
        }
    }
}

/// Loads the criteria and measurements named on the command line and
/// evaluates the selected timepoint
pub fn run(cli: &Cli) -> Result<ConformanceReport> {
    let criteria = match &cli.criteria {
        Some(path) => {
            info!("Loading criteria from {}", path.display());
            CriteriaSet::from_file(path)?
        }
        None => {
            let builtin = BuiltinCriteria::from(cli.preset.clone());
            info!("Using built-in criteria: {}", builtin);
            CriteriaSet::builtin(builtin)?
        }
    };

    info!("Loading measurements from {}", cli.context.display());
    let context = load_context(&cli.context)?;

    let timepoint = TimepointKind::from(cli.timepoint.clone());
    let config = EvaluatorConfig::default().include_passed(!cli.failures_only);

    criteria.evaluate(timepoint, &context, config)
}

/// Renders a report in the requested output format
pub fn render(report: &ConformanceReport, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(TextReport::new(report).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Process exit status of a completed evaluation
pub fn exit_status(report: &ConformanceReport, strict: bool) -> i32 {
    if strict && !report.passed() {
        EXIT_NONCONFORMANT
    } else {
        0
    }
}

/// Initialises env_logger, honouring RUST_LOG
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
