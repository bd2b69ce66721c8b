use clap::Parser;
use conformance_core::cli::setup_logging;
use conformance_core::{CriteriaSet, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process;

/// CLI tool for validating criteria set documents
#[derive(Parser, Debug)]
#[command(name = "criteriacheck")]
#[command(about = "Validate conformance criteria documents against the rule schemas")]
#[command(version)]
struct Cli {
    /// Criteria set documents (JSON)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut invalid = 0;
    for path in &cli.files {
        match check_file(path) {
            Ok(summary) => println!("{}: ok ({})", path.display(), summary),
            Err(e) => {
                warn!("Rejected {}: {}", path.display(), e);
                println!("{}: invalid: {}", path.display(), e);
                invalid += 1;
            }
        }
    }

    info!("Checked {} file(s), {} invalid", cli.files.len(), invalid);

    if invalid > 0 {
        process::exit(1);
    }
}

/// Loads and validates one document, returning a short summary
fn check_file(path: &Path) -> Result<String> {
    let set = CriteriaSet::from_file(path)?;
    set.validate()?;

    Ok(format!(
        "{}: {} both, {} baseline, {} followup",
        set.name,
        set.both.len(),
        set.baseline.len(),
        set.followup.len()
    ))
}
