use clap::Parser;
use conformance_core::cli::{exit_status, render, run, setup_logging, Cli};
use log::error;
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match render(&report, &cli.format) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Failed to render report: {}", e);
            eprintln!("Error: Failed to render report: {}", e);
            process::exit(1);
        }
    }

    process::exit(exit_status(&report, cli.strict));
}
