//! gec command-line interface

use std::path::Path;

use clap::Parser;
use log::{info, LevelFilter};

use gec::cli::Cli;
use gec::prelude::*;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig::new(&cli.problem_dir);

    let params = Parameters::resolve(
        cli.cli_parameters(),
        cli.parameters_path.as_deref().map(Path::new),
    )?;

    info!("Classifying genes...");
    let tpm = read_tpm_matrix(config.tpm_path())?;
    let (classification, scores) = find_classes(&tpm, &params, !cli.include_no_change)?;
    info!(
        "Done: {} of {} genes classified",
        classification.len(),
        scores.len()
    );

    let options = ComposeOptions {
        write_scores: cli.write_scores,
        legacy_labels: cli.legacy_labels,
    };
    let written = compose_outputs(&config, &classification, &scores, options)?;

    info!("Output files written to:");
    for path in &written {
        info!("\t{}", path.display());
    }

    Ok(())
}
