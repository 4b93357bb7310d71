//! Command-line interface for gec

use clap::Parser;

use crate::params::Parameters;

#[derive(Parser)]
#[command(name = "gec")]
#[command(version)]
#[command(about = "Gene Expression Classifier (GEC)")]
#[command(
    long_about = "Gene Expression Classifier (GEC)\n\n\
        Classifies genes into expression-change categories from replicate TPM\n\
        measurements across two strains (WT = control, MT = case) and two time\n\
        points. Reads <PROBLEM_DIR>/input/tpm.csv, writes gene_attributes.csv\n\
        (and optionally scores.csv) into the problem directory.",
    after_long_help = "\
Examples:
  # Classify with default parameters
  gec path/to/problem

  # Custom cutoffs, keep no_change genes, write the score table
  gec path/to/problem --z-cutoff 2.0 --fc-cutoff 1.5 \\
    --include-no-change --write-scores

  # Parameters from a file (overrides all command-line parameter values)
  gec path/to/problem -p parameters.csv"
)]
pub struct Cli {
    /// Path to the problem directory (expects input/tpm.csv inside)
    pub problem_dir: String,

    /// Path to a .csv parameter file
    #[arg(short = 'p', long,
        long_help = "Path to a .csv parameter file with columns param_id,value.\n\
            When supplied, the file replaces ALL command-line parameter values;\n\
            there is no per-key merge.")]
    pub parameters_path: Option<String>,

    /// Write fold changes and Z-scores to scores.csv in the problem directory
    #[arg(long)]
    pub write_scores: bool,

    /// Keep genes classified as no_change in the output
    #[arg(long)]
    pub include_no_change: bool,

    /// Use the legacy label vocabulary (highly_expressed, upregulated, ...)
    #[arg(long)]
    pub legacy_labels: bool,

    /// Z-score decision threshold [default: 1.5]
    #[arg(long, default_value = "1.5")]
    pub z_cutoff: f64,

    /// Fold-change-score decision threshold [default: 1]
    #[arg(long, default_value = "1")]
    pub fc_cutoff: f64,

    /// Pseudo-variance added to variance sums before normalization [default: 0.25]
    #[arg(long, default_value = "0.25")]
    pub seudovariance: f64,

    /// Floor TPM values and log2-transform before computing statistics [default: true]
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set,
        long_help = "Floor TPM values at --min-tpm and log2-transform the table\n\
            before computing statistics. Set to false when the input table is\n\
            already log2-transformed.")]
    pub floor_and_logtransform: bool,

    /// Floor value; any TPM below this is raised to it [default: 5]
    #[arg(long, default_value = "5")]
    pub min_tpm: f64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line parameter values, before file precedence is applied
    pub fn cli_parameters(&self) -> Parameters {
        Parameters {
            seudovariance: self.seudovariance,
            z_cutoff: self.z_cutoff,
            fc_cutoff: self.fc_cutoff,
            floor_and_logtransform: self.floor_and_logtransform,
            min_tpm: self.min_tpm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_historical_values() {
        let cli = Cli::parse_from(["gec", "problem"]);
        assert_eq!(cli.cli_parameters(), Parameters::default());
        assert!(!cli.write_scores);
        assert!(!cli.include_no_change);
    }

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::parse_from([
            "gec",
            "problem",
            "--z-cutoff",
            "2.0",
            "--floor-and-logtransform",
            "false",
            "--write-scores",
        ]);
        let params = cli.cli_parameters();
        assert_eq!(params.z_cutoff, 2.0);
        assert!(!params.floor_and_logtransform);
        assert!(cli.write_scores);
    }
}
