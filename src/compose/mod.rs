//! Result composition
//!
//! Thin layer that joins optional gene-feature annotations onto the class
//! table and writes the output files for a problem directory. All
//! computation happens before the first write, so a failing run leaves no
//! partial output behind.

use std::path::{Path, PathBuf};

use crate::classify::Classification;
use crate::error::Result;
use crate::io::{read_gene_features, write_gene_attributes, write_scores, GeneFeatures};
use crate::stats::GeneScores;

/// Paths for one classification run
///
/// The problem-directory layout is a convention: inputs under
/// `<problem_dir>/input/`, outputs at the top of `<problem_dir>`. The
/// struct is built once by the caller and passed through explicitly; there
/// is no global path state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    problem_dir: PathBuf,
}

impl RunConfig {
    pub fn new<P: AsRef<Path>>(problem_dir: P) -> Self {
        Self {
            problem_dir: problem_dir.as_ref().to_path_buf(),
        }
    }

    pub fn tpm_path(&self) -> PathBuf {
        self.problem_dir.join("input").join("tpm.csv")
    }

    pub fn gene_features_path(&self) -> PathBuf {
        self.problem_dir.join("input").join("gene_features.csv")
    }

    pub fn gene_attributes_path(&self) -> PathBuf {
        self.problem_dir.join("gene_attributes.csv")
    }

    pub fn scores_path(&self) -> PathBuf {
        self.problem_dir.join("scores.csv")
    }
}

/// Output-composition switches
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions {
    /// Also write the per-gene score table
    pub write_scores: bool,
    /// Use the legacy label vocabulary in output files
    pub legacy_labels: bool,
}

/// Write the output files for a finished run
///
/// Joins `input/gene_features.csv` onto the class table when the file
/// exists, then writes `gene_attributes.csv` and, when requested,
/// `scores.csv`. Returns the paths written.
pub fn compose_outputs(
    config: &RunConfig,
    classification: &Classification,
    scores: &GeneScores,
    options: ComposeOptions,
) -> Result<Vec<PathBuf>> {
    let features: Option<GeneFeatures> = {
        let path = config.gene_features_path();
        if path.exists() {
            let f = read_gene_features(&path)?;
            log::info!("Gene features included ({} annotated genes)", f.len());
            Some(f)
        } else {
            log::info!("Gene feature file not found");
            None
        }
    };

    let mut written = Vec::new();

    let attributes_path = config.gene_attributes_path();
    write_gene_attributes(
        &attributes_path,
        classification,
        features.as_ref(),
        options.legacy_labels,
    )?;
    written.push(attributes_path);

    if options.write_scores {
        let scores_path = config.scores_path();
        write_scores(&scores_path, scores, classification, options.legacy_labels)?;
        written.push(scores_path);
    }

    Ok(written)
}
