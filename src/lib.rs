//! GEC: gene expression classification from replicate TPM tables
//!
//! Classifies genes into expression-change categories from replicate
//! transcript-abundance measurements across two strains (WT = control,
//! MT = case) and two time points. The pipeline is a pure function of the
//! abundance table and the parameter set: parse, compute per-gene scores
//! (FC_t1, FC_t2, Z), classify through a fixed decision tree, compose
//! output tables.
//!
//! # Example
//!
//! ```ignore
//! use gec::prelude::*;
//!
//! let tpm = read_tpm_matrix("input/tpm.csv")?;
//! let (classification, scores) = find_classes(&tpm, &Parameters::default(), true)?;
//! for (gene, class) in classification.iter() {
//!     println!("{}\t{}", gene, class.label());
//! }
//! ```

pub mod classify;
pub mod cli;
pub mod compose;
pub mod data;
pub mod error;
pub mod io;
pub mod params;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classify::{classify, classify_row, Classification, GeneClass};
    pub use crate::compose::{compose_outputs, ComposeOptions, RunConfig};
    pub use crate::data::{ReplicateGroups, Slot, TpmMatrix};
    pub use crate::error::{GecError, Result};
    pub use crate::find_classes;
    pub use crate::io::{read_gene_features, read_scores, read_tpm_matrix, write_gene_attributes, write_scores};
    pub use crate::params::Parameters;
    pub use crate::stats::{compute_scores, floor_and_log2, GeneScores, ScoreRow};
}

use prelude::*;

/// Run the core classification pipeline on a loaded abundance table
///
/// Discovers replicate groups from the sample columns, computes the three
/// per-gene scores and assigns each gene a class. When `remove_no_change`
/// is set, genes classified as `no_change` are dropped from the class table
/// (the score table always covers every gene).
pub fn find_classes(
    tpm: &TpmMatrix,
    params: &Parameters,
    remove_no_change: bool,
) -> Result<(Classification, GeneScores)> {
    let groups = ReplicateGroups::discover(tpm.sample_ids())?;
    let scores = compute_scores(tpm, &groups, params)?;
    let classification = classify(&scores, params)?;
    let classification = if remove_no_change {
        classification.without_no_change()
    } else {
        classification
    };
    Ok((classification, scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_full_pipeline() {
        // 4 groups x 2 replicates; raw values chosen so the floor+log2
        // transform leaves clean powers of two.
        let tpm = TpmMatrix::new(
            array![
                // flat everywhere -> no_change
                [32.0, 32.0, 32.0, 32.0, 32.0, 32.0, 32.0, 32.0],
                // MT above WT at both time points -> control_overexpressed
                [8.0, 8.0, 8.0, 8.0, 512.0, 512.0, 512.0, 512.0],
                // MT jumps at t2 only -> control_upregulated
                [32.0, 32.0, 32.0, 32.0, 32.0, 32.0, 512.0, 512.0],
            ],
            vec![
                "gene_flat".to_string(),
                "gene_high".to_string(),
                "gene_up".to_string(),
            ],
            vec![
                "WT_t1_rep1".to_string(),
                "WT_t1_rep2".to_string(),
                "WT_t2_rep1".to_string(),
                "WT_t2_rep2".to_string(),
                "MT_t1_rep1".to_string(),
                "MT_t1_rep2".to_string(),
                "MT_t2_rep1".to_string(),
                "MT_t2_rep2".to_string(),
            ],
        )
        .unwrap();

        let params = Parameters::default();
        let (classification, scores) = find_classes(&tpm, &params, true).unwrap();

        // Scores cover all genes; the class table drops the flat one
        assert_eq!(scores.len(), 3);
        assert_eq!(classification.len(), 2);
        assert_eq!(
            classification.class_of("gene_high"),
            Some(GeneClass::ControlOverexpressed)
        );
        assert_eq!(
            classification.class_of("gene_up"),
            Some(GeneClass::ControlUpregulated)
        );
        assert_eq!(classification.class_of("gene_flat"), None);

        // gene_high: log2 means are WT = 3, MT = 9 at both time points,
        // all variances zero -> FC = 6/sqrt(0.25) = 12, Z = 0
        let r = scores.rows()[1];
        assert!((r.fc_t1 - 12.0).abs() < 1e-9);
        assert!((r.fc_t2 - 12.0).abs() < 1e-9);
        assert!(r.z.abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_keeps_no_change_when_asked() {
        let tpm = TpmMatrix::new(
            array![[32.0, 32.0, 32.0, 32.0]],
            vec!["gene_flat".to_string()],
            vec![
                "WT_t1_rep1".to_string(),
                "WT_t2_rep1".to_string(),
                "MT_t1_rep1".to_string(),
                "MT_t2_rep1".to_string(),
            ],
        )
        .unwrap();

        let (classification, _) = find_classes(&tpm, &Parameters::default(), false).unwrap();
        assert_eq!(classification.class_of("gene_flat"), Some(GeneClass::NoChange));
    }
}
