//! Decision-tree classification of gene scores
//!
//! Genes are assigned to one of six mutually exclusive classes from their
//! (Z, FC_t1, FC_t2) scores. Rules are evaluated in a fixed order with
//! first-match-wins semantics; the overexpressed and upregulated rules are
//! inclusive at the cutoff, the FC_t1 near-zero band is strict, and the
//! changed_regulation fallback is strict.

use crate::error::Result;
use crate::params::Parameters;
use crate::stats::{GeneScores, ScoreRow};

/// Expression-change category for one gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneClass {
    /// Both contrasts strongly positive
    ControlOverexpressed,
    /// Both contrasts strongly negative
    CaseOverexpressed,
    /// FC_t1 near zero, FC_t2 and Z above cutoff
    ControlUpregulated,
    /// FC_t1 near zero, FC_t2 and Z below negative cutoff
    CaseUpregulated,
    /// |Z| above cutoff without a directional fold-change pattern
    ChangedRegulation,
    NoChange,
}

impl GeneClass {
    /// Canonical label written to output tables
    pub fn label(&self) -> &'static str {
        match self {
            GeneClass::ControlOverexpressed => "control_overexpressed",
            GeneClass::CaseOverexpressed => "case_overexpressed",
            GeneClass::ControlUpregulated => "control_upregulated",
            GeneClass::CaseUpregulated => "case_upregulated",
            GeneClass::ChangedRegulation => "changed_regulation",
            GeneClass::NoChange => "no_change",
        }
    }

    /// Legacy label vocabulary from earlier tool generations, kept as a
    /// display-only relabeling option
    pub fn legacy_label(&self) -> &'static str {
        match self {
            GeneClass::ControlOverexpressed => "highly_expressed",
            GeneClass::CaseOverexpressed => "lowly_expressed",
            GeneClass::ControlUpregulated => "upregulated",
            GeneClass::CaseUpregulated => "downregulated",
            GeneClass::ChangedRegulation => "changed_regulation",
            GeneClass::NoChange => "no_change",
        }
    }
}

/// Classify a single score row — pure function of scores and cutoffs
pub fn classify_row(row: &ScoreRow, z_cutoff: f64, fc_cutoff: f64) -> GeneClass {
    let ScoreRow { fc_t1, fc_t2, z } = *row;
    let in_band = -fc_cutoff < fc_t1 && fc_t1 < fc_cutoff;

    if fc_t1 >= fc_cutoff && fc_t2 >= fc_cutoff {
        GeneClass::ControlOverexpressed
    } else if fc_t1 <= -fc_cutoff && fc_t2 <= -fc_cutoff {
        GeneClass::CaseOverexpressed
    } else if in_band && fc_t2 >= fc_cutoff && z >= z_cutoff {
        GeneClass::ControlUpregulated
    } else if in_band && fc_t2 <= -fc_cutoff && z <= -z_cutoff {
        GeneClass::CaseUpregulated
    } else if z.abs() > z_cutoff {
        GeneClass::ChangedRegulation
    } else {
        GeneClass::NoChange
    }
}

/// Per-gene class assignments for a run, in input gene order
#[derive(Debug, Clone)]
pub struct Classification {
    gene_ids: Vec<String>,
    classes: Vec<GeneClass>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    pub fn classes(&self) -> &[GeneClass] {
        &self.classes
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, GeneClass)> + '_ {
        self.gene_ids
            .iter()
            .map(|s| s.as_str())
            .zip(self.classes.iter().copied())
    }

    /// Class for a gene, if it was classified
    pub fn class_of(&self, gene_id: &str) -> Option<GeneClass> {
        self.gene_ids
            .iter()
            .position(|g| g == gene_id)
            .map(|i| self.classes[i])
    }

    /// Drop all `no_change` genes, preserving order
    pub fn without_no_change(self) -> Self {
        let (gene_ids, classes) = self
            .gene_ids
            .into_iter()
            .zip(self.classes)
            .filter(|(_, c)| *c != GeneClass::NoChange)
            .unzip();
        Self { gene_ids, classes }
    }
}

/// Classify every gene in a score table
pub fn classify(scores: &GeneScores, params: &Parameters) -> Result<Classification> {
    let classes: Vec<GeneClass> = scores
        .rows()
        .iter()
        .map(|row| classify_row(row, params.z_cutoff, params.fc_cutoff))
        .collect();

    log::debug!("Classified {} genes", classes.len());

    Ok(Classification {
        gene_ids: scores.gene_ids().to_vec(),
        classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fc_t1: f64, fc_t2: f64, z: f64) -> ScoreRow {
        ScoreRow { fc_t1, fc_t2, z }
    }

    const Z_CUT: f64 = 1.5;
    const FC_CUT: f64 = 1.0;

    fn class_of(fc_t1: f64, fc_t2: f64, z: f64) -> GeneClass {
        classify_row(&row(fc_t1, fc_t2, z), Z_CUT, FC_CUT)
    }

    #[test]
    fn test_control_overexpressed() {
        assert_eq!(class_of(2.0, 2.0, 0.0), GeneClass::ControlOverexpressed);
    }

    #[test]
    fn test_case_overexpressed() {
        assert_eq!(class_of(-2.0, -2.0, 0.0), GeneClass::CaseOverexpressed);
    }

    #[test]
    fn test_control_upregulated() {
        assert_eq!(class_of(0.0, 6.0, 6.0), GeneClass::ControlUpregulated);
    }

    #[test]
    fn test_case_upregulated() {
        assert_eq!(class_of(0.0, -6.0, -6.0), GeneClass::CaseUpregulated);
    }

    #[test]
    fn test_changed_regulation_fallback() {
        // FC_t1 outside the band blocks the upregulated rules
        assert_eq!(class_of(-1.5, 2.0, 3.0), GeneClass::ChangedRegulation);
        // High |Z| without a fold-change pattern
        assert_eq!(class_of(0.0, 0.0, 2.0), GeneClass::ChangedRegulation);
        assert_eq!(class_of(0.0, 0.0, -2.0), GeneClass::ChangedRegulation);
    }

    #[test]
    fn test_no_change() {
        assert_eq!(class_of(0.0, 0.0, 0.0), GeneClass::NoChange);
    }

    #[test]
    fn test_inclusive_boundary_at_fc_cutoff() {
        // Exactly at the cutoff on both contrasts -> overexpressed
        assert_eq!(
            class_of(FC_CUT, FC_CUT, 0.0),
            GeneClass::ControlOverexpressed
        );
        // Just under the cutoff on FC_t1 falls to a different branch
        let eps = 1e-9;
        assert_ne!(
            class_of(FC_CUT - eps, FC_CUT, 2.0),
            GeneClass::ControlOverexpressed
        );
        assert_eq!(
            class_of(FC_CUT - eps, FC_CUT, 2.0),
            GeneClass::ControlUpregulated
        );
    }

    #[test]
    fn test_fallback_boundary_is_strict() {
        // |Z| == z_cutoff exactly does not trigger changed_regulation
        assert_eq!(class_of(0.0, 0.0, Z_CUT), GeneClass::NoChange);
        assert_eq!(class_of(0.0, 0.0, -Z_CUT), GeneClass::NoChange);
    }

    #[test]
    fn test_upregulated_boundary_is_inclusive() {
        assert_eq!(class_of(0.0, FC_CUT, Z_CUT), GeneClass::ControlUpregulated);
        assert_eq!(class_of(0.0, -FC_CUT, -Z_CUT), GeneClass::CaseUpregulated);
    }

    #[test]
    fn test_partition_is_exhaustive_and_deterministic() {
        // Every grid point gets exactly one class, and re-running yields
        // the same label.
        let grid = [-3.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 3.0];
        for &fc_t1 in &grid {
            for &fc_t2 in &grid {
                for &z in &grid {
                    let a = class_of(fc_t1, fc_t2, z);
                    let b = class_of(fc_t1, fc_t2, z);
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_without_no_change() {
        let scores = crate::stats::GeneScores::new(
            vec!["a".to_string(), "b".to_string()],
            vec![row(2.0, 2.0, 0.0), row(0.0, 0.0, 0.0)],
        );
        let result = classify(&scores, &Parameters::default()).unwrap();
        assert_eq!(result.len(), 2);
        let filtered = result.without_no_change();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.gene_ids(), &["a".to_string()]);
        assert_eq!(filtered.class_of("a"), Some(GeneClass::ControlOverexpressed));
        assert_eq!(filtered.class_of("b"), None);
    }

    #[test]
    fn test_label_vocabularies() {
        assert_eq!(GeneClass::ControlOverexpressed.label(), "control_overexpressed");
        assert_eq!(GeneClass::ControlOverexpressed.legacy_label(), "highly_expressed");
        assert_eq!(GeneClass::CaseUpregulated.legacy_label(), "downregulated");
        assert_eq!(GeneClass::NoChange.legacy_label(), "no_change");
    }
}
