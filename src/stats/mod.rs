//! Per-gene score computation
//!
//! For each gene the engine derives two standardized fold-change scores and
//! one z-score from the four canonical sample groups:
//!
//! - `FC_t1` — case vs control at the first time point
//! - `FC_t2` — case vs control at the second time point
//! - `Z` — difference-of-differences, capturing change in the case/control
//!   gap between time points
//!
//! Each score is a mean difference divided by a pooled standard-error
//! estimate `sqrt(seudovariance + sum(variance/n))`. The pseudo-variance
//! floor keeps denominators away from zero for flat genes.

use ndarray::ArrayView1;
use rayon::prelude::*;

use crate::data::{ReplicateGroups, Slot, TpmMatrix};
use crate::error::Result;
use crate::params::Parameters;

/// The three classification scores for one gene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRow {
    pub fc_t1: f64,
    pub fc_t2: f64,
    pub z: f64,
}

/// Per-gene scores for a whole run, in input gene order
#[derive(Debug, Clone)]
pub struct GeneScores {
    gene_ids: Vec<String>,
    rows: Vec<ScoreRow>,
}

impl GeneScores {
    pub fn new(gene_ids: Vec<String>, rows: Vec<ScoreRow>) -> Self {
        assert_eq!(gene_ids.len(), rows.len());
        Self { gene_ids, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreRow)> {
        self.gene_ids
            .iter()
            .map(|s| s.as_str())
            .zip(self.rows.iter())
    }
}

/// Floor values below `min_tpm` up to `min_tpm`, then log2-transform
///
/// Returns a new matrix; the input is left untouched so raw values stay
/// available to the caller.
pub fn floor_and_log2(tpm: &TpmMatrix, min_tpm: f64) -> TpmMatrix {
    tpm.mapv(|x| x.max(min_tpm).log2())
}

/// Arithmetic mean of one gene's values over a group's columns
fn group_mean(row: ArrayView1<'_, f64>, cols: &[usize]) -> f64 {
    let sum: f64 = cols.iter().map(|&c| row[c]).sum();
    sum / cols.len() as f64
}

/// Sample variance (n-1 denominator) over a group's columns, divided by the
/// replicate count — the variance-of-the-mean estimate
///
/// A single-replicate group has undefined sample variance; it contributes 0,
/// never NaN.
fn group_var_over_n(row: ArrayView1<'_, f64>, cols: &[usize], mean: f64) -> f64 {
    let n = cols.len();
    if n <= 1 {
        return 0.0;
    }
    let ss: f64 = cols.iter().map(|&c| (row[c] - mean).powi(2)).sum();
    ss / (n - 1) as f64 / n as f64
}

/// Compute FC_t1, FC_t2 and Z for every gene
///
/// Applies the floor + log2 pre-transform when the parameters request it,
/// then derives the three scores per gene from the four canonical groups.
/// Output order matches the input gene order regardless of the parallel
/// schedule.
pub fn compute_scores(
    tpm: &TpmMatrix,
    groups: &ReplicateGroups,
    params: &Parameters,
) -> Result<GeneScores> {
    let transformed;
    let table = if params.floor_and_logtransform {
        transformed = floor_and_log2(tpm, params.min_tpm);
        &transformed
    } else {
        tpm
    };

    let wt_t1 = groups.slot_columns(Slot::ControlT1)?;
    let wt_t2 = groups.slot_columns(Slot::ControlT2)?;
    let mt_t1 = groups.slot_columns(Slot::CaseT1)?;
    let mt_t2 = groups.slot_columns(Slot::CaseT2)?;

    let seudovar = params.seudovariance;
    let values = table.values();

    let rows: Vec<ScoreRow> = (0..table.n_genes())
        .into_par_iter()
        .map(|g| {
            let row = values.row(g);

            let m_wt_t1 = group_mean(row, wt_t1);
            let m_wt_t2 = group_mean(row, wt_t2);
            let m_mt_t1 = group_mean(row, mt_t1);
            let m_mt_t2 = group_mean(row, mt_t2);

            let vn_wt_t1 = group_var_over_n(row, wt_t1, m_wt_t1);
            let vn_wt_t2 = group_var_over_n(row, wt_t2, m_wt_t2);
            let vn_mt_t1 = group_var_over_n(row, mt_t1, m_mt_t1);
            let vn_mt_t2 = group_var_over_n(row, mt_t2, m_mt_t2);

            let varsum_z = vn_wt_t1 + vn_wt_t2 + vn_mt_t1 + vn_mt_t2;
            let varsum_fc_t1 = vn_wt_t1 + vn_mt_t1;
            let varsum_fc_t2 = vn_wt_t2 + vn_mt_t2;

            let z_diff = (m_mt_t2 - m_mt_t1) - (m_wt_t2 - m_wt_t1);
            ScoreRow {
                fc_t1: (m_mt_t1 - m_wt_t1) / (seudovar + varsum_fc_t1).sqrt(),
                fc_t2: (m_mt_t2 - m_wt_t2) / (seudovar + varsum_fc_t2).sqrt(),
                z: z_diff / (seudovar + varsum_z).sqrt(),
            }
        })
        .collect();

    log::debug!("Computed scores for {} genes", rows.len());

    Ok(GeneScores::new(tpm.gene_ids().to_vec(), rows))
}
