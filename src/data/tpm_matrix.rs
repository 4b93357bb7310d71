//! Abundance matrix representation for TPM data

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{GecError, Result};

/// A transcript-abundance matrix
///
/// Rows are genes, columns are sample replicates. Values are raw TPM, or
/// already log2-transformed reals when the caller disables the
/// floor-and-logtransform step. The matrix is never mutated in place; the
/// transform in [`crate::stats`] returns a fresh matrix.
#[derive(Debug, Clone)]
pub struct TpmMatrix {
    /// Abundance values (genes x samples)
    values: Array2<f64>,
    /// Gene identifiers, in input order
    gene_ids: Vec<String>,
    /// Sample column names, e.g. `WT_t1_rep1`
    sample_ids: Vec<String>,
}

impl TpmMatrix {
    /// Create a new abundance matrix from raw data
    pub fn new(
        values: Array2<f64>,
        gene_ids: Vec<String>,
        sample_ids: Vec<String>,
    ) -> Result<Self> {
        let (n_genes, n_samples) = values.dim();

        if gene_ids.len() != n_genes {
            return Err(GecError::DimensionMismatch {
                expected: format!("{} gene IDs", n_genes),
                got: format!("{} gene IDs", gene_ids.len()),
            });
        }

        if sample_ids.len() != n_samples {
            return Err(GecError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        if values.iter().any(|&x| x.is_nan() || x.is_infinite()) {
            return Err(GecError::format("Abundance values must be finite"));
        }

        // Gene ids index the output tables, so they must be unique.
        let mut seen = std::collections::HashSet::with_capacity(gene_ids.len());
        for id in &gene_ids {
            if !seen.insert(id.as_str()) {
                return Err(GecError::format(format!("Duplicate gene ID '{}'", id)));
            }
        }

        Ok(Self {
            values,
            gene_ids,
            sample_ids,
        })
    }

    /// Number of genes (rows)
    pub fn n_genes(&self) -> usize {
        self.values.nrows()
    }

    /// Number of sample columns
    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    /// Abundance values as a view
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Gene identifiers
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    /// Sample column names
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Values for one gene across all samples
    pub fn gene_values(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(gene_idx)
    }

    /// Apply an element-wise transform, producing a new matrix
    pub fn mapv(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            values: self.values.mapv(&f),
            gene_ids: self.gene_ids.clone(),
            sample_ids: self.sample_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matrix_creation() {
        let values = array![[10.0, 20.0, 30.0], [5.0, 15.0, 25.0]];
        let m = TpmMatrix::new(
            values,
            ids(&["gene1", "gene2"]),
            ids(&["WT_t1_rep1", "WT_t1_rep2", "MT_t1_rep1"]),
        )
        .unwrap();
        assert_eq!(m.n_genes(), 2);
        assert_eq!(m.n_samples(), 3);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let values = array![[10.0, 20.0], [5.0, 15.0]];
        let result = TpmMatrix::new(values, ids(&["gene1"]), ids(&["s1", "s2"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_gene_ids_rejected() {
        let values = array![[10.0], [5.0]];
        let result = TpmMatrix::new(values, ids(&["gene1", "gene1"]), ids(&["s1"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let values = array![[f64::NAN, 20.0]];
        let result = TpmMatrix::new(values, ids(&["gene1"]), ids(&["s1", "s2"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_mapv_leaves_original_untouched() {
        let values = array![[1.0, 2.0]];
        let m = TpmMatrix::new(values, ids(&["g"]), ids(&["s1", "s2"])).unwrap();
        let doubled = m.mapv(|x| x * 2.0);
        assert_eq!(m.values()[[0, 0]], 1.0);
        assert_eq!(doubled.values()[[0, 0]], 2.0);
    }
}
