//! Readers for the TPM table and the optional gene-feature annotations

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;

use crate::data::TpmMatrix;
use crate::error::{GecError, Result};

/// Strip surrounding quotes from a string
fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    // A lone quote is not a quoted pair; leave it for the value parser to reject.
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Read a TPM matrix from a CSV file
///
/// Expected format: header row with first column labeled exactly `Gene`,
/// remaining columns named `<group_id>_rep<digit>`. Both comma and tab
/// delimiters are accepted (auto-detected).
///
/// TODO: detect tables that are already log2-transformed; for now the
/// caller signals this through the floor_and_logtransform parameter.
pub fn read_tpm_matrix<P: AsRef<Path>>(path: P) -> Result<TpmMatrix> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| GecError::format("Empty TPM file"))??;

    let delimiter = if header_line.contains('\t') { '\t' } else { ',' };

    let header: Vec<&str> = header_line.split(delimiter).collect();
    if header.len() < 2 {
        return Err(GecError::format("Not enough columns in TPM header"));
    }

    let gene_col = strip_quotes(header[0]);
    if gene_col != "Gene" {
        return Err(GecError::format(format!(
            "First column of TPM table must be labeled \"Gene\", got \"{}\"",
            gene_col
        )));
    }

    let sample_ids: Vec<String> = header[1..].iter().map(|s| strip_quotes(s)).collect();
    let n_samples = sample_ids.len();

    let mut gene_ids: Vec<String> = Vec::new();
    let mut data: Vec<f64> = Vec::new();

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != n_samples + 1 {
            return Err(GecError::format(format!(
                "Row for '{}' has {} columns, expected {}",
                strip_quotes(fields[0]),
                fields.len(),
                n_samples + 1
            )));
        }

        let gene_id = strip_quotes(fields[0]);
        for raw in &fields[1..] {
            let val = strip_quotes(raw);
            let parsed = val.parse::<f64>().map_err(|_| {
                GecError::format(format!(
                    "Invalid abundance value '{}' for gene '{}'",
                    val, gene_id
                ))
            })?;
            data.push(parsed);
        }
        gene_ids.push(gene_id);
    }

    if gene_ids.is_empty() {
        return Err(GecError::format("No genes found in TPM table"));
    }

    let n_genes = gene_ids.len();
    let values = Array2::from_shape_vec((n_genes, n_samples), data)
        .map_err(|e| GecError::format(format!("Malformed TPM table: {}", e)))?;

    TpmMatrix::new(values, gene_ids, sample_ids)
}

/// Optional per-gene feature annotations, joined onto the class table
#[derive(Debug, Clone)]
pub struct GeneFeatures {
    /// Feature column names (without the leading `Gene` column)
    columns: Vec<String>,
    /// gene id -> feature values, one per column
    rows: HashMap<String, Vec<String>>,
}

impl GeneFeatures {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Feature values for one gene, if annotated
    pub fn get(&self, gene_id: &str) -> Option<&[String]> {
        self.rows.get(gene_id).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read gene feature annotations from a CSV file
///
/// First column must be `Gene`; remaining columns are free-form feature
/// values carried through to the output unchanged.
pub fn read_gene_features<P: AsRef<Path>>(path: P) -> Result<GeneFeatures> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let headers = reader.headers()?.clone();
    let mut iter = headers.iter();
    match iter.next() {
        Some("Gene") => {}
        other => {
            return Err(GecError::format(format!(
                "First column of gene feature table must be labeled \"Gene\", got {:?}",
                other.unwrap_or("")
            )))
        }
    }
    let columns: Vec<String> = iter.map(|s| s.to_string()).collect();

    let mut rows = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let gene_id = fields
            .next()
            .ok_or_else(|| GecError::format("Empty row in gene feature table"))?
            .to_string();
        rows.insert(gene_id, fields.map(|s| s.to_string()).collect());
    }

    Ok(GeneFeatures { columns, rows })
}
