//! Writers for classification and score tables

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::classify::{Classification, GeneClass};
use crate::error::{GecError, Result};
use crate::io::csv::GeneFeatures;
use crate::stats::{GeneScores, ScoreRow};

fn label_for(class: GeneClass, legacy: bool) -> &'static str {
    if legacy {
        class.legacy_label()
    } else {
        class.label()
    }
}

/// Write the classified gene table, optionally joined with feature columns
///
/// Output columns: `Gene,Class[,<feature columns>]`. Genes without a
/// feature row get empty feature fields. Feature values are free-form text
/// and may contain delimiters, so this table goes through `csv::Writer`,
/// which quotes fields as needed.
pub fn write_gene_attributes<P: AsRef<Path>>(
    path: P,
    classification: &Classification,
    features: Option<&GeneFeatures>,
    legacy_labels: bool,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["Gene".to_string(), "Class".to_string()];
    if let Some(f) = features {
        header.extend(f.columns().iter().cloned());
    }
    writer.write_record(&header)?;

    for (gene_id, class) in classification.iter() {
        let mut record = vec![
            gene_id.to_string(),
            label_for(class, legacy_labels).to_string(),
        ];
        if let Some(f) = features {
            match f.get(gene_id) {
                Some(values) => record.extend(values.iter().cloned()),
                None => record.extend(vec![String::new(); f.columns().len()]),
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the per-gene score table
///
/// Output columns: `Gene,FC_t1,FC_t2,Z,Class`. Every scored gene appears,
/// including genes the no_change filter dropped from the class table; those
/// are written with class `no_change`. Floats are written in Rust's
/// shortest round-trippable form.
pub fn write_scores<P: AsRef<Path>>(
    path: P,
    scores: &GeneScores,
    classification: &Classification,
    legacy_labels: bool,
) -> Result<()> {
    let class_by_gene: HashMap<&str, GeneClass> = classification.iter().collect();

    let mut file = File::create(path)?;
    writeln!(file, "Gene,FC_t1,FC_t2,Z,Class")?;
    for (gene_id, row) in scores.iter() {
        let class = class_by_gene
            .get(gene_id)
            .copied()
            .unwrap_or(GeneClass::NoChange);
        writeln!(
            file,
            "{},{},{},{},{}",
            gene_id,
            row.fc_t1,
            row.fc_t2,
            row.z,
            label_for(class, legacy_labels)
        )?;
    }

    Ok(())
}

/// Read a scores CSV back into a score table
///
/// Accepts the output of [`write_scores`]; the trailing `Class` column is
/// optional and ignored.
pub fn read_scores<P: AsRef<Path>>(path: P) -> Result<GeneScores> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| GecError::format("Empty scores file"))??;
    let cols: Vec<&str> = header.split(',').collect();
    if cols.len() < 4 || cols[0] != "Gene" || cols[1] != "FC_t1" || cols[2] != "FC_t2" || cols[3] != "Z" {
        return Err(GecError::format(format!(
            "Unexpected scores header '{}'",
            header
        )));
    }

    let mut gene_ids = Vec::new();
    let mut rows = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 4 {
            return Err(GecError::format(format!("Malformed scores row '{}'", line)));
        }
        let parse = |s: &str, col: &str| -> Result<f64> {
            s.parse::<f64>().map_err(|_| {
                GecError::format(format!("Invalid {} value '{}' for gene '{}'", col, s, fields[0]))
            })
        };
        gene_ids.push(fields[0].to_string());
        rows.push(ScoreRow {
            fc_t1: parse(fields[1], "FC_t1")?,
            fc_t2: parse(fields[2], "FC_t2")?,
            z: parse(fields[3], "Z")?,
        });
    }

    Ok(GeneScores::new(gene_ids, rows))
}
