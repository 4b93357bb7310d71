//! Classification parameter resolution
//!
//! The five required parameters come either from the command line or from a
//! side-loaded `param_id,value` CSV. When a parameter file is supplied it
//! replaces the command-line values entirely; there is no per-key merge.
//! This all-or-nothing precedence is a deliberate carry-over from earlier
//! generations of the tool.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GecError, Result};

/// Resolved classification parameters
///
/// All five fields are required; resolution fails with a config error if
/// any is absent or malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Pseudo-variance floor added to each variance sum before the square
    /// root. Must be > 0 so zero-variance genes keep finite scores.
    pub seudovariance: f64,
    /// Z-score decision threshold
    pub z_cutoff: f64,
    /// Fold-change-score decision threshold
    pub fc_cutoff: f64,
    /// Gates the floor + log2 pre-transform of the abundance table
    pub floor_and_logtransform: bool,
    /// Floor value; only meaningful when `floor_and_logtransform` is set
    pub min_tpm: f64,
}

impl Default for Parameters {
    /// Defaults matching the historical command-line defaults
    fn default() -> Self {
        Self {
            seudovariance: 0.25,
            z_cutoff: 1.5,
            fc_cutoff: 1.0,
            floor_and_logtransform: true,
            min_tpm: 5.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParamRecord {
    param_id: String,
    value: String,
}

fn require_f64(map: &HashMap<String, String>, key: &str) -> Result<f64> {
    let raw = map
        .get(key)
        .ok_or_else(|| GecError::config(format!("Missing required parameter '{}'", key)))?;
    raw.trim().parse::<f64>().map_err(|_| {
        GecError::config(format!(
            "Parameter '{}' must be numeric, got '{}'",
            key, raw
        ))
    })
}

fn require_bool(map: &HashMap<String, String>, key: &str) -> Result<bool> {
    let raw = map
        .get(key)
        .ok_or_else(|| GecError::config(format!("Missing required parameter '{}'", key)))?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(GecError::config(format!(
            "Parameter '{}' must be 'true' or 'false', got '{}'",
            key, other
        ))),
    }
}

impl Parameters {
    /// Build from raw key/value pairs, validating the full vocabulary
    pub fn from_pairs(map: &HashMap<String, String>) -> Result<Self> {
        let params = Self {
            seudovariance: require_f64(map, "seudovariance")?,
            z_cutoff: require_f64(map, "z_cutoff")?,
            fc_cutoff: require_f64(map, "fc_cutoff")?,
            floor_and_logtransform: require_bool(map, "floor_and_logtransform")?,
            min_tpm: require_f64(map, "min_tpm")?,
        };
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a `param_id,value` CSV file
    ///
    /// Unknown keys are ignored; the file may carry parameters for other
    /// tools in the same pipeline.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut map = HashMap::new();
        for record in reader.deserialize() {
            let record: ParamRecord = record?;
            map.insert(record.param_id, record.value);
        }
        log::debug!("Loaded {} parameter rows from file", map.len());
        Self::from_pairs(&map)
    }

    fn validate(&self) -> Result<()> {
        if self.seudovariance <= 0.0 {
            return Err(GecError::config(format!(
                "Parameter 'seudovariance' must be > 0, got {}",
                self.seudovariance
            )));
        }
        if self.z_cutoff <= 0.0 {
            return Err(GecError::config(format!(
                "Parameter 'z_cutoff' must be > 0, got {}",
                self.z_cutoff
            )));
        }
        if self.fc_cutoff <= 0.0 {
            return Err(GecError::config(format!(
                "Parameter 'fc_cutoff' must be > 0, got {}",
                self.fc_cutoff
            )));
        }
        Ok(())
    }

    /// Resolve final parameters from command-line values and an optional
    /// parameter file. The file, when given, wins wholesale.
    pub fn resolve(cli_params: Parameters, file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => {
                log::info!(
                    "Parameter file {} supplied; command-line parameter values are ignored",
                    path.display()
                );
                Self::from_file(path)
            }
            None => {
                cli_params.validate()?;
                Ok(cli_params)
            }
        }
    }
}
