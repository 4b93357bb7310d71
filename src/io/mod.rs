//! CSV reading and writing for abundance tables and result files

mod csv;
mod results;

pub use self::csv::{read_gene_features, read_tpm_matrix, GeneFeatures};
pub use self::results::{read_scores, write_gene_attributes, write_scores};
