//! Data structures for replicate-structured TPM tables

mod groups;
mod tpm_matrix;

pub use groups::{ReplicateGroups, Slot};
pub use tpm_matrix::TpmMatrix;
