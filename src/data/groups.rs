//! Replicate group discovery from sample column names

use std::collections::BTreeMap;

use crate::error::{GecError, Result};

/// The four canonical sample groups of the fixed experimental design
///
/// Control = wild type (WT), case = mutant (MT), each measured at two
/// time points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ControlT1,
    ControlT2,
    CaseT1,
    CaseT2,
}

impl Slot {
    /// Group identifier as it appears in sample column names
    pub fn group_id(&self) -> &'static str {
        match self {
            Slot::ControlT1 => "WT_t1",
            Slot::ControlT2 => "WT_t2",
            Slot::CaseT1 => "MT_t1",
            Slot::CaseT2 => "MT_t2",
        }
    }

    pub const ALL: [Slot; 4] = [Slot::ControlT1, Slot::ControlT2, Slot::CaseT1, Slot::CaseT2];
}

/// Mapping from sample-group identifier to the columns belonging to it
///
/// Built once from the table header and read-only afterward. Group ids are
/// the column names with their trailing `_rep<digit>` suffix removed; a
/// column without such a suffix forms a singleton group under its own name.
///
/// Discovery rejects headers where one group id is a substring of another
/// (e.g. `WT_t1` and `WT_t10`), since replicate membership would then be
/// ambiguous.
#[derive(Debug, Clone)]
pub struct ReplicateGroups {
    /// group id -> column indices into the sample axis, in header order
    groups: BTreeMap<String, Vec<usize>>,
}

/// Strip a trailing `_rep<single digit>` suffix, if present
fn strip_rep_suffix(name: &str) -> &str {
    let bytes = name.as_bytes();
    let n = bytes.len();
    if n >= 5 && bytes[n - 1].is_ascii_digit() && &bytes[n - 5..n - 1] == b"_rep" {
        &name[..n - 5]
    } else {
        name
    }
}

impl ReplicateGroups {
    /// Discover replicate groups from the sample column names
    pub fn discover(sample_ids: &[String]) -> Result<Self> {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, name) in sample_ids.iter().enumerate() {
            let group_id = strip_rep_suffix(name);
            groups.entry(group_id.to_string()).or_default().push(idx);
        }

        // Ambiguity check: substring-related group ids would make column
        // membership depend on match order.
        let ids: Vec<&String> = groups.keys().collect();
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i + 1) {
                if a.contains(b.as_str()) || b.contains(a.as_str()) {
                    return Err(GecError::data(format!(
                        "Ambiguous sample groups: '{}' and '{}' overlap; \
                         group identifiers must not be substrings of one another",
                        a, b
                    )));
                }
            }
        }

        log::debug!(
            "Discovered {} replicate groups: {:?}",
            groups.len(),
            groups.keys().collect::<Vec<_>>()
        );

        Ok(Self { groups })
    }

    /// Column indices for a group, if it exists
    pub fn columns(&self, group_id: &str) -> Option<&[usize]> {
        self.groups.get(group_id).map(|v| v.as_slice())
    }

    /// Column indices for one of the four canonical slots
    ///
    /// A missing slot means the input table does not describe the fixed
    /// two-strain, two-timepoint design and the run cannot proceed.
    pub fn slot_columns(&self, slot: Slot) -> Result<&[usize]> {
        self.columns(slot.group_id()).ok_or_else(|| {
            GecError::data(format!(
                "Required sample group '{}' not found in table header",
                slot.group_id()
            ))
        })
    }

    /// Iterate over (group id, column indices) in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of discovered groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strip_rep_suffix() {
        assert_eq!(strip_rep_suffix("WT_t1_rep1"), "WT_t1");
        assert_eq!(strip_rep_suffix("MT_t2_rep9"), "MT_t2");
        assert_eq!(strip_rep_suffix("WT_t1"), "WT_t1");
        assert_eq!(strip_rep_suffix("WT_t1_rep"), "WT_t1_rep");
        // Only a single trailing digit is part of the suffix pattern
        assert_eq!(strip_rep_suffix("WT_t1_rep12"), "WT_t1_rep12");
    }

    #[test]
    fn test_discover_four_groups() {
        let samples = ids(&[
            "WT_t1_rep1",
            "WT_t1_rep2",
            "WT_t2_rep1",
            "WT_t2_rep2",
            "MT_t1_rep1",
            "MT_t1_rep2",
            "MT_t2_rep1",
            "MT_t2_rep2",
        ]);
        let groups = ReplicateGroups::discover(&samples).unwrap();
        assert_eq!(groups.len(), 4);
        assert_eq!(groups.columns("WT_t1"), Some(&[0usize, 1][..]));
        assert_eq!(groups.columns("MT_t2"), Some(&[6usize, 7][..]));
        for slot in Slot::ALL {
            assert!(groups.slot_columns(slot).is_ok());
        }
    }

    #[test]
    fn test_column_without_suffix_is_singleton_group() {
        let samples = ids(&["WT_t1_rep1", "batch"]);
        let groups = ReplicateGroups::discover(&samples).unwrap();
        assert_eq!(groups.columns("batch"), Some(&[1usize][..]));
    }

    #[test]
    fn test_substring_group_ids_rejected() {
        let samples = ids(&["WT_t1_rep1", "WT_t10_rep1"]);
        let err = ReplicateGroups::discover(&samples).unwrap_err();
        assert!(matches!(err, GecError::Data { .. }));
    }

    #[test]
    fn test_missing_slot_is_data_error() {
        let samples = ids(&["WT_t1_rep1", "WT_t2_rep1", "MT_t1_rep1"]);
        let groups = ReplicateGroups::discover(&samples).unwrap();
        let err = groups.slot_columns(Slot::CaseT2).unwrap_err();
        assert!(matches!(err, GecError::Data { .. }));
    }
}
