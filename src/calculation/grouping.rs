//! Grouping of time entries by employee and activity.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{GroupKey, RawEntry};

/// Partitions entries by their [`GroupKey`].
///
/// Groups iterate in key order. Entries within a group keep their input
/// order, so the first entry of a pay type in a group is the first one
/// that appeared in the export.
///
/// Entries with a blank key field are skipped with a warning.
pub fn group_entries(entries: &[RawEntry]) -> BTreeMap<GroupKey, Vec<&RawEntry>> {
    let mut groups: BTreeMap<GroupKey, Vec<&RawEntry>> = BTreeMap::new();
    for entry in entries {
        let key = entry.group_key();
        if let Some(column) = key.blank_column() {
            warn!(row = entry.row, column, "Skipping entry with a blank grouping column");
            continue;
        }
        groups.entry(key).or_default().push(entry);
    }
    groups
}
