use std::collections::HashSet;

use crate::model::record::Record;
use crate::services::normalize;

/// Save-time transform: drops keyless records and later duplicates of a key.
/// The first occurrence of each key wins and order is kept.
pub fn clean(records: &[Record]) -> Vec<Record> {
    clean_with_report(records).0
}

/// Same as [`clean`], also returning how many records were dropped.
pub fn clean_with_report(records: &[Record]) -> (Vec<Record>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut out: Vec<Record> = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for r in records {
        let key = normalize::normalize_field(&r.key);
        let value = normalize::normalize_field(&r.value);

        if key.is_empty() {
            // covers both fully blank rows and value-only orphans
            dropped += 1;
            continue;
        }

        if seen.contains(&key) {
            log::debug!("dropping duplicate key {key:?}");
            dropped += 1;
            continue;
        }

        seen.insert(key.clone());
        out.push(Record { key, value });
    }

    (out, dropped)
}
