use crate::model::record::Record;

/// Indices of the records whose key or value contains `query`, ignoring case.
/// An empty (or all-blank) query matches every record.
pub fn filter(records: &[Record], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return (0..records.len()).collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, &needle))
        .map(|(i, _)| i)
        .collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    record.key.to_lowercase().contains(needle) || record.value.to_lowercase().contains(needle)
}
