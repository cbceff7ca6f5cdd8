use crate::error::StoreError;
use crate::model::record::{Record, RecordField};
use crate::parsers::line;

/// Ordered records of the active profile plus the unsaved-changes flag.
///
/// Only the discrete edit operations (`add`, `remove_at`, `edit`) mark the
/// store dirty. Bulk loads replace the contents and leave it clean.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    dirty: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        store.load(lines);
        store
    }

    /// Replaces the contents with the parsed lines. Duplicates are kept;
    /// they are only resolved on save.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.records = line::parse_all(lines);
        self.dirty = false;
    }

    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
        self.dirty = false;
    }

    /// Appends a record and returns its index.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> usize {
        self.records.push(Record::new(key, value));
        self.dirty = true;
        self.records.len() - 1
    }

    pub fn add_blank(&mut self) -> usize {
        self.add(String::new(), String::new())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Record, StoreError> {
        self.check(index)?;
        let removed = self.records.remove(index);
        self.dirty = true;
        Ok(removed)
    }

    pub fn edit(
        &mut self,
        index: usize,
        field: RecordField,
        new_value: impl Into<String>,
    ) -> Result<&Record, StoreError> {
        self.check(index)?;
        let record = &mut self.records[index];
        match field {
            RecordField::Key => record.key = new_value.into(),
            RecordField::Value => record.value = new_value.into(),
        }
        self.dirty = true;
        Ok(&self.records[index])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn check(&self, index: usize) -> Result<(), StoreError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }
}
