use serde::{Deserialize, Serialize};

/// One dictionary substitution rule: `key` is replaced by `value`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Record {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Record {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Key,
    Value,
}
