use std::collections::BTreeSet;

use errlog_core::LogRecord;

use crate::RecordSink;

/// Distinct values of one record parameter (`host`, `server`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSet {
    key: String,
    values: BTreeSet<String>,
}

impl ValueSet {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: BTreeSet::new(),
        }
    }

    /// Collects `host` parameter values.
    pub fn hosts() -> Self {
        Self::new("host")
    }

    /// Collects `server` parameter values.
    pub fn servers() -> Self {
        Self::new("server")
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Values in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Union with another set collected for the same key.
    pub fn merge(&mut self, other: ValueSet) {
        debug_assert_eq!(self.key, other.key);
        self.values.extend(other.values);
    }
}

impl RecordSink for ValueSet {
    fn consume(&mut self, record: &LogRecord) -> bool {
        match record.param(&self.key) {
            Some(value) => {
                if !self.values.contains(value) {
                    self.values.insert(value.to_string());
                }
                true
            }
            None => false,
        }
    }
}
