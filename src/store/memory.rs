//! Table-keyed in-memory storage.

use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::store::record::Record;

/// A thread-safe collection of named, append-only tables.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    tables: Arc<DashMap<String, Vec<Record>>>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to `table`, creating the table on first use.
    pub fn insert(&self, table: &str, record: Record) {
        let len = {
            let mut rows = self.tables.entry(table.to_string()).or_default();
            rows.push(record);
            rows.len()
        };

        tracing::trace!(table = %table, rows = len, "Record inserted");
        metrics::record_table_size(table, len);
    }

    /// All records of `table` in insertion order. Unknown tables are empty.
    pub fn select(&self, table: &str) -> Vec<Record> {
        self.tables
            .get(table)
            .map(|rows| rows.value().clone())
            .unwrap_or_default()
    }

    /// Records of `table` matching `predicate`, in insertion order.
    pub fn select_where<F>(&self, table: &str, predicate: F) -> Vec<Record>
    where
        F: Fn(&Record) -> bool,
    {
        self.tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| predicate(r)).cloned().collect())
            .unwrap_or_default()
    }

    /// Number of records in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map(|rows| rows.len()).unwrap_or(0)
    }
}
