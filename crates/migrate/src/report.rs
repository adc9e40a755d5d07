//! Summary of a finished migration run.

use std::collections::BTreeMap;

use nginwho_core::error::RowRejection;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// `COUNT(*)` of the v1 table, undated rows included.
    pub total_records: u64,
    pub pages_read: u64,
    /// Rows that passed validation and were buffered for writing.
    pub accepted: u64,
    /// Dropped rows, keyed by [`RowRejection::kind`].
    pub skipped: BTreeMap<&'static str, u64>,
    pub batches_flushed: u64,
    pub facts_written: u64,
    pub elapsed_ms: u64,
}

impl MigrationReport {
    pub fn new(total_records: u64) -> Self {
        Self {
            total_records,
            ..Self::default()
        }
    }

    pub fn record_skip(&mut self, rejection: &RowRejection) {
        *self.skipped.entry(rejection.kind()).or_default() += 1;
    }

    pub fn skipped_total(&self) -> u64 {
        self.skipped.values().sum()
    }

    /// Rows the reader never returned because their date was NULL or empty.
    ///
    /// Only meaningful once the run has read the whole table.
    pub fn undated(&self) -> u64 {
        self.total_records
            .saturating_sub(self.accepted + self.skipped_total())
    }
}
