//! Transactional batch writer for normalized logs.
//!
//! Each call to [`BatchWriter::write_batch`] runs in a single transaction:
//! every record of the batch becomes a fact row and every dimension count is
//! brought up to date, or nothing is written at all.

use std::time::Instant;

use nginwho_core::attribute::Attribute;
use nginwho_core::dimension::DimensionCounters;
use nginwho_core::log_record::LogRecord;
use nginwho_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::fact::FactIds;
use crate::repositories::{DimensionRepo, FactRepo};
use crate::DbPool;

/// Writes batches of [`LogRecord`]s into the star schema.
///
/// Keeps an in-memory counter per dimension across batches, so a value is
/// looked up in the database only the first time this writer sees it and
/// counts are flushed once per batch instead of once per row.
#[derive(Debug, Default)]
pub struct BatchWriter {
    counters: DimensionCounters,
}

impl BatchWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist `logs` in one transaction. Returns the number of fact rows
    /// written.
    ///
    /// On error the transaction is rolled back and the in-memory counters are
    /// discarded, since they may reference rows that were never committed.
    pub async fn write_batch(
        &mut self,
        pool: &DbPool,
        logs: &[LogRecord],
    ) -> Result<usize, sqlx::Error> {
        tracing::info!(records = logs.len(), "Writing logs to database");
        let started = Instant::now();

        match self.write_in_transaction(pool, logs).await {
            Ok(()) => {
                self.counters.mark_persisted();
                tracing::info!(
                    records = logs.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Batch committed",
                );
                Ok(logs.len())
            }
            Err(e) => {
                self.counters.clear();
                tracing::error!(records = logs.len(), error = %e, "Batch rolled back");
                Err(e)
            }
        }
    }

    async fn write_in_transaction(
        &mut self,
        pool: &DbPool,
        logs: &[LogRecord],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for log in logs {
            let mut ids = FactIds::default();
            for attr in Attribute::ALL {
                if let Some(value) = log.value(attr) {
                    ids.set(attr, self.resolve(&mut tx, attr, value).await?);
                }
            }
            FactRepo::insert(&mut tx, &ids).await?;
        }

        for attr in Attribute::ALL {
            for (id, count) in self.counters.get(attr).dirty() {
                DimensionRepo::set_count(&mut tx, attr, id, count).await?;
            }
        }

        tx.commit().await
    }

    /// Upsert-with-count against the in-memory counter, falling back to the
    /// table for values not yet cached.
    async fn resolve(
        &mut self,
        conn: &mut SqliteConnection,
        attr: Attribute,
        value: &str,
    ) -> Result<DbId, sqlx::Error> {
        let counter = self.counters.get_mut(attr);
        if let Some(id) = counter.increment(value) {
            return Ok(id);
        }

        match DimensionRepo::find_by_value(conn, attr, value).await? {
            Some(row) => Ok(counter.seed(value, row.id, row.count)),
            None => {
                let id = DimensionRepo::insert(conn, attr, value).await?;
                Ok(counter.insert_new(value, id))
            }
        }
    }
}
