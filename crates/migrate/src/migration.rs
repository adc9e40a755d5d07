//! Drives a v1 -> v2 migration from start to finish.
//!
//! One sequential worker: read a page from v1, validate and normalize it into
//! an in-memory buffer, and commit the buffer to v2 every `batch_size`
//! records. The run ends when v1 returns an empty page; whatever is left in
//! the buffer is flushed once more.
//!
//! Source problems (missing file, unreadable table) abort before v2 is opened.
//! Invalid rows are skipped and counted. Any database error past that point
//! aborts the run; batches committed before it stay in v2.

use std::time::Instant;

use nginwho_core::attribute::Attribute;
use nginwho_core::log_record::LogRecord;
use nginwho_core::progress::{MigrationState, PageCursor};
use nginwho_core::validation::normalize_row;
use nginwho_db::repositories::{DimensionRepo, FactRepo, SourceLogRepo};
use nginwho_db::schema::create_schema;
use nginwho_db::writer::BatchWriter;
use nginwho_db::DbPool;

use crate::config::MigrationConfig;
use crate::error::MigrateError;
use crate::report::MigrationReport;

/// Number of most frequent values logged per dimension after a run.
const TOP_VALUES_LOGGED: i64 = 5;

pub struct Migration {
    config: MigrationConfig,
    state: MigrationState,
}

impl Migration {
    pub fn new(config: MigrationConfig) -> Self {
        Self {
            config,
            state: MigrationState::Init,
        }
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    fn transition(&mut self, next: MigrationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal migration transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "Migration state change");
        self.state = next;
    }

    fn fail(&mut self, err: MigrateError) -> MigrateError {
        self.transition(MigrationState::Failed);
        err
    }

    /// Run the migration to completion.
    ///
    /// May be called again on the same value; each call starts from `Init`.
    pub async fn run(&mut self) -> Result<MigrationReport, MigrateError> {
        self.state = MigrationState::Init;
        let started = Instant::now();
        let source_path = self.config.source_path.clone();
        let target_path = self.config.target_path.clone();

        tracing::info!(
            source = %source_path.display(),
            target = %target_path.display(),
            "Migrating v1 database to v2",
        );

        // -- Init --------------------------------------------------------------
        if !source_path.exists() {
            return Err(self.fail(MigrateError::SourceMissing { path: source_path }));
        }

        // -- Counting ----------------------------------------------------------
        self.transition(MigrationState::Counting);
        let (source, total) = match open_and_count(&source_path).await {
            Ok(v) => v,
            Err(e) => {
                return Err(self.fail(MigrateError::SourceUnreadable {
                    path: source_path,
                    source: e,
                }));
            }
        };
        tracing::info!(source = %source_path.display(), total, "Counted v1 records");

        let target = nginwho_db::open_target(&target_path)
            .await
            .map_err(|e| {
                self.fail(MigrateError::TargetUnavailable {
                    path: target_path.clone(),
                    source: e,
                })
            })?;
        create_schema(&target)
            .await
            .map_err(|e| self.fail(MigrateError::Schema(e)))?;

        // -- Reading / Writing -------------------------------------------------
        self.transition(MigrationState::Reading);
        let batch_size = self.config.batch_size;
        let mut cursor = PageCursor::new(total, self.config.page_size as u64);
        let mut report = MigrationReport::new(total);
        let mut writer = BatchWriter::new();
        let mut buffer: Vec<LogRecord> = Vec::with_capacity(batch_size);

        loop {
            tracing::info!(
                offset = cursor.offset,
                page_size = cursor.page_size,
                remaining = cursor.remaining,
                "Processing records",
            );

            let rows = SourceLogRepo::read_batch(
                &source,
                cursor.offset as i64,
                cursor.page_size as i64,
            )
            .await
            .map_err(|e| {
                self.fail(MigrateError::Read {
                    offset: cursor.offset,
                    limit: cursor.page_size,
                    source: e,
                })
            })?;

            if rows.is_empty() {
                break;
            }
            report.pages_read += 1;

            for row in rows {
                match normalize_row(row.into()) {
                    Ok(record) => {
                        buffer.push(record);
                        report.accepted += 1;
                    }
                    Err(rejection) => {
                        tracing::warn!(
                            offset = cursor.offset,
                            reason = rejection.kind(),
                            "Skipping row: {rejection}",
                        );
                        report.record_skip(&rejection);
                        continue;
                    }
                }

                if buffer.len() >= batch_size {
                    self.transition(MigrationState::Writing);
                    flush(&mut writer, &target, &mut buffer, &mut report)
                        .await
                        .map_err(|e| self.fail(e))?;
                    self.transition(MigrationState::Reading);
                }
            }

            cursor.advance();
            self.transition(MigrationState::Reading);
        }

        // -- Draining ----------------------------------------------------------
        self.transition(MigrationState::Draining);
        if !buffer.is_empty() {
            tracing::info!(leftovers = buffer.len(), "Adding leftovers");
            flush(&mut writer, &target, &mut buffer, &mut report)
                .await
                .map_err(|e| self.fail(e))?;
        }

        log_summary(&target).await;

        // -- Done --------------------------------------------------------------
        source.close().await;
        target.close().await;
        self.transition(MigrationState::Done);

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            total = report.total_records,
            accepted = report.accepted,
            skipped = report.skipped_total(),
            undated = report.undated(),
            batches = report.batches_flushed,
            elapsed_ms = report.elapsed_ms,
            "Processed records",
        );
        Ok(report)
    }
}

async fn open_and_count(path: &std::path::Path) -> Result<(DbPool, u64), sqlx::Error> {
    let source = nginwho_db::open_source(path).await?;
    let total = SourceLogRepo::count(&source).await?;
    Ok((source, total.max(0) as u64))
}

/// Commit the buffered records as one batch and clear the buffer.
async fn flush(
    writer: &mut BatchWriter,
    target: &DbPool,
    buffer: &mut Vec<LogRecord>,
    report: &mut MigrationReport,
) -> Result<(), MigrateError> {
    let written = writer
        .write_batch(target, buffer)
        .await
        .map_err(|e| MigrateError::Write {
            records: buffer.len(),
            source: e,
        })?;
    report.batches_flushed += 1;
    report.facts_written += written as u64;
    buffer.clear();
    Ok(())
}

/// Log fact and per-dimension totals from the finished target.
///
/// Read-only; failures are logged and otherwise ignored.
async fn log_summary(target: &DbPool) {
    match FactRepo::count(target).await {
        Ok(facts) => tracing::info!(facts, "v2 fact table populated"),
        Err(e) => tracing::warn!(error = %e, "Could not count v2 facts"),
    }

    for attr in Attribute::ALL {
        let distinct = match DimensionRepo::distinct_count(target, attr).await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(dimension = %attr, error = %e, "Could not count dimension");
                continue;
            }
        };
        tracing::info!(dimension = %attr, distinct, "Dimension populated");

        let top = match DimensionRepo::top_values(target, attr, TOP_VALUES_LOGGED).await {
            Ok(top) => top,
            Err(e) => {
                tracing::warn!(dimension = %attr, error = %e, "Could not list top values");
                continue;
            }
        };
        for row in top {
            tracing::debug!(
                dimension = %attr,
                value = row.value.as_deref().unwrap_or(""),
                count = row.count,
                "Most frequent value",
            );
        }
    }
}
