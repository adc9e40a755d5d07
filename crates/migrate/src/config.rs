use std::path::PathBuf;

use nginwho_core::progress::DEFAULT_BATCH_SIZE;

use crate::error::MigrateError;

/// Default location of the v1 database.
pub const DEFAULT_SOURCE_PATH: &str = "nginwho_v1.db";

/// Default location of the v2 database.
pub const DEFAULT_TARGET_PATH: &str = "nginwho_v2.db";

/// Migration settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Path of the v1 database (read-only).
    pub source_path: PathBuf,
    /// Path of the v2 database (created if missing).
    pub target_path: PathBuf,
    /// Records committed per transaction.
    pub batch_size: usize,
    /// Rows requested from v1 per page.
    pub page_size: usize,
}

impl MigrationConfig {
    pub fn new(source_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            page_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set both the batch size and the page size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self.page_size = batch_size;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default            |
    /// |------------------------|--------------------|
    /// | `NGINWHO_V1_DB`        | `nginwho_v1.db`    |
    /// | `NGINWHO_V2_DB`        | `nginwho_v2.db`    |
    /// | `MIGRATION_BATCH_SIZE` | `50000`            |
    /// | `MIGRATION_PAGE_SIZE`  | batch size         |
    pub fn from_env() -> Result<Self, MigrateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MigrateError> {
        let source_path = lookup("NGINWHO_V1_DB").unwrap_or_else(|| DEFAULT_SOURCE_PATH.into());
        let target_path = lookup("NGINWHO_V2_DB").unwrap_or_else(|| DEFAULT_TARGET_PATH.into());

        let batch_size = match lookup("MIGRATION_BATCH_SIZE") {
            Some(v) => parse_size("MIGRATION_BATCH_SIZE", &v)?,
            None => DEFAULT_BATCH_SIZE,
        };
        let page_size = match lookup("MIGRATION_PAGE_SIZE") {
            Some(v) => parse_size("MIGRATION_PAGE_SIZE", &v)?,
            None => batch_size,
        };

        Ok(Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
            batch_size,
            page_size,
        })
    }
}

fn parse_size(key: &str, value: &str) -> Result<usize, MigrateError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(MigrateError::Config(format!("{key} must be greater than zero"))),
        Ok(n) => Ok(n),
        Err(_) => Err(MigrateError::Config(format!(
            "{key} must be a positive integer, got {value:?}"
        ))),
    }
}
