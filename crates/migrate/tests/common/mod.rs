#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nginwho_migrate::config::MigrationConfig;
use tempfile::TempDir;

pub const DATE: Option<&str> = Some("10-Oct-2023:13:55:36");

/// A v1 row: `(date, http method, request uri)`; other columns are fixed.
pub type V1Row<'a> = (Option<&'a str>, &'a str, &'a str);

/// Temp dir holding a v1 database and the path for a v2 database.
pub struct Fixture {
    pub dir: TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Fixture {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("nginwho_v1.db");
        let target = dir.path().join("nginwho_v2.db");
        Self {
            dir,
            source,
            target,
        }
    }

    pub async fn with_rows(rows: &[V1Row<'_>]) -> Self {
        let fixture = Self::empty();
        write_source(&fixture.source, rows).await;
        fixture
    }

    pub fn config(&self, batch_size: usize) -> MigrationConfig {
        MigrationConfig::new(&self.source, &self.target).with_batch_size(batch_size)
    }

    pub async fn target_pool(&self) -> nginwho_db::DbPool {
        nginwho_db::open_target(&self.target).await.unwrap()
    }
}

/// `n` valid rows with distinct request URIs `/0`, `/1`, ...
pub fn valid_rows(uris: &[String]) -> Vec<V1Row<'_>> {
    uris.iter().map(|u| (DATE, "GET", u.as_str())).collect()
}

pub fn uris(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/{i}")).collect()
}

pub async fn write_source(path: &Path, rows: &[V1Row<'_>]) {
    let pool = nginwho_db::open_target(path).await.unwrap();
    sqlx::query(
        "CREATE TABLE nginwho (
            date TEXT, remoteIP TEXT, httpMethod TEXT, requestURI TEXT, statusCode TEXT,
            responseSize INTEGER, referrer TEXT, userAgent TEXT, remoteUser TEXT,
            authenticatedUser TEXT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (date, method, uri) in rows {
        sqlx::query(
            "INSERT INTO nginwho VALUES
             (?1, '203.0.113.7', ?2, ?3, '200', 612, '-', 'Mozilla/5.0', NULL, '-')",
        )
        .bind(*date)
        .bind(*method)
        .bind(*uri)
        .execute(&pool)
        .await
        .unwrap();
    }
    pool.close().await;
}

/// Occurrence count stored for `value` in dimension `table`, 0 if absent.
pub async fn stored_count(pool: &nginwho_db::DbPool, table: &str, value: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT count FROM {table} WHERE {table} = ?1"))
        .bind(value)
        .fetch_optional(pool)
        .await
        .unwrap()
        .unwrap_or(0)
}
