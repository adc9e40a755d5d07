#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nginwho_core::log_record::LogRecord;
use nginwho_db::DbPool;
use tempfile::TempDir;

/// v1 layout: flat text columns, `responseSize` stored as an integer.
pub const V1_DDL: &str = "CREATE TABLE nginwho (
    date TEXT,
    remoteIP TEXT,
    httpMethod TEXT,
    requestURI TEXT,
    statusCode TEXT,
    responseSize INTEGER,
    referrer TEXT,
    userAgent TEXT,
    remoteUser TEXT,
    authenticatedUser TEXT
)";

/// A v1 row: `(date, method, uri, response size)`; other columns are fixed.
pub type V1Row<'a> = (Option<&'a str>, &'a str, &'a str, i64);

/// Create an empty v2 database with the star schema in a fresh temp dir.
pub async fn target_db() -> (TempDir, DbPool) {
    let dir = TempDir::new().unwrap();
    let pool = nginwho_db::open_target(&dir.path().join("v2.db"))
        .await
        .unwrap();
    nginwho_db::schema::create_schema(&pool).await.unwrap();
    (dir, pool)
}

/// Write a v1 database at `path` containing `rows`.
pub async fn write_source(path: &Path, rows: &[V1Row<'_>]) {
    let pool = nginwho_db::open_target(path).await.unwrap();
    sqlx::query(V1_DDL).execute(&pool).await.unwrap();
    for (date, method, uri, size) in rows {
        sqlx::query(
            "INSERT INTO nginwho VALUES (?1, '10.0.0.1', ?2, ?3, '200', ?4, '-', 'curl/8.0', NULL, '-')",
        )
        .bind(*date)
        .bind(*method)
        .bind(*uri)
        .bind(*size)
        .execute(&pool)
        .await
        .unwrap();
    }
    pool.close().await;
}

/// Create a v1 database in a fresh temp dir and open it read-only.
pub async fn source_db(rows: &[V1Row<'_>]) -> (TempDir, PathBuf, DbPool) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("v1.db");
    write_source(&path, rows).await;
    let pool = nginwho_db::open_source(&path).await.unwrap();
    (dir, path, pool)
}

/// A normalized record varying only in method and URI.
pub fn record(method: &str, uri: &str) -> LogRecord {
    LogRecord {
        timestamp: "2023-10-10 13:55:36".into(),
        remote_ip: "10.0.0.1".into(),
        http_method: method.into(),
        request_uri: uri.into(),
        status_code: "200".into(),
        response_size: "512".into(),
        referrer: "-".into(),
        user_agent: "curl/8.0".into(),
        remote_user: None,
        authenticated_user: Some("-".into()),
        non_standard: None,
    }
}
