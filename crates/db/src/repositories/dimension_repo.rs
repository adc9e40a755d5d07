//! Repository for the per-attribute dimension tables.
//!
//! Table and column names come from [`Attribute`], never from input, so
//! interpolating them into SQL is safe.

use nginwho_core::attribute::Attribute;
use nginwho_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::dimension::DimensionRow;
use crate::DbPool;

/// Provides lookup, insert and counting operations on dimension tables.
pub struct DimensionRepo;

impl DimensionRepo {
    /// Find the row holding `value`, if any.
    pub async fn find_by_value(
        conn: &mut SqliteConnection,
        attr: Attribute,
        value: &str,
    ) -> Result<Option<DimensionRow>, sqlx::Error> {
        let table = attr.table();
        let query = format!("SELECT id, {table} AS value, count FROM {table} WHERE {table} = ?1");
        sqlx::query_as::<_, DimensionRow>(&query)
            .bind(value)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert `value` with a count of 1, returning the new id.
    pub async fn insert(
        conn: &mut SqliteConnection,
        attr: Attribute,
        value: &str,
    ) -> Result<DbId, sqlx::Error> {
        let table = attr.table();
        let query = format!("INSERT INTO {table} ({table}, count) VALUES (?1, 1) RETURNING id");
        sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&mut *conn)
            .await
    }

    /// Overwrite the count of row `id`.
    pub async fn set_count(
        conn: &mut SqliteConnection,
        attr: Attribute,
        id: DbId,
        count: i64,
    ) -> Result<(), sqlx::Error> {
        let query = format!("UPDATE {} SET count = ?1 WHERE id = ?2", attr.table());
        sqlx::query(&query)
            .bind(count)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Insert `value` with count 1, or add 1 to its existing count.
    /// Returns the row id either way.
    ///
    /// One round trip per call; the batch writer uses an in-memory counter
    /// instead and only calls [`find_by_value`](Self::find_by_value),
    /// [`insert`](Self::insert) and [`set_count`](Self::set_count).
    pub async fn upsert_and_count(
        conn: &mut SqliteConnection,
        attr: Attribute,
        value: &str,
    ) -> Result<DbId, sqlx::Error> {
        let table = attr.table();
        let query = format!(
            "INSERT INTO {table} ({table}, count) VALUES (?1, 1)
             ON CONFLICT ({table}) DO UPDATE SET count = count + 1
             RETURNING id"
        );
        sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&mut *conn)
            .await
    }

    /// Number of distinct values stored for `attr`.
    pub async fn distinct_count(pool: &DbPool, attr: Attribute) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {}", attr.table());
        sqlx::query_scalar(&query).fetch_one(pool).await
    }

    /// The `limit` most frequent values for `attr`, highest count first.
    pub async fn top_values(
        pool: &DbPool,
        attr: Attribute,
        limit: i64,
    ) -> Result<Vec<DimensionRow>, sqlx::Error> {
        let table = attr.table();
        let query = format!(
            "SELECT id, {table} AS value, count FROM {table}
             ORDER BY count DESC, id ASC
             LIMIT ?1"
        );
        sqlx::query_as::<_, DimensionRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
