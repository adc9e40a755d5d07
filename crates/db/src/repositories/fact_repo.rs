//! Repository for the v2 `nginwho` fact table.

use nginwho_core::attribute::Attribute;
use nginwho_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::fact::{Fact, FactIds};
use crate::schema::FACT_TABLE;
use crate::DbPool;

/// Foreign-key columns, in [`Attribute::ALL`] order.
const ID_COLUMNS: &str = "date_id, remoteIP_id, httpMethod_id, requestURI_id, statusCode_id, \
    responseSize_id, referrer_id, userAgent_id, nonStandard_id, remoteUser_id, \
    authenticatedUser_id";

/// Provides insert and read operations on fact rows.
pub struct FactRepo;

impl FactRepo {
    /// Insert one fact row, returning its id.
    pub async fn insert(conn: &mut SqliteConnection, ids: &FactIds) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO {FACT_TABLE} ({ID_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             RETURNING id"
        );
        let mut q = sqlx::query_scalar(&query);
        for attr in Attribute::ALL {
            q = q.bind(ids.get(attr));
        }
        q.fetch_one(&mut *conn).await
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {FACT_TABLE}");
        sqlx::query_scalar(&query).fetch_one(pool).await
    }

    /// All fact rows in insertion order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Fact>, sqlx::Error> {
        let query = format!("SELECT id, {ID_COLUMNS} FROM {FACT_TABLE} ORDER BY id");
        sqlx::query_as::<_, Fact>(&query).fetch_all(pool).await
    }
}
