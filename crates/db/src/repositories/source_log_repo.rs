//! Read-only access to the v1 `nginwho` table.

use crate::models::source_log::SourceLog;
use crate::schema::FACT_TABLE;
use crate::DbPool;

/// Column list for paged reads. Every column is cast to text because v1
/// stored some of them (e.g. `responseSize`) as integers.
const COLUMNS: &str = "CAST(date AS TEXT) AS date, \
    CAST(remoteIP AS TEXT) AS remote_ip, \
    CAST(httpMethod AS TEXT) AS http_method, \
    CAST(requestURI AS TEXT) AS request_uri, \
    CAST(statusCode AS TEXT) AS status_code, \
    CAST(responseSize AS TEXT) AS response_size, \
    CAST(referrer AS TEXT) AS referrer, \
    CAST(userAgent AS TEXT) AS user_agent, \
    CAST(remoteUser AS TEXT) AS remote_user, \
    CAST(authenticatedUser AS TEXT) AS authenticated_user";

/// Pages through the v1 log table.
pub struct SourceLogRepo;

impl SourceLogRepo {
    /// Total number of rows in the v1 table, including undated ones.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {FACT_TABLE}");
        sqlx::query_scalar(&query).fetch_one(pool).await
    }

    /// Fetch up to `limit` dated rows starting at `offset`.
    ///
    /// Rows with a NULL or empty date are excluded here and never reach
    /// validation. Rows are ordered by `rowid` so consecutive pages neither
    /// overlap nor skip rows. An empty result means the table is exhausted.
    pub async fn read_batch(
        pool: &DbPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<SourceLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FACT_TABLE}
             WHERE date IS NOT NULL AND date != ''
             ORDER BY rowid
             LIMIT ?1 OFFSET ?2"
        );
        sqlx::query_as::<_, SourceLog>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
