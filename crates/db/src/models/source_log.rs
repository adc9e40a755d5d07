//! v1 `nginwho` row model.

use nginwho_core::log_record::RawLogRow;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the v1 `nginwho` table, every column cast to text.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SourceLog {
    pub date: Option<String>,
    pub remote_ip: Option<String>,
    pub http_method: Option<String>,
    pub request_uri: Option<String>,
    pub status_code: Option<String>,
    pub response_size: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub remote_user: Option<String>,
    pub authenticated_user: Option<String>,
}

impl From<SourceLog> for RawLogRow {
    fn from(row: SourceLog) -> Self {
        RawLogRow {
            date: row.date,
            remote_ip: row.remote_ip,
            http_method: row.http_method,
            request_uri: row.request_uri,
            status_code: row.status_code,
            response_size: row.response_size,
            referrer: row.referrer,
            user_agent: row.user_agent,
            remote_user: row.remote_user,
            authenticated_user: row.authenticated_user,
        }
    }
}
