//! Source rows as read from v1 and the normalized records written to v2.

use serde::Serialize;

use crate::attribute::Attribute;

/// One row of the v1 `nginwho` table, every column read as nullable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawLogRow {
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

/// A validated access-log entry with its date already normalized.
///
/// Lives only for the duration of one batch; the batch writer turns it into
/// a fact row plus dimension counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub remote_ip: String,
    pub http_method: String,
    pub request_uri: String,
    pub status_code: String,
    pub response_size: String,
    pub referrer: String,
    pub user_agent: String,
    pub remote_user: Option<String>,
    pub authenticated_user: Option<String>,
    pub non_standard: Option<String>,
}

impl LogRecord {
    /// Value of `attr` for this record; `None` only for optional attributes.
    pub fn value(&self, attr: Attribute) -> Option<&str> {
        match attr {
            Attribute::Date => Some(&self.timestamp),
            Attribute::RemoteIp => Some(&self.remote_ip),
            Attribute::HttpMethod => Some(&self.http_method),
            Attribute::RequestUri => Some(&self.request_uri),
            Attribute::StatusCode => Some(&self.status_code),
            Attribute::ResponseSize => Some(&self.response_size),
            Attribute::Referrer => Some(&self.referrer),
            Attribute::UserAgent => Some(&self.user_agent),
            Attribute::NonStandard => self.non_standard.as_deref(),
            Attribute::RemoteUser => self.remote_user.as_deref(),
            Attribute::AuthenticatedUser => self.authenticated_user.as_deref(),
        }
    }
}
