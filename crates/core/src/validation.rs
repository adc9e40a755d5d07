//! Data-quality gate between the v1 reader and the dimension tables.
//!
//! Garbled log lines (e.g. TLS handshakes hitting a plain-HTTP port) end up in
//! v1 with binary junk in the method column. They must be dropped before any
//! dimension count sees them.

use crate::attribute::Attribute;
use crate::date::normalize_date;
use crate::error::RowRejection;
use crate::log_record::{LogRecord, RawLogRow};

/// Characters that never appear in a real HTTP method.
pub const FORBIDDEN_METHOD_CHARS: &[char] = &['\\', '{'];

/// Reject methods containing a backslash or an open brace.
pub fn validate_http_method(method: &str) -> Result<(), RowRejection> {
    if method.contains(FORBIDDEN_METHOD_CHARS) {
        return Err(RowRejection::MalformedMethod {
            method: method.to_string(),
        });
    }
    Ok(())
}

fn required(value: Option<String>, attr: Attribute) -> Result<String, RowRejection> {
    value.ok_or(RowRejection::MissingAttribute(attr))
}

/// Validate a raw v1 row and turn it into a [`LogRecord`].
///
/// The method check runs first so garbled rows are reported as such even if
/// their other columns are also broken.
pub fn normalize_row(row: RawLogRow) -> Result<LogRecord, RowRejection> {
    let http_method = required(row.http_method, Attribute::HttpMethod)?;
    validate_http_method(&http_method)?;

    let raw_date = required(row.date, Attribute::Date)?;
    let timestamp = normalize_date(&raw_date)?;

    Ok(LogRecord {
        timestamp,
        remote_ip: required(row.remote_ip, Attribute::RemoteIp)?,
        http_method,
        request_uri: required(row.request_uri, Attribute::RequestUri)?,
        status_code: required(row.status_code, Attribute::StatusCode)?,
        response_size: required(row.response_size, Attribute::ResponseSize)?,
        referrer: required(row.referrer, Attribute::Referrer)?,
        user_agent: required(row.user_agent, Attribute::UserAgent)?,
        remote_user: row.remote_user,
        authenticated_user: row.authenticated_user,
        // v1 never recorded non-standard fields.
        non_standard: None,
    })
}
