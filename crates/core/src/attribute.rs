//! The logged attributes that each get their own dimension table.
//!
//! Every dimension table is named after its attribute and stores the value in
//! a column of the same name, e.g. `requestURI(id, requestURI, count)`. The
//! fact table references it through `<name>_id`.

use serde::{Deserialize, Serialize};

/// One logged attribute, and therefore one dimension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Date,
    RemoteIp,
    HttpMethod,
    RequestUri,
    StatusCode,
    ResponseSize,
    Referrer,
    UserAgent,
    NonStandard,
    RemoteUser,
    AuthenticatedUser,
}

impl Attribute {
    /// Number of dimension tables.
    pub const COUNT: usize = 11;

    /// All attributes, in fact-table column order.
    pub const ALL: [Attribute; Self::COUNT] = [
        Self::Date,
        Self::RemoteIp,
        Self::HttpMethod,
        Self::RequestUri,
        Self::StatusCode,
        Self::ResponseSize,
        Self::Referrer,
        Self::UserAgent,
        Self::NonStandard,
        Self::RemoteUser,
        Self::AuthenticatedUser,
    ];

    /// Dimension table name, also the name of its value column.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::RemoteIp => "remoteIP",
            Self::HttpMethod => "httpMethod",
            Self::RequestUri => "requestURI",
            Self::StatusCode => "statusCode",
            Self::ResponseSize => "responseSize",
            Self::Referrer => "referrer",
            Self::UserAgent => "userAgent",
            Self::NonStandard => "nonStandard",
            Self::RemoteUser => "remoteUser",
            Self::AuthenticatedUser => "authenticatedUser",
        }
    }

    /// Foreign-key column in the fact table.
    pub fn fact_column(&self) -> &'static str {
        match self {
            Self::Date => "date_id",
            Self::RemoteIp => "remoteIP_id",
            Self::HttpMethod => "httpMethod_id",
            Self::RequestUri => "requestURI_id",
            Self::StatusCode => "statusCode_id",
            Self::ResponseSize => "responseSize_id",
            Self::Referrer => "referrer_id",
            Self::UserAgent => "userAgent_id",
            Self::NonStandard => "nonStandard_id",
            Self::RemoteUser => "remoteUser_id",
            Self::AuthenticatedUser => "authenticatedUser_id",
        }
    }

    /// Whether a log may omit this attribute (NULL foreign key).
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::NonStandard | Self::RemoteUser | Self::AuthenticatedUser
        )
    }

    /// Position in [`Attribute::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
