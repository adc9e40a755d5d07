//! Fact table row model.

use nginwho_core::attribute::Attribute;
use nginwho_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the v2 `nginwho` fact table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Fact {
    pub id: DbId,
    pub date_id: DbId,
    #[sqlx(rename = "remoteIP_id")]
    pub remote_ip_id: DbId,
    #[sqlx(rename = "httpMethod_id")]
    pub http_method_id: DbId,
    #[sqlx(rename = "requestURI_id")]
    pub request_uri_id: DbId,
    #[sqlx(rename = "statusCode_id")]
    pub status_code_id: DbId,
    #[sqlx(rename = "responseSize_id")]
    pub response_size_id: DbId,
    pub referrer_id: DbId,
    #[sqlx(rename = "userAgent_id")]
    pub user_agent_id: DbId,
    #[sqlx(rename = "nonStandard_id")]
    pub non_standard_id: Option<DbId>,
    #[sqlx(rename = "remoteUser_id")]
    pub remote_user_id: Option<DbId>,
    #[sqlx(rename = "authenticatedUser_id")]
    pub authenticated_user_id: Option<DbId>,
}

impl Fact {
    /// Foreign key for `attr`.
    pub fn dimension_id(&self, attr: Attribute) -> Option<DbId> {
        match attr {
            Attribute::Date => Some(self.date_id),
            Attribute::RemoteIp => Some(self.remote_ip_id),
            Attribute::HttpMethod => Some(self.http_method_id),
            Attribute::RequestUri => Some(self.request_uri_id),
            Attribute::StatusCode => Some(self.status_code_id),
            Attribute::ResponseSize => Some(self.response_size_id),
            Attribute::Referrer => Some(self.referrer_id),
            Attribute::UserAgent => Some(self.user_agent_id),
            Attribute::NonStandard => self.non_standard_id,
            Attribute::RemoteUser => self.remote_user_id,
            Attribute::AuthenticatedUser => self.authenticated_user_id,
        }
    }
}

/// Resolved dimension ids for one fact row, indexed by [`Attribute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactIds([Option<DbId>; Attribute::COUNT]);

impl FactIds {
    pub fn set(&mut self, attr: Attribute, id: DbId) {
        self.0[attr.index()] = Some(id);
    }

    pub fn get(&self, attr: Attribute) -> Option<DbId> {
        self.0[attr.index()]
    }
}
