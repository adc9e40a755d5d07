//! Dimension table row model.

use nginwho_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from any dimension table, with the value column aliased to `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DimensionRow {
    pub id: DbId,
    pub value: Option<String>,
    pub count: i64,
}
