//! DDL for the v2 star schema.
//!
//! One dimension table per [`Attribute`] plus the `nginwho` fact table. All
//! statements are `CREATE TABLE IF NOT EXISTS`, so initializing an already
//! initialized database changes nothing.

use nginwho_core::attribute::Attribute;

use crate::DbPool;

/// Name of the fact table in both v1 and v2.
pub const FACT_TABLE: &str = "nginwho";

/// `CREATE TABLE` statement for one dimension table.
pub fn dimension_ddl(attr: Attribute) -> String {
    let table = attr.table();
    let not_null = if attr.is_optional() { "" } else { " NOT NULL" };
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY,
            {table} TEXT UNIQUE{not_null},
            count INTEGER NOT NULL DEFAULT 1
        )"
    )
}

/// `CREATE TABLE` statement for the fact table.
pub fn fact_ddl() -> String {
    let columns: Vec<String> = Attribute::ALL
        .iter()
        .map(|attr| {
            let not_null = if attr.is_optional() { "" } else { " NOT NULL" };
            format!("{} INTEGER{not_null}", attr.fact_column())
        })
        .collect();
    let foreign_keys: Vec<String> = Attribute::ALL
        .iter()
        .map(|attr| {
            format!(
                "FOREIGN KEY ({}) REFERENCES {}(id)",
                attr.fact_column(),
                attr.table()
            )
        })
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {FACT_TABLE} (
            id INTEGER PRIMARY KEY,
            {},
            {}
        )",
        columns.join(",\n            "),
        foreign_keys.join(",\n            ")
    )
}

/// Create every dimension table and the fact table in one transaction.
pub async fn create_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    tracing::info!("Creating database tables");

    let mut tx = pool.begin().await?;

    for attr in Attribute::ALL {
        sqlx::query(&dimension_ddl(attr)).execute(&mut *tx).await?;
    }
    sqlx::query(&fact_ddl()).execute(&mut *tx).await?;

    tx.commit().await?;

    tracing::info!(dimensions = Attribute::COUNT, "Created database tables");
    Ok(())
}
