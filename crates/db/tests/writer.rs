mod common;

use nginwho_core::attribute::Attribute;
use nginwho_db::repositories::{DimensionRepo, FactRepo};
use nginwho_db::schema::create_schema;
use nginwho_db::writer::BatchWriter;
use nginwho_db::DbPool;

async fn dimension_value(pool: &DbPool, attr: Attribute, id: i64) -> Option<String> {
    let table = attr.table();
    sqlx::query_scalar(&format!("SELECT {table} FROM {table} WHERE id = ?1"))
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn count_of(pool: &DbPool, attr: Attribute, value: &str) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    DimensionRepo::find_by_value(&mut conn, attr, value)
        .await
        .unwrap()
        .map(|r| r.count)
        .unwrap_or(0)
}

/// Each record becomes one fact row whose ids resolve back to its values.
#[tokio::test]
async fn facts_reference_their_dimension_values() {
    let (_dir, pool) = common::target_db().await;
    let logs = vec![
        common::record("GET", "/a"),
        common::record("POST", "/b"),
        common::record("GET", "/a"),
    ];

    let written = BatchWriter::new().write_batch(&pool, &logs).await.unwrap();
    assert_eq!(written, 3);

    let facts = FactRepo::list(&pool).await.unwrap();
    assert_eq!(facts.len(), 3);
    for (fact, log) in facts.iter().zip(&logs) {
        for attr in Attribute::ALL {
            match (fact.dimension_id(attr), log.value(attr)) {
                (Some(id), Some(value)) => {
                    assert_eq!(dimension_value(&pool, attr, id).await.as_deref(), Some(value));
                }
                (None, None) => {}
                other => panic!("{attr}: mismatched id/value {other:?}"),
            }
        }
    }

    let violations = sqlx::query("PRAGMA foreign_key_check")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert!(violations.is_empty());
}

/// Counts equal the number of fact rows carrying each value, across batches.
#[tokio::test]
async fn counts_accumulate_across_batches() {
    let (_dir, pool) = common::target_db().await;
    let mut writer = BatchWriter::new();

    writer
        .write_batch(&pool, &[common::record("GET", "/a"), common::record("GET", "/b")])
        .await
        .unwrap();
    writer
        .write_batch(&pool, &[common::record("GET", "/a"), common::record("HEAD", "/a")])
        .await
        .unwrap();

    assert_eq!(count_of(&pool, Attribute::HttpMethod, "GET").await, 3);
    assert_eq!(count_of(&pool, Attribute::HttpMethod, "HEAD").await, 1);
    assert_eq!(count_of(&pool, Attribute::RequestUri, "/a").await, 3);
    assert_eq!(count_of(&pool, Attribute::RequestUri, "/b").await, 1);
    assert_eq!(count_of(&pool, Attribute::Date, "2023-10-10 13:55:36").await, 4);
    assert_eq!(FactRepo::count(&pool).await.unwrap(), 4);
}

/// A fresh writer picks up counts already stored in the target.
#[tokio::test]
async fn existing_rows_are_incremented() {
    let (_dir, pool) = common::target_db().await;
    sqlx::query("INSERT INTO httpMethod (id, httpMethod, count) VALUES (40, 'GET', 10)")
        .execute(&pool)
        .await
        .unwrap();

    BatchWriter::new()
        .write_batch(&pool, &[common::record("GET", "/a")])
        .await
        .unwrap();

    let facts = FactRepo::list(&pool).await.unwrap();
    assert_eq!(facts[0].http_method_id, 40);
    assert_eq!(count_of(&pool, Attribute::HttpMethod, "GET").await, 11);
}

/// Missing optional attributes become NULL foreign keys without dimension rows.
#[tokio::test]
async fn absent_optional_values_are_null() {
    let (_dir, pool) = common::target_db().await;

    BatchWriter::new()
        .write_batch(&pool, &[common::record("GET", "/a")])
        .await
        .unwrap();

    let fact = &FactRepo::list(&pool).await.unwrap()[0];
    assert_eq!(fact.remote_user_id, None);
    assert_eq!(fact.non_standard_id, None);
    assert!(fact.authenticated_user_id.is_some());
    assert_eq!(
        DimensionRepo::distinct_count(&pool, Attribute::RemoteUser).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn empty_batch_writes_nothing() {
    let (_dir, pool) = common::target_db().await;

    let written = BatchWriter::new().write_batch(&pool, &[]).await.unwrap();
    assert_eq!(written, 0);
    assert_eq!(FactRepo::count(&pool).await.unwrap(), 0);
}

/// A failing batch leaves no trace, and the writer recovers afterwards.
#[tokio::test]
async fn failed_batch_is_rolled_back() {
    let (_dir, pool) = common::target_db().await;
    let mut writer = BatchWriter::new();

    writer
        .write_batch(&pool, &[common::record("GET", "/a")])
        .await
        .unwrap();

    sqlx::query("DROP TABLE nginwho").execute(&pool).await.unwrap();
    let result = writer
        .write_batch(&pool, &[common::record("GET", "/a"), common::record("PUT", "/z")])
        .await;
    assert!(result.is_err());

    assert_eq!(count_of(&pool, Attribute::HttpMethod, "GET").await, 1);
    assert_eq!(count_of(&pool, Attribute::HttpMethod, "PUT").await, 0);
    assert_eq!(count_of(&pool, Attribute::RequestUri, "/z").await, 0);

    create_schema(&pool).await.unwrap();
    writer
        .write_batch(&pool, &[common::record("GET", "/a")])
        .await
        .unwrap();
    assert_eq!(count_of(&pool, Attribute::HttpMethod, "GET").await, 2);
}
