//! SQLite store behavior on an in-memory database.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::db::trades::{self, SqliteTradeStore, TradeStore};
use crate::db::transactions;
use crate::db::INIT_SCHEMA;
use crate::models::{ManualTransaction, TradeKey, TradeRowEdit};
use crate::service::reconcile::apply_batch;

/// In-memory SQLite lives per connection, so the pool is capped at one.
async fn setup() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    sqlx::raw_sql(INIT_SCHEMA)
        .execute(&pool)
        .await
        .expect("schema init");
    pool
}

fn key(tx_hash: &str, evt_index: i64) -> TradeKey {
    TradeKey {
        tx_hash: tx_hash.to_string(),
        evt_index,
    }
}

#[tokio::test]
async fn upsert_inserts_then_updates_without_duplicating() {
    let pool = setup().await;
    let store = SqliteTradeStore::new(pool.clone());

    let row: TradeRowEdit =
        serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"amount_usd":"100.5"}"#).unwrap();
    let record = row.clone().into_record(key("0xA", 0));
    store.upsert(&record).await.unwrap();

    let updated: TradeRowEdit =
        serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"amount_usd":"200"}"#).unwrap();
    store
        .upsert(&updated.into_record(key("0xA", 0)))
        .await
        .unwrap();

    let all = trades::get_all_trades(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount_usd, Some(200.0));
}

#[tokio::test]
async fn empty_string_amount_persists_as_sql_null() {
    let pool = setup().await;
    let store = SqliteTradeStore::new(pool.clone());

    let row: TradeRowEdit = serde_json::from_str(
        r#"{"tx_hash":"0xA","evt_index":0,"amount_usd":"","block_number":""}"#,
    )
    .unwrap();
    let outcome = apply_batch(&store, vec![row]).await;
    assert!(outcome.is_success());

    let raw = sqlx::query(
        "SELECT amount_usd IS NULL AS usd_null, block_number IS NULL AS block_null
         FROM trades WHERE tx_hash = '0xA' AND evt_index = 0",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(raw.get::<i64, _>("usd_null"), 1);
    assert_eq!(raw.get::<i64, _>("block_null"), 1);
}

#[tokio::test]
async fn deleting_an_absent_key_is_a_no_op() {
    let pool = setup().await;
    let store = SqliteTradeStore::new(pool.clone());

    store.delete(&key("0xGONE", 9)).await.unwrap();

    // Delete, then delete again: both succeed.
    let row: TradeRowEdit =
        serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0}"#).unwrap();
    store
        .upsert(&row.into_record(key("0xA", 0)))
        .await
        .unwrap();
    store.delete(&key("0xA", 0)).await.unwrap();
    store.delete(&key("0xA", 0)).await.unwrap();

    assert!(trades::get_all_trades(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_batch_against_sqlite_settles_every_row() {
    let pool = setup().await;
    let store = SqliteTradeStore::new(pool.clone());

    let rows: Vec<TradeRowEdit> = (0..20)
        .map(|i| {
            serde_json::from_str(&format!(
                r#"{{"tx_hash":"0xA","evt_index":{i},"amount_usd":{i}}}"#
            ))
            .unwrap()
        })
        .collect();

    let outcome = apply_batch(&store, rows).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.applied, 20);
    assert_eq!(trades::get_all_trades(&pool).await.unwrap().len(), 20);
}

#[tokio::test]
async fn manual_transaction_crud_roundtrip() {
    let pool = setup().await;

    let tx = ManualTransaction {
        blockchain: Some("ethereum".to_string()),
        project: Some("uniswap".to_string()),
        amount_usd: Some(42.0),
        ..Default::default()
    };
    let id = transactions::insert_transaction(&pool, &tx).await.unwrap();
    assert!(id > 0);

    let patch = ManualTransaction {
        amount_usd: Some(99.5),
        ..Default::default()
    };
    assert!(transactions::update_transaction(&pool, id, &patch)
        .await
        .unwrap());

    let row = sqlx::query("SELECT blockchain, amount_usd FROM transactions WHERE id = ?")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(row.get::<String, _>("blockchain"), "ethereum");
    assert_eq!(row.get::<f64, _>("amount_usd"), 99.5);

    assert!(transactions::delete_transaction(&pool, id).await.unwrap());
    assert!(!transactions::delete_transaction(&pool, id).await.unwrap());
}

#[tokio::test]
async fn update_of_missing_transaction_reports_not_found() {
    let pool = setup().await;
    let patch = ManualTransaction {
        project: Some("sushiswap".to_string()),
        ..Default::default()
    };
    assert!(!transactions::update_transaction(&pool, 12345, &patch)
        .await
        .unwrap());
}
