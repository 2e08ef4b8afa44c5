use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::db::StoreError;
use crate::models::{TradeKey, TradeRecord};

/// Store seam for the trades table. The reconciliation logic only sees this
/// trait, so it can run against an in-memory fake in tests.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Insert the row, or overwrite the non-key columns when the key exists.
    async fn upsert(&self, record: &TradeRecord) -> Result<(), StoreError>;

    /// Remove the row for this key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &TradeKey) -> Result<(), StoreError>;
}

pub struct SqliteTradeStore {
    pool: Pool<Sqlite>,
}

impl SqliteTradeStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TradeStore for SqliteTradeStore {
    async fn upsert(&self, record: &TradeRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO trades
                (tx_hash, evt_index, blockchain, project, version,
                 block_month, block_date, block_time, block_number,
                 token_bought_symbol, token_sold_symbol, token_pair,
                 token_bought_amount, token_sold_amount,
                 token_bought_amount_raw, token_sold_amount_raw, amount_usd,
                 token_bought_address, token_sold_address,
                 taker, maker, project_contract_address, tx_from, tx_to)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(tx_hash, evt_index) DO UPDATE SET
                blockchain = excluded.blockchain,
                project = excluded.project,
                version = excluded.version,
                block_month = excluded.block_month,
                block_date = excluded.block_date,
                block_time = excluded.block_time,
                block_number = excluded.block_number,
                token_bought_symbol = excluded.token_bought_symbol,
                token_sold_symbol = excluded.token_sold_symbol,
                token_pair = excluded.token_pair,
                token_bought_amount = excluded.token_bought_amount,
                token_sold_amount = excluded.token_sold_amount,
                token_bought_amount_raw = excluded.token_bought_amount_raw,
                token_sold_amount_raw = excluded.token_sold_amount_raw,
                amount_usd = excluded.amount_usd,
                token_bought_address = excluded.token_bought_address,
                token_sold_address = excluded.token_sold_address,
                taker = excluded.taker,
                maker = excluded.maker,
                project_contract_address = excluded.project_contract_address,
                tx_from = excluded.tx_from,
                tx_to = excluded.tx_to
            "#,
        )
        .bind(&record.tx_hash)
        .bind(record.evt_index)
        .bind(&record.blockchain)
        .bind(&record.project)
        .bind(&record.version)
        .bind(&record.block_month)
        .bind(&record.block_date)
        .bind(&record.block_time)
        .bind(record.block_number)
        .bind(&record.token_bought_symbol)
        .bind(&record.token_sold_symbol)
        .bind(&record.token_pair)
        .bind(record.token_bought_amount)
        .bind(record.token_sold_amount)
        .bind(record.token_bought_amount_raw)
        .bind(record.token_sold_amount_raw)
        .bind(record.amount_usd)
        .bind(&record.token_bought_address)
        .bind(&record.token_sold_address)
        .bind(&record.taker)
        .bind(&record.maker)
        .bind(&record.project_contract_address)
        .bind(&record.tx_from)
        .bind(&record.tx_to)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &TradeKey) -> Result<(), StoreError> {
        // Zero rows affected means the key was already gone; that is fine.
        sqlx::query("DELETE FROM trades WHERE tx_hash = ? AND evt_index = ?")
            .bind(&key.tx_hash)
            .bind(key.evt_index)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

pub async fn get_all_trades(pool: &Pool<Sqlite>) -> Result<Vec<TradeRecord>, sqlx::Error> {
    sqlx::query_as::<_, TradeRecord>(
        r#"SELECT tx_hash, evt_index, blockchain, project, version,
                  block_month, block_date, block_time, block_number,
                  token_bought_symbol, token_sold_symbol, token_pair,
                  token_bought_amount, token_sold_amount,
                  token_bought_amount_raw, token_sold_amount_raw, amount_usd,
                  token_bought_address, token_sold_address,
                  taker, maker, project_contract_address, tx_from, tx_to
           FROM trades"#,
    )
    .fetch_all(pool)
    .await
}
