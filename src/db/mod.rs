pub mod connection;
pub mod trades;
pub mod transactions;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub const INIT_SCHEMA: &str = r#"
-- Trades table: one row per trade leg, keyed by (tx_hash, evt_index).
CREATE TABLE IF NOT EXISTS trades (
    tx_hash TEXT NOT NULL,
    evt_index INTEGER NOT NULL,
    blockchain TEXT,
    project TEXT,
    version TEXT,
    block_month TEXT,
    block_date TEXT,
    block_time TEXT,
    block_number INTEGER,
    token_bought_symbol TEXT,
    token_sold_symbol TEXT,
    token_pair TEXT,
    token_bought_amount REAL,
    token_sold_amount REAL,
    token_bought_amount_raw REAL,
    token_sold_amount_raw REAL,
    amount_usd REAL,
    token_bought_address TEXT,
    token_sold_address TEXT,
    taker TEXT,
    maker TEXT,
    project_contract_address TEXT,
    tx_from TEXT,
    tx_to TEXT,
    PRIMARY KEY (tx_hash, evt_index)
);

-- Manual-entry transactions table, keyed by surrogate id.
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    blockchain TEXT,
    project TEXT,
    version TEXT,
    block_month TEXT,
    block_date TEXT,
    block_time TEXT,
    block_number INTEGER,
    token_bought_symbol TEXT,
    token_sold_symbol TEXT,
    token_bought_amount REAL,
    token_sold_amount REAL,
    amount_usd REAL,
    tx_hash TEXT,
    taker TEXT,
    maker TEXT
);

CREATE INDEX IF NOT EXISTS idx_trades_block_number ON trades(block_number);
"#;
