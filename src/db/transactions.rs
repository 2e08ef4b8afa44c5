use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::models::ManualTransaction;

/// Inserts one manual-entry row and returns its surrogate id.
pub async fn insert_transaction(
    pool: &Pool<Sqlite>,
    tx: &ManualTransaction,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO transactions
            (blockchain, project, version, block_month, block_date, block_time,
             block_number, token_bought_symbol, token_sold_symbol,
             token_bought_amount, token_sold_amount, amount_usd,
             tx_hash, taker, maker)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&tx.blockchain)
    .bind(&tx.project)
    .bind(&tx.version)
    .bind(&tx.block_month)
    .bind(&tx.block_date)
    .bind(&tx.block_time)
    .bind(tx.block_number)
    .bind(&tx.token_bought_symbol)
    .bind(&tx.token_sold_symbol)
    .bind(tx.token_bought_amount)
    .bind(tx.token_sold_amount)
    .bind(tx.amount_usd)
    .bind(&tx.tx_hash)
    .bind(&tx.taker)
    .bind(&tx.maker)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Applies the present fields of the patch to the row matching `id`.
/// Returns false when no row matched. Callers reject empty patches up
/// front; an empty patch reaching this point is a protocol error.
pub async fn update_transaction(
    pool: &Pool<Sqlite>,
    id: i64,
    patch: &ManualTransaction,
) -> Result<bool, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE transactions SET ");
    let mut fields = builder.separated(", ");
    let mut any = false;

    macro_rules! set_field {
        ($name:literal, $value:expr) => {
            if let Some(v) = $value {
                fields.push(concat!($name, " = "));
                fields.push_bind_unseparated(v);
                any = true;
            }
        };
    }

    set_field!("blockchain", &patch.blockchain);
    set_field!("project", &patch.project);
    set_field!("version", &patch.version);
    set_field!("block_month", &patch.block_month);
    set_field!("block_date", &patch.block_date);
    set_field!("block_time", &patch.block_time);
    set_field!("block_number", patch.block_number);
    set_field!("token_bought_symbol", &patch.token_bought_symbol);
    set_field!("token_sold_symbol", &patch.token_sold_symbol);
    set_field!("token_bought_amount", patch.token_bought_amount);
    set_field!("token_sold_amount", patch.token_sold_amount);
    set_field!("amount_usd", patch.amount_usd);
    set_field!("tx_hash", &patch.tx_hash);
    set_field!("taker", &patch.taker);
    set_field!("maker", &patch.maker);

    drop(fields);

    if !any {
        return Err(sqlx::Error::Protocol(
            "update requires at least one field".to_string(),
        ));
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Returns false when no row matched the id.
pub async fn delete_transaction(pool: &Pool<Sqlite>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
