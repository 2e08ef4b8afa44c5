use crate::{
    api::{error::ApiError, response},
    db::{
        trades::{self, SqliteTradeStore},
        transactions,
    },
    models::{ManualTransaction, TradeRecord, TradeRowEdit},
    service::reconcile,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/trades", get(get_trades).put(put_trades))
        .route("/api/transactions", post(create_transaction))
        .route(
            "/api/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// GET /api/trades handler: the full table, no filtering or pagination.
async fn get_trades(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TradeRecord>>, ApiError> {
    let rows = trades::get_all_trades(&state.db_pool).await?;
    info!("Fetched {} trades", rows.len());
    Ok(Json(rows))
}

// PUT /api/trades handler: batch reconciliation. A non-array body is
// rejected by extraction before any store contact.
async fn put_trades(
    State(state): State<Arc<AppState>>,
    Json(rows): Json<Vec<TradeRowEdit>>,
) -> Result<Response, ApiError> {
    info!("Reconciling batch of {} trade rows", rows.len());

    let store = SqliteTradeStore::new(state.db_pool.clone());
    let outcome = reconcile::apply_batch(&store, rows).await;

    if outcome.is_success() {
        info!("Batch applied: {} rows", outcome.applied);
        Ok(response::message("Trades updated successfully"))
    } else {
        Err(ApiError::from_batch(&outcome))
    }
}

// POST /api/transactions handler
async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(tx): Json<ManualTransaction>,
) -> Result<Response, ApiError> {
    let id = transactions::insert_transaction(&state.db_pool, &tx).await?;
    info!("Inserted transaction {}", id);
    Ok(response::created(id))
}

// PUT /api/transactions/:id handler
async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<ManualTransaction>,
) -> Result<Response, ApiError> {
    if patch.is_empty_patch() {
        return Err(ApiError::BadRequest(
            "Update body must contain at least one field".to_string(),
        ));
    }

    let updated = transactions::update_transaction(&state.db_pool, id, &patch).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("No transaction with id {id}")));
    }

    info!("Updated transaction {}", id);
    Ok(response::message("Transaction updated"))
}

// DELETE /api/transactions/:id handler
async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let deleted = transactions::delete_transaction(&state.db_pool, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("No transaction with id {id}")));
    }

    info!("Deleted transaction {}", id);
    Ok(response::message("Transaction deleted"))
}
