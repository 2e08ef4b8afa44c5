pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod service;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use api::error::ApiError;
pub use api::route::create_router;
pub use db::connection;
pub use db::trades::{SqliteTradeStore, TradeStore};
pub use models::{ManualTransaction, TradeKey, TradeRecord, TradeRowEdit};
pub use service::reconcile::{apply_batch, BatchOutcome, RowFailure};
pub use state::AppState;
