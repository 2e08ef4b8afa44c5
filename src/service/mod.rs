pub mod reconcile;

pub use reconcile::{apply_batch, BatchOutcome, RowFailure};
