// ==========================================
// Customer Analytics - engine layer error types
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Query engine errors. Fatal for the query path only; the tabular
/// path has no store and cannot fail this way.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("store operation {operation} failed after {attempts} attempts: {source}")]
    StoreUnavailable {
        operation: String,
        attempts: u32,
        #[source]
        source: RepositoryError,
    },

    #[error(transparent)]
    Store(#[from] RepositoryError),
}
