// ==========================================
// Customer Analytics - store layer error types
// ==========================================

use thiserror::Error;

/// Relational store errors.
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== connectivity (transient, retried by the query engine) =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database busy: {0}")]
    DatabaseBusy(String),

    #[error("connection lock failed: {0}")]
    LockError(String),

    // ===== database =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    // ===== row mapping =====
    #[error("row mapping failed (column {column}): {message}")]
    RowMappingError { column: String, message: String },

    // ===== generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// Connectivity-class failures worth retrying with backoff.
    /// Constraint violations and mapping errors are deterministic and
    /// are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RepositoryError::DatabaseConnectionError(_)
                | RepositoryError::DatabaseBusy(_)
                | RepositoryError::LockError(_)
        )
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg) => {
                let detail = msg.clone().unwrap_or_else(|| code.to_string());
                match code.code {
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                        RepositoryError::DatabaseBusy(detail)
                    }
                    rusqlite::ErrorCode::CannotOpen | rusqlite::ErrorCode::NotADatabase => {
                        RepositoryError::DatabaseConnectionError(detail)
                    }
                    rusqlite::ErrorCode::ConstraintViolation => {
                        if detail.contains("UNIQUE") {
                            RepositoryError::UniqueConstraintViolation(detail)
                        } else if detail.contains("FOREIGN KEY") {
                            RepositoryError::ForeignKeyViolation(detail)
                        } else {
                            RepositoryError::DatabaseQueryError(detail)
                        }
                    }
                    _ => RepositoryError::DatabaseQueryError(detail),
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result alias for the store layer.
pub type StoreResult<T> = Result<T, RepositoryError>;
