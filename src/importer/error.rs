// ==========================================
// Customer Analytics - ingestion error types
// ==========================================

use thiserror::Error;

/// Ingestion layer errors.
///
/// These are run-level failures of a whole source file. Per-record
/// problems are not errors here; they surface later as validation
/// issues from the canonicalizer.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse failed: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("XML parse failed at byte {position}: {message}")]
    XmlParse { position: u64, message: String },
}

pub type IngestResult<T> = Result<T, IngestError>;
