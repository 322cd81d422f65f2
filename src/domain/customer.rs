// ==========================================
// Customer Analytics - customer domain model
// ==========================================
// Written once by the canonicalizer, read-only for both engines.
// ==========================================

use crate::domain::types::Region;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Customer - canonical customer entity
// ==========================================
// Invariant: mobile_number is either exactly the configured number of
// digits or None; it is never a raw unvalidated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    // ===== Primary key =====
    pub customer_id: i64,

    // ===== Identity =====
    pub name: String,                  // trimmed, whitespace-collapsed, title-cased
    pub mobile_number: Option<String>, // fixed-length digit string or None

    // ===== Segmentation =====
    pub region: Region,

    // ===== Audit =====
    pub created_at: DateTime<Utc>, // source value, or the run timestamp when absent
}

// ==========================================
// RawCustomerRecord - ingestion intermediate
// ==========================================
// Produced by the field mapper from an untyped header->value map.
// Nothing here is trusted; the canonicalizer is the single boundary
// where types become reliable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCustomerRecord {
    pub customer_id: Option<String>,
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub region: Option<String>,
    pub created_at: Option<String>,

    /// 1-based source row (header excluded), for issue reporting.
    pub row_number: usize,
}
