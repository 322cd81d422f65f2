// ==========================================
// Customer Analytics - order domain model
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - canonical order entity
// ==========================================
// Invariants:
// - customer_id references a canonical Customer (checked at
//   canonicalization, not left to the store)
// - amount_cents >= 0
// - order_date is a valid calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    // ===== Primary key =====
    pub order_id: i64,

    // ===== Foreign key =====
    pub customer_id: i64,

    // ===== Facts =====
    pub order_date: NaiveDate,
    pub amount_cents: i64,      // minor units; sums stay exact in both engines
    pub status: Option<String>, // categorical passthrough, trimmed
}

// ==========================================
// RawOrderRecord - ingestion intermediate
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOrderRecord {
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub order_date: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,

    /// 1-based position of the <order> element in the source document.
    pub row_number: usize,
}
