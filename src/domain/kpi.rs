// ==========================================
// Customer Analytics - KPI contract
// ==========================================
// Single source of truth for the four KPI definitions. Both computation
// engines produce these row types with these orderings; neither engine
// is the other's oracle.
//
// Orderings:
// - repeat customers: order_count DESC, customer_id ASC
// - monthly trends:   (year, month) ASC
// - regional revenue: total_revenue DESC, region name ASC
// - top spenders:     total_spent DESC, customer_id ASC, limit 10
// ==========================================

use crate::domain::types::Region;
use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Trailing window length for the top-spenders KPI, in days.
pub const TOP_SPENDERS_WINDOW_DAYS: i64 = 30;

/// Result cap for the top-spenders KPI.
pub const TOP_SPENDERS_LIMIT: usize = 10;

// ==========================================
// DateWindow - inclusive calendar-date range
// ==========================================
// Both bounds are inclusive: an order dated exactly `start` or exactly
// `end` belongs to the window. Dates are naive calendar dates in the
// single canonical zone (UTC) fixed at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window of the `days` days up to and including `end`.
    pub fn trailing(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ==========================================
// Money helpers shared by both engines
// ==========================================

/// Integer minor units -> exact decimal currency value.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// `total / count` at 2 decimal places, midpoint away from zero.
/// An empty group yields zero rather than a division error; this is the
/// contract's answer to the order_count = 0 edge in regional revenue.
pub fn average_cents(total_cents: i64, count: i64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (cents_to_decimal(total_cents) / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ==========================================
// KPI 1: Repeat Customers
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatCustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub mobile_number: Option<String>,
    pub region: Region,
    pub order_count: i64,
}

// ==========================================
// KPI 2: Monthly Order Trends
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrendRow {
    pub year: i32,
    pub month: u32,
    pub order_count: i64,
    pub total_revenue: Decimal,
}

// ==========================================
// KPI 3: Regional Revenue
// ==========================================
// Covers every region present among canonical customers; a region whose
// customers placed no orders appears with zero counts and zero average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalRevenueRow {
    pub region: Region,
    pub customer_count: i64,
    pub order_count: i64,
    pub total_revenue: Decimal,
    pub avg_order_value: Decimal,
}

// ==========================================
// KPI 4: Top Customers by Spend (last 30 days)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSpenderRow {
    pub customer_id: i64,
    pub name: String,
    pub mobile_number: Option<String>,
    pub region: Region,
    pub order_count: i64,
    pub total_spent: Decimal,
    pub avg_order_value: Decimal,
    /// Max order_date within the filtered window.
    pub last_order_date: NaiveDate,
}

// ==========================================
// KpiReport - one engine's full result set
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiReport {
    pub repeat_customers: Vec<RepeatCustomerRow>,
    pub monthly_trends: Vec<MonthlyTrendRow>,
    pub regional_revenue: Vec<RegionalRevenueRow>,
    pub top_spenders: Vec<TopSpenderRow>,
}
