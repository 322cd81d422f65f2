// ==========================================
// Customer Analytics - store interface
// ==========================================
// The seam between the query engine and whatever relational store backs
// it. One method per aggregate keeps every query parameterized and
// typed; a different store (server SQL, etc.) implements this trait and
// nothing else changes.
// ==========================================

use crate::domain::customer::Customer;
use crate::domain::kpi::{
    DateWindow, MonthlyTrendRow, RegionalRevenueRow, RepeatCustomerRow, TopSpenderRow,
};
use crate::domain::order::Order;
use crate::repository::error::StoreResult;
use async_trait::async_trait;

#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    // ===== load phase =====

    /// Drops and recreates the fixed schema. The store carries exactly
    /// one run's entities; no versioning.
    async fn reset_schema(&self) -> StoreResult<()>;

    async fn bulk_insert_customers(&self, customers: &[Customer]) -> StoreResult<usize>;

    async fn bulk_insert_orders(&self, orders: &[Order]) -> StoreResult<usize>;

    async fn count_customers(&self) -> StoreResult<i64>;

    async fn count_orders(&self) -> StoreResult<i64>;

    // ===== aggregate queries (KPI contract definitions) =====

    /// Customers with more than one order, ordered per the contract.
    async fn repeat_customers(&self) -> StoreResult<Vec<RepeatCustomerRow>>;

    /// Order count and revenue per (year, month), chronological.
    async fn monthly_order_trends(&self) -> StoreResult<Vec<MonthlyTrendRow>>;

    /// Per-region rollup over every region present among customers.
    async fn regional_revenue(&self) -> StoreResult<Vec<RegionalRevenueRow>>;

    /// Top spenders within the inclusive date window.
    async fn top_spenders(
        &self,
        window: DateWindow,
        limit: usize,
    ) -> StoreResult<Vec<TopSpenderRow>>;
}
