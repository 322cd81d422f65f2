// ==========================================
// Customer Analytics - domain model layer
// ==========================================
// Entities, value types, and the KPI contract shared by both engines.
// No data access, no engine logic.
// ==========================================

pub mod customer;
pub mod issue;
pub mod kpi;
pub mod order;
pub mod types;

pub use customer::{Customer, RawCustomerRecord};
pub use issue::{IssueKind, RunSummary, ValidationIssue};
pub use kpi::{
    average_cents, cents_to_decimal, DateWindow, KpiReport, MonthlyTrendRow, RegionalRevenueRow,
    RepeatCustomerRow, TopSpenderRow, TOP_SPENDERS_LIMIT, TOP_SPENDERS_WINDOW_DAYS,
};
pub use order::{Order, RawOrderRecord};
pub use types::Region;
