// ==========================================
// Customer Analytics - relational store layer
// ==========================================
// Data access only; the KPI definitions it encodes come from the
// contract in domain::kpi. All queries are parameterized.
// ==========================================

pub mod analytics_repo;
pub mod error;
pub mod sqlite_store;

pub use analytics_repo::AnalyticsStore;
pub use error::{RepositoryError, StoreResult};
pub use sqlite_store::SqliteStore;
