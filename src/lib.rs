// ==========================================
// Customer Analytics - core library
// ==========================================
// Ingests customer (CSV) and order (XML) records, canonicalizes them,
// and computes four business KPIs through two independent strategies —
// a SQL query engine over a relational store and an in-memory tabular
// engine — whose outputs must agree.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities, types, KPI contract
pub mod domain;

// Store layer - relational persistence and aggregate queries
pub mod repository;

// Engine layer - canonicalization and the two KPI strategies
pub mod engine;

// Ingestion layer - external file parsing
pub mod importer;

// Configuration layer - run settings
pub mod config;

// Database infrastructure (connection setup / uniform PRAGMAs)
pub mod db;

// Logging setup
pub mod logging;

// Result writers
pub mod report;

// Application layer - run orchestration
pub mod app;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain types
pub use domain::types::Region;

// Domain entities
pub use domain::{Customer, IssueKind, Order, RunSummary, ValidationIssue};

// KPI contract
pub use domain::{
    DateWindow, KpiReport, MonthlyTrendRow, RegionalRevenueRow, RepeatCustomerRow, TopSpenderRow,
};

// Engines
pub use engine::{Canonicalizer, QueryEngine, TabularEngine};

// Store
pub use repository::{AnalyticsStore, SqliteStore};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "customer-analytics";
