// ==========================================
// Customer Analytics - engine layer
// ==========================================
// Business computation: canonicalization rules and the two KPI
// strategies. Engines are stateless per invocation; the query engine
// is the only one that talks to the store.
// ==========================================

pub mod canonicalizer;
pub mod error;
pub mod query;
pub mod reconcile;
pub mod table;
pub mod tabular;

pub use canonicalizer::{CanonicalBatch, Canonicalizer};
pub use error::EngineError;
pub use query::QueryEngine;
pub use reconcile::{compare_reports, KpiDivergence};
pub use table::{CustomerTable, OrderTable};
pub use tabular::TabularEngine;
