// ==========================================
// Customer Analytics - query engine
// ==========================================
// Store-backed computation strategy: the four KPIs via declarative
// aggregate queries against the AnalyticsStore. Stateless per
// invocation. Transient store failures are retried a bounded number of
// times with exponential backoff, then surfaced as a fatal engine
// error; deterministic failures are not retried.
// ==========================================

use crate::config::settings::RetryPolicy;
use crate::domain::customer::Customer;
use crate::domain::kpi::{DateWindow, KpiReport, TOP_SPENDERS_LIMIT, TOP_SPENDERS_WINDOW_DAYS};
use crate::domain::order::Order;
use crate::engine::error::EngineError;
use crate::repository::analytics_repo::AnalyticsStore;
use crate::repository::error::StoreResult;
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;

// ==========================================
// QueryEngine
// ==========================================
pub struct QueryEngine {
    store: Arc<dyn AnalyticsStore>,
    retry: RetryPolicy,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn AnalyticsStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Load phase: reset the schema and persist the canonical entities.
    /// The store holds exactly one run's data.
    pub async fn load(&self, customers: &[Customer], orders: &[Order]) -> Result<(), EngineError> {
        self.with_retry("reset_schema", || self.store.reset_schema())
            .await?;

        let inserted_customers = self
            .with_retry("bulk_insert_customers", || {
                self.store.bulk_insert_customers(customers)
            })
            .await?;
        let inserted_orders = self
            .with_retry("bulk_insert_orders", || self.store.bulk_insert_orders(orders))
            .await?;

        tracing::info!(
            customers = inserted_customers,
            orders = inserted_orders,
            "store loaded"
        );
        Ok(())
    }

    /// Query phase: all four KPIs for the given run date. An empty
    /// store produces empty, well-formed result sets.
    pub async fn compute(&self, run_date: NaiveDate) -> Result<KpiReport, EngineError> {
        let window = DateWindow::trailing(run_date, TOP_SPENDERS_WINDOW_DAYS);

        let repeat_customers = self
            .with_retry("repeat_customers", || self.store.repeat_customers())
            .await?;
        let monthly_trends = self
            .with_retry("monthly_order_trends", || self.store.monthly_order_trends())
            .await?;
        let regional_revenue = self
            .with_retry("regional_revenue", || self.store.regional_revenue())
            .await?;
        let top_spenders = self
            .with_retry("top_spenders", || {
                self.store.top_spenders(window, TOP_SPENDERS_LIMIT)
            })
            .await?;

        Ok(KpiReport {
            repeat_customers,
            monthly_trends,
            regional_revenue,
            top_spenders,
        })
    }

    // ==========================================
    // Bounded retry with exponential backoff
    // ==========================================
    async fn with_retry<T, F, Fut>(&self, operation: &'static str, call: F) -> Result<T, EngineError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.base_delay * 2u32.saturating_pow(attempt - 1);
                    tracing::warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient store failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) if err.is_transient() => {
                    return Err(EngineError::StoreUnavailable {
                        operation: operation.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }
                Err(err) => return Err(EngineError::Store(err)),
            }
        }
    }
}
