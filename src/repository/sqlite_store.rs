// ==========================================
// Customer Analytics - SQLite store implementation
// ==========================================
// Owns the fixed relational schema and the aggregate SQL behind the
// query engine. No business decisions here beyond the contract's query
// definitions; everything is parameterized.
//
// Semantics pinned against the tabular engine:
// - order_date is ISO-8601 TEXT, so BETWEEN is chronological and the
//   window bounds are inclusive on both ends
// - amounts are INTEGER cents, so SUM is exact
// - ratio columns are derived from (sum, count) in the row mappers via
//   the shared contract helper; SQL never divides
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::customer::Customer;
use crate::domain::kpi::{
    average_cents, cents_to_decimal, DateWindow, MonthlyTrendRow, RegionalRevenueRow,
    RepeatCustomerRow, TopSpenderRow,
};
use crate::domain::order::Order;
use crate::domain::types::Region;
use crate::repository::analytics_repo::AnalyticsStore;
use crate::repository::error::{RepositoryError, StoreResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const SCHEMA_SQL: &str = r#"
DROP TABLE IF EXISTS orders;
DROP TABLE IF EXISTS customers;

CREATE TABLE customers (
    customer_id   INTEGER PRIMARY KEY,
    name          TEXT NOT NULL,
    mobile_number TEXT,
    region        TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE orders (
    order_id     INTEGER PRIMARY KEY,
    customer_id  INTEGER NOT NULL REFERENCES customers(customer_id),
    order_date   TEXT NOT NULL,
    amount_cents INTEGER NOT NULL CHECK (amount_cents >= 0),
    status       TEXT
);

CREATE INDEX idx_orders_customer_id ON orders(customer_id);
CREATE INDEX idx_orders_order_date ON orders(order_date);
"#;

// ==========================================
// SqliteStore
// ==========================================
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file with the uniform PRAGMAs.
    pub fn new(db_path: &Path) -> StoreResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wraps an existing connection; reapplies the uniform PRAGMAs so
    /// behavior matches connections opened here (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> StoreResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Row mappers
    // ==========================================

    fn map_repeat_customer(row: &Row<'_>) -> SqliteResult<RepeatCustomerRow> {
        Ok(RepeatCustomerRow {
            customer_id: row.get(0)?,
            name: row.get(1)?,
            mobile_number: row.get(2)?,
            region: parse_region_column(row, 3)?,
            order_count: row.get(4)?,
        })
    }

    fn map_monthly_trend(row: &Row<'_>) -> SqliteResult<MonthlyTrendRow> {
        let month: i64 = row.get(1)?;
        Ok(MonthlyTrendRow {
            year: row.get::<_, i64>(0)? as i32,
            month: month as u32,
            order_count: row.get(2)?,
            total_revenue: cents_to_decimal(row.get(3)?),
        })
    }

    fn map_regional_revenue(row: &Row<'_>) -> SqliteResult<RegionalRevenueRow> {
        let order_count: i64 = row.get(2)?;
        let total_cents: i64 = row.get(3)?;
        Ok(RegionalRevenueRow {
            region: parse_region_column(row, 0)?,
            customer_count: row.get(1)?,
            order_count,
            total_revenue: cents_to_decimal(total_cents),
            avg_order_value: average_cents(total_cents, order_count),
        })
    }

    fn map_top_spender(row: &Row<'_>) -> SqliteResult<TopSpenderRow> {
        let order_count: i64 = row.get(4)?;
        let total_cents: i64 = row.get(5)?;
        Ok(TopSpenderRow {
            customer_id: row.get(0)?,
            name: row.get(1)?,
            mobile_number: row.get(2)?,
            region: parse_region_column(row, 3)?,
            order_count,
            total_spent: cents_to_decimal(total_cents),
            avg_order_value: average_cents(total_cents, order_count),
            last_order_date: row.get(6)?,
        })
    }
}

/// The region column holds canonical names written by this store; any
/// other value is corruption, surfaced as a conversion failure.
fn parse_region_column(row: &Row<'_>, index: usize) -> SqliteResult<Region> {
    let value: String = row.get(index)?;
    value.parse::<Region>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

#[async_trait]
impl AnalyticsStore for SqliteStore {
    async fn reset_schema(&self) -> StoreResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        tracing::debug!("store schema reset");
        Ok(())
    }

    async fn bulk_insert_customers(&self, customers: &[Customer]) -> StoreResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for customer in customers {
            tx.execute(
                r#"
                INSERT INTO customers (customer_id, name, mobile_number, region, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    customer.customer_id,
                    customer.name,
                    customer.mobile_number,
                    customer.region.as_str(),
                    customer.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ],
            )?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    async fn bulk_insert_orders(&self, orders: &[Order]) -> StoreResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for order in orders {
            tx.execute(
                r#"
                INSERT INTO orders (order_id, customer_id, order_date, amount_cents, status)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    order.order_id,
                    order.customer_id,
                    order.order_date,
                    order.amount_cents,
                    order.status,
                ],
            )?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    async fn count_customers(&self) -> StoreResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
        Ok(count)
    }

    async fn count_orders(&self) -> StoreResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(count)
    }

    async fn repeat_customers(&self) -> StoreResult<Vec<RepeatCustomerRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.customer_id, c.name, c.mobile_number, c.region,
                   COUNT(o.order_id) AS order_count
            FROM customers c
            JOIN orders o ON o.customer_id = c.customer_id
            GROUP BY c.customer_id, c.name, c.mobile_number, c.region
            HAVING COUNT(o.order_id) > 1
            ORDER BY order_count DESC, c.customer_id ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], Self::map_repeat_customer)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    async fn monthly_order_trends(&self) -> StoreResult<Vec<MonthlyTrendRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT CAST(strftime('%Y', o.order_date) AS INTEGER) AS year,
                   CAST(strftime('%m', o.order_date) AS INTEGER) AS month,
                   COUNT(*) AS order_count,
                   SUM(o.amount_cents) AS total_revenue_cents
            FROM orders o
            GROUP BY year, month
            ORDER BY year ASC, month ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], Self::map_monthly_trend)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    async fn regional_revenue(&self) -> StoreResult<Vec<RegionalRevenueRow>> {
        let conn = self.get_conn()?;
        // LEFT JOIN from customers so a region whose customers placed no
        // orders still reports a zero row.
        let mut stmt = conn.prepare(
            r#"
            SELECT c.region,
                   COUNT(DISTINCT CASE WHEN o.order_id IS NOT NULL
                                       THEN c.customer_id END) AS customer_count,
                   COUNT(o.order_id) AS order_count,
                   COALESCE(SUM(o.amount_cents), 0) AS total_revenue_cents
            FROM customers c
            LEFT JOIN orders o ON o.customer_id = c.customer_id
            GROUP BY c.region
            ORDER BY total_revenue_cents DESC, c.region ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], Self::map_regional_revenue)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    async fn top_spenders(
        &self,
        window: DateWindow,
        limit: usize,
    ) -> StoreResult<Vec<TopSpenderRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.customer_id, c.name, c.mobile_number, c.region,
                   COUNT(o.order_id) AS order_count,
                   SUM(o.amount_cents) AS total_spent_cents,
                   MAX(o.order_date) AS last_order_date
            FROM customers c
            JOIN orders o ON o.customer_id = c.customer_id
            WHERE o.order_date BETWEEN ?1 AND ?2
            GROUP BY c.customer_id, c.name, c.mobile_number, c.region
            ORDER BY total_spent_cents DESC, c.customer_id ASC
            LIMIT ?3
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![window.start, window.end, limit as i64],
                Self::map_top_spender,
            )?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }
}
