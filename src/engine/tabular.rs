// ==========================================
// Customer Analytics - tabular engine
// ==========================================
// In-memory computation strategy: the four KPIs derived from columnar
// tables with select/group/join primitives. Stateless and pure; reads
// canonical entities, never the store. Aggregation runs in integer
// cents, so results are independent of input order, and every output
// is sorted by a total order from the KPI contract.
// ==========================================

use crate::domain::customer::Customer;
use crate::domain::kpi::{
    average_cents, cents_to_decimal, DateWindow, KpiReport, MonthlyTrendRow, RegionalRevenueRow,
    RepeatCustomerRow, TopSpenderRow, TOP_SPENDERS_LIMIT,
};
use crate::domain::order::Order;
use crate::domain::types::Region;
use crate::engine::table::{group_rows, CustomerTable, OrderAggregate, OrderTable};
use chrono::Datelike;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

// ==========================================
// TabularEngine
// ==========================================
pub struct TabularEngine;

impl TabularEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes all four KPIs. Empty inputs yield empty, well-formed
    /// result sets.
    pub fn compute(&self, customers: &[Customer], orders: &[Order], window: DateWindow) -> KpiReport {
        let customer_table = CustomerTable::from_rows(customers);
        let order_table = OrderTable::from_rows(orders);

        KpiReport {
            repeat_customers: self.repeat_customers(&customer_table, &order_table),
            monthly_trends: self.monthly_trends(&order_table),
            regional_revenue: self.regional_revenue(&customer_table, &order_table),
            top_spenders: self.top_spenders(&customer_table, &order_table, window),
        }
    }

    // ==========================================
    // KPI 1: Repeat Customers
    // ==========================================
    fn repeat_customers(
        &self,
        customers: &CustomerTable,
        orders: &OrderTable,
    ) -> Vec<RepeatCustomerRow> {
        let by_customer = group_rows(&orders.all_rows(), |row| orders.customer_id[row]);

        let mut rows: Vec<RepeatCustomerRow> = by_customer
            .into_iter()
            .filter(|(_, group)| group.len() > 1)
            .filter_map(|(customer_id, group)| {
                let row = customers.row_by_id(customer_id)?;
                Some(RepeatCustomerRow {
                    customer_id,
                    name: customers.name[row].clone(),
                    mobile_number: customers.mobile_number[row].clone(),
                    region: customers.region[row],
                    order_count: group.len() as i64,
                })
            })
            .collect();

        rows.sort_by_key(|row| (Reverse(row.order_count), row.customer_id));
        rows
    }

    // ==========================================
    // KPI 2: Monthly Order Trends
    // ==========================================
    fn monthly_trends(&self, orders: &OrderTable) -> Vec<MonthlyTrendRow> {
        let by_month = group_rows(&orders.all_rows(), |row| {
            let date = orders.order_date[row];
            (date.year(), date.month())
        });

        let mut rows: Vec<MonthlyTrendRow> = by_month
            .into_iter()
            .map(|((year, month), group)| {
                let agg = OrderAggregate::from_rows(orders, &group);
                MonthlyTrendRow {
                    year,
                    month,
                    order_count: agg.order_count,
                    total_revenue: cents_to_decimal(agg.total_cents),
                }
            })
            .collect();

        rows.sort_by_key(|row| (row.year, row.month));
        rows
    }

    // ==========================================
    // KPI 3: Regional Revenue
    // ==========================================
    fn regional_revenue(
        &self,
        customers: &CustomerTable,
        orders: &OrderTable,
    ) -> Vec<RegionalRevenueRow> {
        // Seed groups from the customer side so regions without orders
        // report zero rows, mirroring the store's LEFT JOIN.
        let mut buyers: HashMap<Region, HashSet<i64>> = HashMap::new();
        let mut aggregates: HashMap<Region, (i64, i64)> = HashMap::new();
        for &region in &customers.region {
            buyers.entry(region).or_default();
            aggregates.entry(region).or_default();
        }

        for row in 0..orders.len() {
            let customer_id = orders.customer_id[row];
            let Some(customer_row) = customers.row_by_id(customer_id) else {
                continue;
            };
            let region = customers.region[customer_row];
            buyers.entry(region).or_default().insert(customer_id);
            let (order_count, total_cents) = aggregates.entry(region).or_default();
            *order_count += 1;
            *total_cents += orders.amount_cents[row];
        }

        let mut rows: Vec<RegionalRevenueRow> = aggregates
            .into_iter()
            .map(|(region, (order_count, total_cents))| RegionalRevenueRow {
                region,
                customer_count: buyers[&region].len() as i64,
                order_count,
                total_revenue: cents_to_decimal(total_cents),
                avg_order_value: average_cents(total_cents, order_count),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_revenue
                .cmp(&a.total_revenue)
                .then_with(|| a.region.as_str().cmp(b.region.as_str()))
        });
        rows
    }

    // ==========================================
    // KPI 4: Top Customers by Spend (last 30 days)
    // ==========================================
    fn top_spenders(
        &self,
        customers: &CustomerTable,
        orders: &OrderTable,
        window: DateWindow,
    ) -> Vec<TopSpenderRow> {
        let in_window = orders.select(|row| window.contains(orders.order_date[row]));
        let by_customer = group_rows(&in_window, |row| orders.customer_id[row]);

        let mut rows: Vec<TopSpenderRow> = by_customer
            .into_iter()
            .filter_map(|(customer_id, group)| {
                let row = customers.row_by_id(customer_id)?;
                let agg = OrderAggregate::from_rows(orders, &group);
                Some(TopSpenderRow {
                    customer_id,
                    name: customers.name[row].clone(),
                    mobile_number: customers.mobile_number[row].clone(),
                    region: customers.region[row],
                    order_count: agg.order_count,
                    total_spent: cents_to_decimal(agg.total_cents),
                    avg_order_value: average_cents(agg.total_cents, agg.order_count),
                    // group is non-empty, so the max date exists
                    last_order_date: agg.last_order_date.unwrap_or(window.end),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_spent
                .cmp(&a.total_spent)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });
        rows.truncate(TOP_SPENDERS_LIMIT);
        rows
    }
}

impl Default for TabularEngine {
    fn default() -> Self {
        Self::new()
    }
}
