// ==========================================
// Customer Analytics - columnar table primitives
// ==========================================
// Column-oriented projections of the canonical entities plus the small
// relational-algebra toolkit (select, group, join-by-lookup) the
// tabular engine composes its KPIs from. Tables are built once per run
// and never mutated; row indices are the currency between operations.
// ==========================================

use crate::domain::customer::Customer;
use crate::domain::order::Order;
use crate::domain::types::Region;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::hash::Hash;

// ==========================================
// CustomerTable
// ==========================================
#[derive(Debug, Clone)]
pub struct CustomerTable {
    pub customer_id: Vec<i64>,
    pub name: Vec<String>,
    pub mobile_number: Vec<Option<String>>,
    pub region: Vec<Region>,
    index_by_id: HashMap<i64, usize>,
}

impl CustomerTable {
    pub fn from_rows(customers: &[Customer]) -> Self {
        let mut table = Self {
            customer_id: Vec::with_capacity(customers.len()),
            name: Vec::with_capacity(customers.len()),
            mobile_number: Vec::with_capacity(customers.len()),
            region: Vec::with_capacity(customers.len()),
            index_by_id: HashMap::with_capacity(customers.len()),
        };

        for customer in customers {
            table.index_by_id.insert(customer.customer_id, table.customer_id.len());
            table.customer_id.push(customer.customer_id);
            table.name.push(customer.name.clone());
            table.mobile_number.push(customer.mobile_number.clone());
            table.region.push(customer.region);
        }

        table
    }

    pub fn len(&self) -> usize {
        self.customer_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty()
    }

    /// Hash-join lookup: customer_id -> row index.
    pub fn row_by_id(&self, customer_id: i64) -> Option<usize> {
        self.index_by_id.get(&customer_id).copied()
    }
}

// ==========================================
// OrderTable
// ==========================================
#[derive(Debug, Clone)]
pub struct OrderTable {
    pub order_id: Vec<i64>,
    pub customer_id: Vec<i64>,
    pub order_date: Vec<NaiveDate>,
    pub amount_cents: Vec<i64>,
}

impl OrderTable {
    pub fn from_rows(orders: &[Order]) -> Self {
        let mut table = Self {
            order_id: Vec::with_capacity(orders.len()),
            customer_id: Vec::with_capacity(orders.len()),
            order_date: Vec::with_capacity(orders.len()),
            amount_cents: Vec::with_capacity(orders.len()),
        };

        for order in orders {
            table.order_id.push(order.order_id);
            table.customer_id.push(order.customer_id);
            table.order_date.push(order.order_date);
            table.amount_cents.push(order.amount_cents);
        }

        table
    }

    pub fn len(&self) -> usize {
        self.order_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_id.is_empty()
    }

    /// Row indices of every order.
    pub fn all_rows(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    /// Selection: row indices whose columns satisfy the predicate.
    pub fn select<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(usize) -> bool,
    {
        (0..self.len()).filter(|&row| predicate(row)).collect()
    }
}

// ==========================================
// Grouping
// ==========================================

/// Groups row indices by a key function. Iteration order of the result
/// is unspecified; callers sort their output per the KPI contract.
pub fn group_rows<K, F>(rows: &[usize], key_of: F) -> HashMap<K, Vec<usize>>
where
    K: Eq + Hash,
    F: Fn(usize) -> K,
{
    let mut groups: HashMap<K, Vec<usize>> = HashMap::new();
    for &row in rows {
        groups.entry(key_of(row)).or_default().push(row);
    }
    groups
}

/// Per-group order aggregate: count, exact cent sum, max date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderAggregate {
    pub order_count: i64,
    pub total_cents: i64,
    pub last_order_date: Option<NaiveDate>,
}

impl OrderAggregate {
    pub fn from_rows(table: &OrderTable, rows: &[usize]) -> Self {
        let mut agg = Self::default();
        for &row in rows {
            agg.order_count += 1;
            agg.total_cents += table.amount_cents[row];
            let date = table.order_date[row];
            agg.last_order_date = Some(match agg.last_order_date {
                Some(latest) if latest >= date => latest,
                _ => date,
            });
        }
        agg
    }
}
