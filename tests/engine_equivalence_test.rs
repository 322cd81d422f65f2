// ==========================================
// Cross-engine equivalence tests
// ==========================================
// The global invariant: for any canonical dataset, both engines
// produce identical rows in identical order for all four KPIs. Checked
// end-to-end from messy raw input and under input permutations.
// ==========================================


use customer_analytics::config::settings::CleaningRules;
use customer_analytics::domain::customer::Customer;
use customer_analytics::domain::kpi::{DateWindow, KpiReport, TOP_SPENDERS_WINDOW_DAYS};
use customer_analytics::domain::order::Order;
use customer_analytics::engine::canonicalizer::Canonicalizer;
use customer_analytics::engine::query::QueryEngine;
use customer_analytics::engine::reconcile::compare_reports;
use customer_analytics::engine::tabular::TabularEngine;
use customer_analytics::repository::sqlite_store::SqliteStore;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_helpers::{
    fixture_customers, fixture_orders, raw_customer, raw_order, run_date, run_timestamp,
};

async fn query_report(customers: &[Customer], orders: &[Order]) -> KpiReport {
    let temp_file = NamedTempFile::new().unwrap();
    let store = SqliteStore::new(temp_file.path()).unwrap();
    let engine = QueryEngine::new(Arc::new(store), Default::default());

    engine.load(customers, orders).await.unwrap();
    engine.compute(run_date()).await.unwrap()
}

fn tabular_report(customers: &[Customer], orders: &[Order]) -> KpiReport {
    let window = DateWindow::trailing(run_date(), TOP_SPENDERS_WINDOW_DAYS);
    TabularEngine::new().compute(customers, orders, window)
}

#[tokio::test]
async fn test_engines_agree_on_fixture_dataset() {
    let customers = fixture_customers();
    let orders = fixture_orders();

    let tabular = tabular_report(&customers, &orders);
    let query = query_report(&customers, &orders).await;

    let divergences = compare_reports(&tabular, &query);
    assert!(divergences.is_empty(), "divergences: {:?}", divergences);
}

#[tokio::test]
async fn test_engines_agree_on_empty_dataset() {
    let tabular = tabular_report(&[], &[]);
    let query = query_report(&[], &[]).await;

    assert!(compare_reports(&tabular, &query).is_empty());
    assert_eq!(tabular, KpiReport::default());
}

#[tokio::test]
async fn test_engines_agree_under_input_permutation() {
    let mut customers = fixture_customers();
    let mut orders = fixture_orders();
    customers.reverse();
    orders.reverse();

    let tabular = tabular_report(&customers, &orders);
    let query = query_report(&customers, &orders).await;

    let divergences = compare_reports(&tabular, &query);
    assert!(divergences.is_empty(), "divergences: {:?}", divergences);

    // and permutation changed nothing against the original order
    assert_eq!(tabular, tabular_report(&fixture_customers(), &fixture_orders()));
}

#[tokio::test]
async fn test_engines_agree_from_messy_raw_input() {
    // Raw input exercising every cleaning rule: synonym regions, bad
    // mobiles, mixed date formats, rejects, duplicates, orphans.
    let raw_customers = vec![
        raw_customer(1, Some("1"), Some("  amit   sharma "), Some("98765 43210"), Some("north")),
        raw_customer(2, Some("2"), Some("BEENA RAO"), Some("+91 9876543210"), Some("south india")),
        raw_customer(3, Some("3"), Some("chetan patel"), None, Some("Atlantis")),
        raw_customer(4, Some("3"), Some("dup chetan"), None, Some("west")),
        raw_customer(5, None, Some("ghost"), None, Some("east")),
    ];
    let raw_orders = vec![
        raw_order(1, Some("10"), Some("1"), Some("2024-03-05"), Some("100.50")),
        raw_order(2, Some("11"), Some("1"), Some("10/03/2024"), Some("1,200")),
        raw_order(3, Some("12"), Some("2"), Some("15-03-2024"), Some("49.995")),
        raw_order(4, Some("13"), Some("3"), Some("2024/03/20"), Some("75")),
        raw_order(5, Some("14"), Some("99"), Some("2024-03-21"), Some("10")), // orphan
        raw_order(6, Some("15"), Some("2"), Some("someday"), Some("10")),     // bad date
        raw_order(7, Some("16"), Some("2"), Some("2024-03-22"), Some("-4")),  // bad amount
        raw_order(8, Some("12"), Some("2"), Some("2024-03-23"), Some("99")),  // duplicate id
    ];

    let canonicalizer = Canonicalizer::new(CleaningRules::default(), run_timestamp());
    let batch = canonicalizer.canonicalize(&raw_customers, &raw_orders);

    // sanity: rejects really were rejected
    assert_eq!(batch.customers.len(), 3);
    assert_eq!(batch.orders.len(), 4);

    let tabular = tabular_report(&batch.customers, &batch.orders);
    let query = query_report(&batch.customers, &batch.orders).await;

    let divergences = compare_reports(&tabular, &query);
    assert!(divergences.is_empty(), "divergences: {:?}", divergences);

    // spot-check one cleaned value made it through both pipelines:
    // only customer 1 keeps two orders after the rejects
    let repeat = &tabular.repeat_customers;
    assert_eq!(repeat.len(), 1);
    assert_eq!(repeat[0].customer_id, 1);
    assert_eq!(repeat[0].name, "Amit Sharma");
    assert_eq!(repeat[0].mobile_number.as_deref(), Some("9876543210"));
}
