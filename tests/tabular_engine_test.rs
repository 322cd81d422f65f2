// ==========================================
// Tabular engine tests
// ==========================================
// Each KPI checked against the golden values in test_helpers; the
// query engine is tested against the same goldens separately, so
// neither engine validates the other.
// ==========================================


use customer_analytics::domain::kpi::{DateWindow, TOP_SPENDERS_WINDOW_DAYS};
use customer_analytics::domain::types::Region;
use customer_analytics::engine::tabular::TabularEngine;
use rust_decimal_macros::dec;
use test_helpers::{customer, date, fixture_customers, fixture_orders, order, run_date};

fn window() -> DateWindow {
    DateWindow::trailing(run_date(), TOP_SPENDERS_WINDOW_DAYS)
}

#[test]
fn test_repeat_customers_golden() {
    let report = TabularEngine::new().compute(&fixture_customers(), &fixture_orders(), window());

    let rows = &report.repeat_customers;
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].customer_id, 1);
    assert_eq!(rows[0].name, "Amit Sharma");
    assert_eq!(rows[0].mobile_number.as_deref(), Some("9876543210"));
    assert_eq!(rows[0].region, Region::North);
    assert_eq!(rows[0].order_count, 3);

    // equal counts fall back to customer_id ascending
    assert_eq!(rows[1].customer_id, 2);
    assert_eq!(rows[1].order_count, 2);
    assert_eq!(rows[2].customer_id, 3);
    assert_eq!(rows[2].order_count, 2);
}

#[test]
fn test_repeat_customer_boundary_two_orders() {
    let customers = vec![
        customer(1, "One Order", None, Region::North),
        customer(2, "Two Orders", None, Region::North),
    ];
    let orders = vec![
        order(10, 1, date(2024, 1, 1), 1_000),
        order(11, 2, date(2024, 1, 1), 1_000),
        order(12, 2, date(2024, 1, 2), 1_000),
    ];

    let report = TabularEngine::new().compute(&customers, &orders, window());

    // exactly 2 orders qualifies, exactly 1 does not
    assert_eq!(report.repeat_customers.len(), 1);
    assert_eq!(report.repeat_customers[0].customer_id, 2);
    assert_eq!(report.repeat_customers[0].order_count, 2);
}

#[test]
fn test_monthly_trends_golden() {
    let report = TabularEngine::new().compute(&fixture_customers(), &fixture_orders(), window());

    let rows = &report.monthly_trends;
    assert_eq!(rows.len(), 4);

    assert_eq!((rows[0].year, rows[0].month), (2023, 12));
    assert_eq!(rows[0].order_count, 1);
    assert_eq!(rows[0].total_revenue, dec!(80.00));

    assert_eq!((rows[1].year, rows[1].month), (2024, 1));
    assert_eq!(rows[1].total_revenue, dec!(100.00));

    assert_eq!((rows[2].year, rows[2].month), (2024, 2));
    assert_eq!(rows[2].total_revenue, dec!(200.00));

    assert_eq!((rows[3].year, rows[3].month), (2024, 3));
    assert_eq!(rows[3].order_count, 6);
    assert_eq!(rows[3].total_revenue, dec!(960.00));
}

#[test]
fn test_regional_revenue_golden() {
    let report = TabularEngine::new().compute(&fixture_customers(), &fixture_orders(), window());

    let rows = &report.regional_revenue;
    assert_eq!(rows.len(), 5);

    assert_eq!(rows[0].region, Region::North);
    assert_eq!(rows[0].customer_count, 2);
    assert_eq!(rows[0].order_count, 5);
    assert_eq!(rows[0].total_revenue, dec!(660.00));
    assert_eq!(rows[0].avg_order_value, dec!(132.00));

    // revenue tie between South and West breaks on region name
    assert_eq!(rows[1].region, Region::South);
    assert_eq!(rows[1].avg_order_value, dec!(150.00));
    assert_eq!(rows[2].region, Region::West);

    assert_eq!(rows[3].region, Region::Unknown);
    assert_eq!(rows[3].total_revenue, dec!(80.00));

    // region with customers but no orders still appears, zeroed
    assert_eq!(rows[4].region, Region::East);
    assert_eq!(rows[4].customer_count, 0);
    assert_eq!(rows[4].order_count, 0);
    assert_eq!(rows[4].total_revenue, dec!(0.00));
    assert_eq!(rows[4].avg_order_value, dec!(0));
}

#[test]
fn test_top_spenders_golden() {
    let report = TabularEngine::new().compute(&fixture_customers(), &fixture_orders(), window());

    let rows = &report.top_spenders;
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].customer_id, 3);
    assert_eq!(rows[0].total_spent, dec!(310.00));
    assert_eq!(rows[0].order_count, 2);
    assert_eq!(rows[0].avg_order_value, dec!(155.00));
    assert_eq!(rows[0].last_order_date, date(2024, 3, 10));

    // spend tie between 2 and 4 breaks on customer_id
    assert_eq!(rows[1].customer_id, 2);
    assert_eq!(rows[1].last_order_date, date(2024, 3, 20));
    assert_eq!(rows[2].customer_id, 4);

    // order on the window end date is included
    assert_eq!(rows[3].customer_id, 1);
    assert_eq!(rows[3].total_spent, dec!(50.00));
    assert_eq!(rows[3].last_order_date, date(2024, 3, 31));
}

#[test]
fn test_window_boundary_day_30_in_day_31_out() {
    let customers = vec![
        customer(1, "Edge In", None, Region::North),
        customer(2, "Edge Out", None, Region::North),
    ];
    // run_date 2024-03-31: day 30 before is 2024-03-01, day 31 is 2024-02-29
    let orders = vec![
        order(10, 1, date(2024, 3, 1), 1_000),
        order(11, 2, date(2024, 2, 29), 1_000),
    ];

    let report = TabularEngine::new().compute(&customers, &orders, window());

    assert_eq!(report.top_spenders.len(), 1);
    assert_eq!(report.top_spenders[0].customer_id, 1);
}

#[test]
fn test_top_spenders_limit_ten() {
    let mut customers = Vec::new();
    let mut orders = Vec::new();
    for id in 1..=12 {
        customers.push(customer(id, &format!("Customer {}", id), None, Region::North));
        // higher id spends more
        orders.push(order(100 + id, id, date(2024, 3, 10), id * 1_000));
    }

    let report = TabularEngine::new().compute(&customers, &orders, window());

    assert_eq!(report.top_spenders.len(), 10);
    assert_eq!(report.top_spenders[0].customer_id, 12);
    assert_eq!(report.top_spenders[9].customer_id, 3);
}

#[test]
fn test_empty_inputs_give_empty_well_formed_results() {
    let report = TabularEngine::new().compute(&[], &[], window());

    assert!(report.repeat_customers.is_empty());
    assert!(report.monthly_trends.is_empty());
    assert!(report.regional_revenue.is_empty());
    assert!(report.top_spenders.is_empty());
}

#[test]
fn test_input_order_does_not_change_output() {
    let customers = fixture_customers();
    let orders = fixture_orders();

    let mut reversed_customers = customers.clone();
    reversed_customers.reverse();
    let mut reversed_orders = orders.clone();
    reversed_orders.reverse();

    let engine = TabularEngine::new();
    let forward = engine.compute(&customers, &orders, window());
    let backward = engine.compute(&reversed_customers, &reversed_orders, window());

    assert_eq!(forward, backward);
}
