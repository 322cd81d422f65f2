// ==========================================
// Customer Analytics - result writers
// ==========================================
// Serializes each engine's KPI result sets and the run summary to the
// output directory. Query engine results go out as JSON, tabular
// engine results as CSV, matching how the two pipelines' outputs are
// consumed downstream.
// ==========================================

use crate::domain::kpi::KpiReport;
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes the query engine's report as `sql_*.json` files.
pub fn write_query_report(output_dir: &Path, report: &KpiReport) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    Ok(vec![
        write_json(output_dir.join("sql_repeat_customers.json"), &report.repeat_customers)?,
        write_json(output_dir.join("sql_monthly_trends.json"), &report.monthly_trends)?,
        write_json(output_dir.join("sql_regional_revenue.json"), &report.regional_revenue)?,
        write_json(output_dir.join("sql_top_spenders.json"), &report.top_spenders)?,
    ])
}

/// Writes the tabular engine's report as `tabular_*.csv` files.
pub fn write_tabular_report(output_dir: &Path, report: &KpiReport) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    Ok(vec![
        write_csv(output_dir.join("tabular_repeat_customers.csv"), &report.repeat_customers)?,
        write_csv(output_dir.join("tabular_monthly_trends.csv"), &report.monthly_trends)?,
        write_csv(output_dir.join("tabular_regional_revenue.csv"), &report.regional_revenue)?,
        write_csv(output_dir.join("tabular_top_spenders.csv"), &report.top_spenders)?,
    ])
}

/// Writes the run summary record as `run_summary.json`.
pub fn write_run_summary<T: Serialize>(output_dir: &Path, record: &T) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    write_json(output_dir.join("run_summary.json"), record)
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> anyhow::Result<PathBuf> {
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("write {}", path.display()))?;
    std::io::Write::flush(&mut writer)?;
    Ok(path)
}

fn write_csv<T: Serialize>(path: PathBuf, rows: &[T]) -> anyhow::Result<PathBuf> {
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::{cents_to_decimal, MonthlyTrendRow};
    use tempfile::TempDir;

    #[test]
    fn test_write_reports() {
        let dir = TempDir::new().unwrap();
        let report = KpiReport {
            monthly_trends: vec![MonthlyTrendRow {
                year: 2024,
                month: 1,
                order_count: 1,
                total_revenue: cents_to_decimal(10000),
            }],
            ..Default::default()
        };

        let json_paths = write_query_report(dir.path(), &report).unwrap();
        let csv_paths = write_tabular_report(dir.path(), &report).unwrap();
        assert_eq!(json_paths.len(), 4);
        assert_eq!(csv_paths.len(), 4);

        let trends = std::fs::read_to_string(dir.path().join("sql_monthly_trends.json")).unwrap();
        assert!(trends.contains("\"order_count\": 1"));

        let csv = std::fs::read_to_string(dir.path().join("tabular_monthly_trends.csv")).unwrap();
        assert!(csv.starts_with("year,month,order_count,total_revenue"));
        assert!(csv.contains("2024,1,1,100.00"));
    }
}
