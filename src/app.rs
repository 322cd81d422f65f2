// ==========================================
// Customer Analytics - run orchestrator
// ==========================================
// Wires the full batch: ingest -> canonicalize -> load store ->
// {query engine, tabular engine} -> reconcile -> write outputs.
//
// Failure policy: a query-path failure (store unreachable after
// retries) degrades the run — the tabular report is still produced and
// written, and the summary records the query engine's absence with its
// reason. Ingestion failures are fatal: with no raw records there is
// nothing to compute.
// ==========================================

use crate::config::settings::Settings;
use crate::domain::issue::{RunSummary, ValidationIssue};
use crate::domain::kpi::{DateWindow, KpiReport, TOP_SPENDERS_WINDOW_DAYS};
use crate::engine::canonicalizer::Canonicalizer;
use crate::engine::query::QueryEngine;
use crate::engine::reconcile::{compare_reports, KpiDivergence};
use crate::engine::tabular::TabularEngine;
use crate::report;
use crate::repository::sqlite_store::SqliteStore;
use crate::{importer, repository::analytics_repo::AnalyticsStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// RunOutcome - everything one run produced
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub run_date: NaiveDate,
    pub summary: RunSummary,
    pub issues: Vec<ValidationIssue>,
    pub tabular: KpiReport,
    /// None when the query path failed; the reason is in query_error.
    pub query: Option<KpiReport>,
    pub query_error: Option<String>,
    pub divergences: Vec<KpiDivergence>,
}

impl RunOutcome {
    pub fn engines_agree(&self) -> bool {
        self.query.is_some() && self.divergences.is_empty()
    }
}

/// Executes one full batch run.
pub async fn run(settings: &Settings) -> anyhow::Result<RunOutcome> {
    let run_id = Uuid::new_v4();
    tracing::info!(%run_id, run_date = %settings.run_date, "run started");

    // ===== ingest =====
    let raw_customers = importer::parse_customers_csv(&settings.customers_csv_path)?;
    let raw_orders = importer::parse_orders_xml(&settings.orders_xml_path)?;
    tracing::info!(
        customers = raw_customers.len(),
        orders = raw_orders.len(),
        "raw records read"
    );

    // ===== canonicalize =====
    let canonicalizer = Canonicalizer::new(settings.cleaning.clone(), settings.run_timestamp);
    let batch = canonicalizer.canonicalize(&raw_customers, &raw_orders);
    let summary = RunSummary::tally(
        raw_customers.len(),
        batch.customers.len(),
        raw_orders.len(),
        batch.orders.len(),
        &batch.issues,
    );
    for (kind, count) in &summary.issues_by_kind {
        tracing::info!(kind = %kind, count = *count, "validation issues");
    }

    // ===== compute (both strategies, concurrently) =====
    if let Some(parent) = settings.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let window = DateWindow::trailing(settings.run_date, TOP_SPENDERS_WINDOW_DAYS);
    let query_path = async {
        let store: Arc<dyn AnalyticsStore> = Arc::new(SqliteStore::new(&settings.db_path)?);
        let engine = QueryEngine::new(store, settings.retry);
        engine.load(&batch.customers, &batch.orders).await?;
        engine.compute(settings.run_date).await
    };
    let tabular_path = async { TabularEngine::new().compute(&batch.customers, &batch.orders, window) };

    let (query_result, tabular) = futures::join!(query_path, tabular_path);

    // ===== reconcile =====
    let (query, query_error, divergences) = match query_result {
        Ok(report) => {
            let divergences = compare_reports(&tabular, &report);
            if divergences.is_empty() {
                tracing::info!("engines agree on all four KPIs");
            } else {
                for divergence in &divergences {
                    tracing::error!(kpi = %divergence.kpi, "{}", divergence.message);
                }
            }
            (Some(report), None, divergences)
        }
        Err(err) => {
            tracing::error!(error = %err, "query engine failed; tabular results remain valid");
            (None, Some(err.to_string()), Vec::new())
        }
    };

    let outcome = RunOutcome {
        run_id,
        run_date: settings.run_date,
        summary,
        issues: batch.issues,
        tabular,
        query,
        query_error,
        divergences,
    };

    // ===== write outputs =====
    report::write_tabular_report(&settings.output_dir, &outcome.tabular)?;
    if let Some(query_report) = &outcome.query {
        report::write_query_report(&settings.output_dir, query_report)?;
    }
    report::write_run_summary(&settings.output_dir, &outcome)?;
    tracing::info!(output_dir = %settings.output_dir.display(), "outputs written");

    Ok(outcome)
}
